//! Best-first (A*) search over the discrete motion model
//!
//! Nodes are positions reachable from the start by chains of moves. The
//! priority of a node is `g + h`: `g` is the length flown so far (moves
//! times step length) and `h` is the straight-line distance to the target,
//! which never overestimates since no move closes more than one step.

use crate::config::EngineConfig;
use crate::error::{Error, Result, SearchFailure};
use crate::geometry::{distance, is_close};
use crate::motion::successors;
use crate::registry::{Confinement, RegionRegistry};
use crate::types::{Path, Position};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Quantized position used to merge near-identical nodes
type Cell = (i64, i64);

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    position: Position,
    parent: Option<usize>,
    moves: u32,
}

/// Frontier entry pointing into the node arena
///
/// Ordered so that `BinaryHeap` pops the lowest priority first and, among
/// equal priorities, the entry pushed first.
#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    sequence: u64,
    node: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single-leg path search
///
/// Borrows the registry and configuration; holds no state between calls, so
/// one `PathSearch` can serve any number of searches.
pub struct PathSearch<'a> {
    registry: &'a RegionRegistry,
    config: &'a EngineConfig,
}

impl<'a> PathSearch<'a> {
    pub fn new(registry: &'a RegionRegistry, config: &'a EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Find a path from `start` to a position close to `target`
    ///
    /// The returned path begins exactly at `start` and ends at the first
    /// expanded position within the closeness threshold of `target`; it is
    /// not snapped onto the target. Every step of it is legal under
    /// `confinement`.
    ///
    /// Fails with `InvalidConfig` for an unusable [`EngineConfig`] and with
    /// `PathUnreachable` when the frontier runs dry or the expansion budget
    /// is spent. No partial path is returned.
    pub fn find_path(
        &self,
        start: Position,
        target: Position,
        confinement: Confinement,
    ) -> Result<Path> {
        self.config.validate()?;
        let start = start.validate()?;
        let target = target.validate()?;

        let step = self.config.step_length;
        let threshold = self.config.closeness_threshold;

        trace!(?start, ?target, ?confinement, "starting path search");

        let mut nodes = vec![SearchNode {
            position: start,
            parent: None,
            moves: 0,
        }];
        let mut frontier = BinaryHeap::new();
        let mut expanded: HashSet<Cell> = HashSet::new();
        let mut best_moves: HashMap<Cell, u32> = HashMap::new();
        let mut sequence: u64 = 0;

        frontier.push(FrontierEntry {
            priority: distance(start, target),
            sequence,
            node: 0,
        });
        best_moves.insert(self.cell(start), 0);

        let mut expansions = 0;

        while let Some(entry) = frontier.pop() {
            let current = nodes[entry.node];

            if !expanded.insert(self.cell(current.position)) {
                continue;
            }

            if is_close(current.position, target, threshold) {
                let path = reconstruct_path(&nodes, entry.node);
                debug!(
                    expansions,
                    waypoints = path.len(),
                    "path search reached target"
                );
                return Ok(path);
            }

            expansions += 1;
            if expansions > self.config.max_expansions {
                warn!(expansions, ?start, ?target, "path search budget exceeded");
                return Err(Error::PathUnreachable {
                    reason: SearchFailure::BudgetExceeded,
                    expansions,
                });
            }

            let moves = current.moves + 1;
            for (_, next) in successors(current.position, step) {
                if !next.is_valid() {
                    continue;
                }

                let cell = self.cell(next);
                if expanded.contains(&cell) {
                    continue;
                }
                if best_moves.get(&cell).is_some_and(|&best| best <= moves) {
                    continue;
                }
                if !self
                    .registry
                    .is_legal_move(current.position, next, confinement)
                {
                    continue;
                }

                best_moves.insert(cell, moves);
                nodes.push(SearchNode {
                    position: next,
                    parent: Some(entry.node),
                    moves,
                });

                sequence += 1;
                frontier.push(FrontierEntry {
                    priority: moves as f64 * step + distance(next, target),
                    sequence,
                    node: nodes.len() - 1,
                });
            }
        }

        warn!(expansions, ?start, ?target, "path search exhausted");
        Err(Error::PathUnreachable {
            reason: SearchFailure::Exhausted,
            expansions,
        })
    }

    fn cell(&self, position: Position) -> Cell {
        let tolerance = self.config.coincidence_tolerance;
        (
            (position.lng / tolerance).round() as i64,
            (position.lat / tolerance).round() as i64,
        )
    }
}

/// Walk parent links back from `node` to the start
fn reconstruct_path(nodes: &[SearchNode], node: usize) -> Path {
    let mut waypoints = Vec::new();
    let mut current = Some(node);
    while let Some(index) = current {
        waypoints.push(nodes[index].position);
        current = nodes[index].parent;
    }
    waypoints.reverse();

    Path::from_waypoints(waypoints)
}
