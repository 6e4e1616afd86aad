use crate::types::Position;
use serde::Serialize;

/// An ordered, non-empty sequence of waypoints
///
/// The first waypoint is where the flight starts. Every following waypoint
/// is its predecessor advanced by one step along a compass bearing.
/// Serialized as a plain array of positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Path {
    waypoints: Vec<Position>,
}

impl Path {
    /// Wrap waypoints already known to form a valid, non-empty path
    pub(crate) fn from_waypoints(waypoints: Vec<Position>) -> Self {
        debug_assert!(!waypoints.is_empty());
        Self { waypoints }
    }

    /// Append another path that starts where this one ends
    ///
    /// The shared junction waypoint is kept only once.
    pub(crate) fn append(&mut self, other: Path) {
        self.waypoints.extend(other.waypoints.into_iter().skip(1));
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    pub fn into_waypoints(self) -> Vec<Position> {
        self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`: a path holds at least its start position
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of moves flown (one less than the waypoint count)
    pub fn move_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    pub fn start(&self) -> Position {
        self.waypoints[0]
    }

    pub fn end(&self) -> Position {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Consecutive waypoint pairs as `(from, to)`
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.waypoints.windows(2).map(|pair| (pair[0], pair[1]))
    }
}
