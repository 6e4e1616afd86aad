//! Multi-leg delivery flights
//!
//! A delivery flies from the depot to the restaurant and from there to the
//! drop-off point. Each leg is one [`PathSearch`].

use crate::config::{ConfinementPolicy, EngineConfig};
use crate::error::Result;
use crate::registry::{Confinement, RegionRegistry};
use crate::search::PathSearch;
use crate::types::{Path, Position};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, trace};

/// Appleton Tower, Edinburgh
pub const DEFAULT_DEPOT: Position = Position::new(-3.186874, 55.944494);

fn default_depot() -> Position {
    DEFAULT_DEPOT
}

/// Where a delivery starts, picks up and ends
///
/// `depot` defaults to [`DEFAULT_DEPOT`] and a missing `dropoff` means the
/// drone returns to the depot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    #[serde(default = "default_depot")]
    pub depot: Position,

    pub restaurant: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff: Option<Position>,
}

impl DeliveryRequest {
    pub fn new(restaurant: Position) -> Self {
        Self {
            depot: DEFAULT_DEPOT,
            restaurant,
            dropoff: None,
        }
    }

    /// Builder-style setter for the depot
    pub fn with_depot(mut self, depot: Position) -> Self {
        self.depot = depot;
        self
    }

    /// Builder-style setter for the drop-off point
    pub fn with_dropoff(mut self, dropoff: Position) -> Self {
        self.dropoff = Some(dropoff);
        self
    }

    /// The drop-off point, falling back to the depot
    pub fn dropoff(&self) -> Position {
        self.dropoff.unwrap_or(self.depot)
    }
}

/// The flight of a whole delivery
///
/// Both legs are concatenated into one path. The waypoint where the first
/// leg arrived at the restaurant is remembered as the pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPath {
    path: Path,
    pickup_index: usize,
}

impl DeliveryPath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    /// Index of the pickup waypoint in [`DeliveryPath::path`]
    pub fn pickup_index(&self) -> usize {
        self.pickup_index
    }

    pub fn pickup(&self) -> Position {
        self.path.waypoints()[self.pickup_index]
    }

    /// Waypoints of the outbound leg, pickup included
    pub fn outbound(&self) -> &[Position] {
        &self.path.waypoints()[..=self.pickup_index]
    }

    /// Waypoints of the drop-off leg, pickup included
    pub fn inbound(&self) -> &[Position] {
        &self.path.waypoints()[self.pickup_index..]
    }
}

/// Plans delivery flights against a shared registry
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct DeliveryPlanner {
    registry: Arc<RegionRegistry>,
    config: EngineConfig,
}

impl DeliveryPlanner {
    pub fn new(registry: Arc<RegionRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plan a single leg, confined if `target` is inside the central area
    pub fn plan_leg(&self, start: Position, target: Position) -> Result<Path> {
        let confinement = self.registry.confinement_for(target);
        self.search(start, target, confinement)
    }

    /// Plan depot → restaurant → drop-off
    pub fn plan_delivery(&self, request: &DeliveryRequest) -> Result<DeliveryPath> {
        let depot = request.depot.validate()?;
        let restaurant = request.restaurant.validate()?;
        let dropoff = request.dropoff().validate()?;

        let outbound = self.search(depot, restaurant, self.leg_confinement(restaurant, false))?;
        let pickup_index = outbound.len() - 1;

        let inbound = self.search(
            outbound.end(),
            dropoff,
            self.leg_confinement(dropoff, true),
        )?;

        let mut path = outbound;
        path.append(inbound);

        info!(
            ?restaurant,
            ?dropoff,
            waypoints = path.len(),
            pickup_index,
            "planned delivery"
        );

        Ok(DeliveryPath { path, pickup_index })
    }

    fn leg_confinement(&self, target: Position, is_final_leg: bool) -> Confinement {
        match self.config.confinement_policy {
            ConfinementPolicy::PerLeg => self.registry.confinement_for(target),
            ConfinementPolicy::FinalLegOnly if is_final_leg => {
                self.registry.confinement_for(target)
            }
            ConfinementPolicy::FinalLegOnly => Confinement::Free,
        }
    }

    fn search(&self, start: Position, target: Position, confinement: Confinement) -> Result<Path> {
        trace!(?start, ?target, ?confinement, "planning leg");

        let path = PathSearch::new(&self.registry, &self.config).find_path(
            start,
            target,
            confinement,
        )?;

        trace!(moves = path.move_count(), "planned leg");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, SearchFailure};
    use crate::geometry::{distance, is_close};
    use crate::types::Region;
    use claims::{assert_err, assert_matches, assert_none, assert_ok};
    use insta::assert_snapshot;

    const STEP: f64 = 0.00015;

    fn square(name: &str, left: f64, bottom: f64, size: f64) -> Region {
        Region::new(
            name,
            vec![
                Position::new(left, bottom),
                Position::new(left, bottom + size),
                Position::new(left + size, bottom + size),
                Position::new(left + size, bottom),
                Position::new(left, bottom),
            ],
        )
        .unwrap()
    }

    /// Depot inside a small central area, restaurant outside it
    fn planner(config: EngineConfig) -> DeliveryPlanner {
        let registry = RegionRegistry::new(
            square("central", 0.0, 0.0, 0.003),
            vec![square("zone", 0.0036, -0.0006, 0.0006)],
        );
        DeliveryPlanner::new(Arc::new(registry), config)
    }

    fn request() -> DeliveryRequest {
        DeliveryRequest::new(Position::new(0.0054, 0.0003)).with_depot(Position::new(0.0015, 0.0015))
    }

    #[test]
    fn request_defaults() {
        let request: DeliveryRequest =
            serde_json::from_str(r#"{"restaurant": {"lng": -3.2, "lat": 55.94}}"#).unwrap();

        assert_eq!(request.depot, DEFAULT_DEPOT);
        assert_none!(request.dropoff);
        assert_eq!(request.dropoff(), DEFAULT_DEPOT);
    }

    #[test]
    fn request_serialization() {
        let request = DeliveryRequest::new(Position::new(-3.2, 55.94))
            .with_dropoff(Position::new(-3.19, 55.945));

        let json = serde_json::to_string(&request).unwrap();
        assert_snapshot!(json, @r#"{"depot":{"lng":-3.186874,"lat":55.944494},"restaurant":{"lng":-3.2,"lat":55.94},"dropoff":{"lng":-3.19,"lat":55.945}}"#);
    }

    #[test]
    fn round_trip_delivery() {
        let planner = planner(EngineConfig::default());
        let request = request();

        let delivery = assert_ok!(planner.plan_delivery(&request));
        let path = delivery.path();

        assert_eq!(path.start(), request.depot);
        assert!(is_close(delivery.pickup(), request.restaurant, STEP));
        assert!(is_close(path.end(), request.depot, STEP));

        assert_eq!(delivery.outbound().len() + delivery.inbound().len(), path.len() + 1);
        assert_eq!(delivery.inbound()[0], delivery.pickup());

        for (from, to) in path.segments() {
            assert!((distance(from, to) - STEP).abs() < 1e-12);
            assert!(planner.registry().is_legal_move(from, to, Confinement::Free));
        }
    }

    #[test]
    fn drop_off_leg_stays_in_central_area() {
        let planner = planner(EngineConfig::default());

        let delivery = assert_ok!(planner.plan_delivery(&request()));

        let inbound = delivery.inbound();
        let entered = inbound
            .iter()
            .position(|&p| planner.registry().is_in_central_area(p))
            .unwrap();
        assert!(
            inbound[entered..]
                .iter()
                .all(|&p| planner.registry().is_in_central_area(p))
        );
    }

    #[test]
    fn explicit_dropoff() {
        let planner = planner(EngineConfig::default());
        let dropoff = Position::new(0.0006, 0.0024);

        let delivery = assert_ok!(planner.plan_delivery(&request().with_dropoff(dropoff)));
        assert!(is_close(delivery.path().end(), dropoff, STEP));
    }

    #[test]
    fn deliveries_are_deterministic() {
        let planner = planner(EngineConfig::default());

        let first = assert_ok!(planner.plan_delivery(&request()));
        let second = assert_ok!(planner.plan_delivery(&request()));
        assert_eq!(first, second);
    }

    #[test]
    fn final_leg_only_policy() {
        let planner = planner(
            EngineConfig::default().with_confinement_policy(ConfinementPolicy::FinalLegOnly),
        );

        assert_eq!(
            planner.leg_confinement(Position::new(0.001, 0.001), false),
            Confinement::Free
        );
        assert_eq!(
            planner.leg_confinement(Position::new(0.001, 0.001), true),
            Confinement::CentralArea
        );
        assert_ok!(planner.plan_delivery(&request()));
    }

    #[test]
    fn unreachable_restaurant() {
        let planner = planner(EngineConfig::default().with_max_expansions(500));
        let request = DeliveryRequest::new(Position::new(0.0039, -0.0003))
            .with_depot(Position::new(0.0015, 0.0015));

        let err = assert_err!(planner.plan_delivery(&request));
        assert_matches!(
            err,
            Error::PathUnreachable {
                reason: SearchFailure::BudgetExceeded,
                ..
            }
        );
    }

    #[test]
    fn invalid_request_positions() {
        let planner = planner(EngineConfig::default());

        let err = assert_err!(planner.plan_delivery(&DeliveryRequest::new(Position::new(181.0, 0.0))));
        assert_matches!(err, Error::InvalidCoordinate { .. });
    }

    #[test]
    fn invalid_engine_config() {
        let planner = planner(EngineConfig::default().with_step_length(0.0));

        let err = assert_err!(planner.plan_delivery(&request()));
        assert_matches!(err, Error::InvalidConfig { field: "step_length", .. });
        assert!(!err.is_client_error());
    }
}
