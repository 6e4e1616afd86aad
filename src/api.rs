//! Request/response layer of the delivery service
//!
//! Transport-agnostic: every operation takes a deserialized request body and
//! returns a serializable response. [`DeliveryService::handle`] runs an
//! operation on a raw JSON body, which is all an HTTP front end needs to do.
//!
//! Inputs are validated before they reach the engine. Every error returned
//! from here is a rejected request (see [`Error::is_client_error`]).
//!
//! [`Error::is_client_error`]: crate::Error::is_client_error

use crate::config::EngineConfig;
use crate::error::Result;
use crate::format::{to_coordinate_list, to_geojson_feature};
use crate::geometry;
use crate::motion;
use crate::planner::{DeliveryPlanner, DeliveryRequest};
use crate::registry::RegionRegistry;
use crate::types::{Position, Region, RegionDefinition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Body of `distanceTo` and `isCloseTo`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPairRequest {
    pub position1: Position,
    pub position2: Position,
}

/// Body of `nextPosition`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextPositionRequest {
    pub start: Position,
    pub angle: f64,
}

/// Body of `isInRegion`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionQueryRequest {
    pub position: Position,
    pub region: RegionDefinition,
}

/// Parse a JSON request body
///
/// Broken JSON, an empty body and missing fields all fail with
/// `InvalidPayload`.
pub fn parse_request<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

/// Operations offered by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    DistanceTo,
    IsCloseTo,
    NextPosition,
    IsInRegion,
    CalcDeliveryPath,
    CalcDeliveryPathGeoJson,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::DistanceTo,
        Operation::IsCloseTo,
        Operation::NextPosition,
        Operation::IsInRegion,
        Operation::CalcDeliveryPath,
        Operation::CalcDeliveryPathGeoJson,
    ];

    /// Look up an operation by its endpoint name, e.g. `distanceTo`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::DistanceTo => "distanceTo",
            Operation::IsCloseTo => "isCloseTo",
            Operation::NextPosition => "nextPosition",
            Operation::IsInRegion => "isInRegion",
            Operation::CalcDeliveryPath => "calcDeliveryPath",
            Operation::CalcDeliveryPathGeoJson => "calcDeliveryPathGeoJSON",
        }
    }
}

/// Entry point for all service operations
///
/// Holds a [`DeliveryPlanner`]; cloning the service shares its registry.
#[derive(Debug, Clone)]
pub struct DeliveryService {
    planner: DeliveryPlanner,
}

impl DeliveryService {
    pub fn new(planner: DeliveryPlanner) -> Self {
        Self { planner }
    }

    pub fn with_registry(registry: Arc<RegionRegistry>, config: EngineConfig) -> Self {
        Self::new(DeliveryPlanner::new(registry, config))
    }

    pub fn planner(&self) -> &DeliveryPlanner {
        &self.planner
    }

    fn config(&self) -> &EngineConfig {
        self.planner.config()
    }

    pub fn distance_to(&self, request: &PositionPairRequest) -> Result<f64> {
        let position1 = request.position1.validate()?;
        let position2 = request.position2.validate()?;

        Ok(geometry::distance(position1, position2))
    }

    pub fn is_close_to(&self, request: &PositionPairRequest) -> Result<bool> {
        let position1 = request.position1.validate()?;
        let position2 = request.position2.validate()?;

        Ok(geometry::is_close(
            position1,
            position2,
            self.config().closeness_threshold,
        ))
    }

    pub fn next_position(&self, request: &NextPositionRequest) -> Result<Position> {
        motion::next_position(request.start, request.angle, self.config().step_length)
    }

    pub fn is_in_region(&self, request: &RegionQueryRequest) -> Result<bool> {
        let position = request.position.validate()?;
        let region = Region::try_from(request.region.clone())?;

        Ok(region.contains(position))
    }

    /// The delivery flight as a list of positions
    pub fn calc_delivery_path(&self, request: &DeliveryRequest) -> Result<Vec<Position>> {
        let delivery = self.planner.plan_delivery(request)?;
        Ok(to_coordinate_list(delivery.path()))
    }

    /// The delivery flight as a GeoJSON `Feature`
    pub fn calc_delivery_path_geojson(&self, request: &DeliveryRequest) -> Result<serde_json::Value> {
        let delivery = self.planner.plan_delivery(request)?;
        to_geojson_feature(delivery.path())
    }

    /// Run `operation` on a raw JSON request body
    pub fn handle(&self, operation: Operation, body: &str) -> Result<serde_json::Value> {
        debug!(operation = operation.name(), "handling request");

        let response = match operation {
            Operation::DistanceTo => serde_json::to_value(self.distance_to(&parse_request(body)?)?)?,
            Operation::IsCloseTo => serde_json::to_value(self.is_close_to(&parse_request(body)?)?)?,
            Operation::NextPosition => {
                serde_json::to_value(self.next_position(&parse_request(body)?)?)?
            }
            Operation::IsInRegion => {
                serde_json::to_value(self.is_in_region(&parse_request(body)?)?)?
            }
            Operation::CalcDeliveryPath => {
                serde_json::to_value(self.calc_delivery_path(&parse_request(body)?)?)?
            }
            Operation::CalcDeliveryPathGeoJson => {
                self.calc_delivery_path_geojson(&parse_request(body)?)?
            }
        };

        Ok(response)
    }
}
