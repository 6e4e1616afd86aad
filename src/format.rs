//! Wire representations of a flight path
//!
//! A path is either a plain list of `{lng, lat}` objects or a GeoJSON
//! `Feature` with a `LineString` geometry, e.g.
//!
//! ```json
//! {
//!   "type": "Feature",
//!   "geometry": { "type": "LineString", "coordinates": [[-3.18, 55.94], ..] },
//!   "properties": { "name": "Delivery Path" }
//! }
//! ```

use crate::error::Result;
use crate::types::{Path, Position};
use serde::{Deserialize, Serialize};

/// `properties.name` of every path feature
pub const PATH_FEATURE_NAME: &str = "Delivery Path";

/// GeoJSON `Feature` holding a single `LineString`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureTag,
    pub geometry: LineString,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    Feature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: LineStringTag,
    /// `[lng, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStringTag {
    LineString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: String,
}

impl Feature {
    pub fn from_path(path: &Path) -> Self {
        Self {
            kind: FeatureTag::Feature,
            geometry: LineString {
                kind: LineStringTag::LineString,
                coordinates: path.waypoints().iter().map(|p| [p.lng, p.lat]).collect(),
            },
            properties: FeatureProperties {
                name: PATH_FEATURE_NAME.to_string(),
            },
        }
    }

    /// Waypoints of the line, in order
    pub fn positions(&self) -> Vec<Position> {
        self.geometry
            .coordinates
            .iter()
            .map(|&[lng, lat]| Position::new(lng, lat))
            .collect()
    }
}

/// The path as a list of positions, serialized as `[{"lng":..,"lat":..}]`
pub fn to_coordinate_list(path: &Path) -> Vec<Position> {
    path.waypoints().to_vec()
}

/// The path as a GeoJSON feature
pub fn to_geojson_feature(path: &Path) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(Feature::from_path(path))?)
}
