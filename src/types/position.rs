use crate::error::{Error, Result};
use crate::geometry;
use serde::{Deserialize, Serialize};

/// Valid longitude range (degrees)
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// Valid latitude range (degrees)
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// A geographic position in degrees
///
/// Serialized as `{"lng": .., "lat": ..}`. Distances between positions are
/// computed in degree space, treating the delivery area as locally planar.
///
/// Construction does not validate; call [`Position::validate`] on anything
/// that came from a caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl Position {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Check both coordinates are within their valid ranges
    ///
    /// NaN is never valid.
    pub fn is_valid(&self) -> bool {
        (MIN_LNG..=MAX_LNG).contains(&self.lng) && (MIN_LAT..=MAX_LAT).contains(&self.lat)
    }

    /// Return the position unchanged if valid, `InvalidCoordinate` otherwise
    pub fn validate(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::InvalidCoordinate {
                lng: self.lng,
                lat: self.lat,
            })
        }
    }

    /// Euclidean distance to `other` in degrees
    pub fn distance_to(&self, other: Position) -> f64 {
        geometry::distance(*self, other)
    }

    /// Whether `other` is within the default closeness threshold
    pub fn is_close_to(&self, other: Position) -> bool {
        geometry::is_close(*self, other, geometry::DEFAULT_CLOSENESS_THRESHOLD)
    }
}
