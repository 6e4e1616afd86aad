use std::io;

/// Errors raised while validating inputs or planning a path
///
/// Every variant is surfaced to the caller as a rejected request. Nothing is
/// retried internally and no partial path is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Coordinate out of range: lng={lng}, lat={lat}")]
    InvalidCoordinate { lng: f64, lat: f64 },

    #[error("Malformed region {name:?}: {reason}")]
    MalformedRegion { name: String, reason: RegionDefect },

    #[error("Invalid angle: {angle} (expected a multiple of 22.5 in [0, 360) or the hover value)")]
    InvalidAngle { angle: f64 },

    #[error("No path found after {expansions} expansions: {reason}")]
    PathUnreachable {
        reason: SearchFailure,
        expansions: usize,
    },

    #[error("Invalid engine configuration: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the error was caused by the request rather than the service
    ///
    /// I/O failures (e.g. a missing registry file) and a bad engine
    /// configuration are server-side.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::InvalidConfig { .. })
    }
}

/// Reason a region boundary was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegionDefect {
    #[error("first and last vertex differ (open ring)")]
    OpenRing,

    #[error("{0} vertices, at least 4 required")]
    TooFewVertices(usize),

    #[error("vertex {0} is out of range")]
    InvalidVertex(usize),
}

/// Reason a search gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchFailure {
    #[error("every reachable position was explored")]
    Exhausted,

    #[error("expansion budget exceeded")]
    BudgetExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;
