//! Engine and region configuration

use crate::error::{Error, Result};
use crate::geometry::DEFAULT_CLOSENESS_THRESHOLD;
use crate::motion::DEFAULT_STEP_LENGTH;
use crate::types::RegionDefinition;
use serde::{Deserialize, Serialize};

/// Default expansion budget for a single search
pub const DEFAULT_MAX_EXPANSIONS: usize = 100_000;

/// Largest coincidence tolerance, as a fraction of the step length
///
/// Two successors of the same node are at least `2 · sin(11.25°) ≈ 0.39`
/// steps apart. A grid cell of a quarter step has a diagonal of about 0.35
/// steps, so no two successors of one node ever share a cell.
pub const MAX_COINCIDENCE_RATIO: f64 = 0.25;

/// Default coincidence tolerance (degrees)
pub const DEFAULT_COINCIDENCE_TOLERANCE: f64 = DEFAULT_STEP_LENGTH * MAX_COINCIDENCE_RATIO;

/// Which legs of a multi-leg delivery are held inside the central area
///
/// Once a drone has entered the central area on its way to a target inside
/// it, it may not leave again. This decides whose target counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfinementPolicy {
    /// Every leg is confined if its own target is inside the central area
    #[default]
    PerLeg,
    /// Only the final leg (the drop-off) is ever confined
    FinalLegOnly,
}

/// Tuning parameters of the path search
///
/// All distances are in degrees. Missing fields fall back to their defaults
/// when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Length of every move
    pub step_length: f64,

    /// Arrival radius; a position strictly closer than this has arrived
    pub closeness_threshold: f64,

    /// Grid size used to merge near-identical positions during the search
    pub coincidence_tolerance: f64,

    /// Maximum node expansions before a search gives up
    pub max_expansions: usize,

    pub confinement_policy: ConfinementPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_length: DEFAULT_STEP_LENGTH,
            closeness_threshold: DEFAULT_CLOSENESS_THRESHOLD,
            coincidence_tolerance: DEFAULT_COINCIDENCE_TOLERANCE,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            confinement_policy: ConfinementPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every parameter is usable by the path search
    ///
    /// Lengths must be finite and positive, the coincidence tolerance may be
    /// at most [`MAX_COINCIDENCE_RATIO`] of the step length, and the
    /// expansion budget must be non-zero.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("step_length", self.step_length),
            ("closeness_threshold", self.closeness_threshold),
            ("coincidence_tolerance", self.coincidence_tolerance),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig { field, value });
            }
        }

        if self.coincidence_tolerance > self.step_length * MAX_COINCIDENCE_RATIO {
            return Err(Error::InvalidConfig {
                field: "coincidence_tolerance",
                value: self.coincidence_tolerance,
            });
        }

        if self.max_expansions == 0 {
            return Err(Error::InvalidConfig {
                field: "max_expansions",
                value: 0.0,
            });
        }

        Ok(())
    }

    /// Builder-style setter for the step length
    pub fn with_step_length(mut self, step_length: f64) -> Self {
        self.step_length = step_length;
        self
    }

    /// Builder-style setter for the closeness threshold
    pub fn with_closeness_threshold(mut self, threshold: f64) -> Self {
        self.closeness_threshold = threshold;
        self
    }

    /// Builder-style setter for the coincidence tolerance
    pub fn with_coincidence_tolerance(mut self, tolerance: f64) -> Self {
        self.coincidence_tolerance = tolerance;
        self
    }

    /// Builder-style setter for the expansion budget
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Builder-style setter for the confinement policy
    pub fn with_confinement_policy(mut self, policy: ConfinementPolicy) -> Self {
        self.confinement_policy = policy;
        self
    }
}

/// Region data the registry is built from
///
/// ```json
/// {
///   "centralArea": { "name": "central", "vertices": [..] },
///   "noFlyZones": [{ "name": "George Square Area", "vertices": [..] }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    pub central_area: RegionDefinition,

    #[serde(default)]
    pub no_fly_zones: Vec<RegionDefinition>,
}
