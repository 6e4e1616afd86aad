//! Immutable set of flight restrictions shared by all searches

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::types::{Position, Region};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Whether a search leg is held inside the central area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confinement {
    /// No central-area rule applies
    Free,
    /// Once inside the central area the drone may not leave it
    CentralArea,
}

/// The central area and the no-fly zones
///
/// Built once at startup and read-only afterwards. All queries take `&self`,
/// so a registry can be shared between threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    central_area: Region,
    no_fly_zones: Vec<Region>,
}

impl RegionRegistry {
    pub fn new(central_area: Region, no_fly_zones: Vec<Region>) -> Self {
        Self {
            central_area,
            no_fly_zones,
        }
    }

    /// Validate every region definition and build the registry
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        let central_area = Region::try_from(config.central_area)?;
        let no_fly_zones = config
            .no_fly_zones
            .into_iter()
            .map(Region::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            central_area = central_area.name(),
            no_fly_zones = no_fly_zones.len(),
            "loaded region registry"
        );

        Ok(Self::new(central_area, no_fly_zones))
    }

    /// Parse a JSON [`RegistryConfig`]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Read a JSON [`RegistryConfig`] from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn central_area(&self) -> &Region {
        &self.central_area
    }

    pub fn no_fly_zones(&self) -> &[Region] {
        &self.no_fly_zones
    }

    pub fn is_in_central_area(&self, position: Position) -> bool {
        self.central_area.contains(position)
    }

    pub fn is_in_no_fly_zone(&self, position: Position) -> bool {
        self.no_fly_zones.iter().any(|zone| zone.contains(position))
    }

    /// Confinement of a leg heading for `target`
    pub fn confinement_for(&self, target: Position) -> Confinement {
        if self.is_in_central_area(target) {
            Confinement::CentralArea
        } else {
            Confinement::Free
        }
    }

    /// Whether a drone may fly the single step `from → to`
    ///
    /// The step is illegal if it ends in a no-fly zone, if it touches or
    /// crosses a no-fly-zone boundary, or if it leaves the central area
    /// from inside while the leg is confined. A drone outside the central
    /// area is unconstrained by it until it first enters.
    pub fn is_legal_move(&self, from: Position, to: Position, confinement: Confinement) -> bool {
        if self
            .no_fly_zones
            .iter()
            .any(|zone| zone.contains(to) || zone.is_crossed_by(from, to))
        {
            return false;
        }

        match confinement {
            Confinement::Free => true,
            Confinement::CentralArea => {
                !self.is_in_central_area(from) || self.is_in_central_area(to)
            }
        }
    }
}
