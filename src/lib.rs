#![doc = include_str!("../README.md")]

pub use crate::config::{ConfinementPolicy, EngineConfig, RegistryConfig};
pub use crate::error::{Error, RegionDefect, Result, SearchFailure};
pub use crate::planner::{DEFAULT_DEPOT, DeliveryPath, DeliveryPlanner, DeliveryRequest};
pub use crate::registry::{Confinement, RegionRegistry};
pub use crate::search::PathSearch;
pub use crate::types::*;

pub mod api;
pub mod config;
mod error;
pub mod format;
pub mod geometry;
pub mod motion;
pub mod planner;
pub mod registry;
pub mod search;
mod types;
