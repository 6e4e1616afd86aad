//! Discrete-step motion model
//!
//! A drone moves in fixed-length steps along one of the sixteen compass
//! bearings. Steps are applied in degree space:
//! `Δlng = step · cos(θ)`, `Δlat = step · sin(θ)`.

use crate::error::Result;
use crate::types::{Bearing, Move, Position};

/// Default length of a single move (degrees)
pub const DEFAULT_STEP_LENGTH: f64 = 0.00015;

/// All bearings the search may expand, in their fixed tie-breaking order
pub fn all_moves() -> &'static [Bearing; 16] {
    &Bearing::ALL
}

/// Advance `position` by `step` along `bearing`
pub fn apply_move(position: Position, bearing: Bearing, step: f64) -> Position {
    let (d_lng, d_lat) = bearing.unit_vector();
    Position::new(position.lng + step * d_lng, position.lat + step * d_lat)
}

/// Every position reachable from `position` in one step, in bearing order
pub fn successors(position: Position, step: f64) -> impl Iterator<Item = (Bearing, Position)> {
    all_moves()
        .iter()
        .map(move |&bearing| (bearing, apply_move(position, bearing, step)))
}

/// Caller-facing next-position query
///
/// Validates both the start position and the angle. The hover angle returns
/// the start unchanged.
pub fn next_position(start: Position, angle: f64, step: f64) -> Result<Position> {
    let start = start.validate()?;

    match Move::from_angle(angle)? {
        Move::Fly(bearing) => Ok(apply_move(start, bearing, step)),
        Move::Hover => Ok(start),
    }
}
