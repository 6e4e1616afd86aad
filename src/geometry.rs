//! Planar predicates over positions and regions
//!
//! Everything here works in degree space and treats the delivery area as
//! flat. All functions are pure.

use crate::types::{BoundingBox, Position, Region};

/// Default distance below which two positions count as "close" (degrees)
pub const DEFAULT_CLOSENESS_THRESHOLD: f64 = 0.00015;

/// Perpendicular distance within which a point counts as lying on an edge
const BOUNDARY_EPSILON: f64 = 1e-12;

/// Euclidean distance between two positions
pub fn distance(a: Position, b: Position) -> f64 {
    let d_lng = a.lng - b.lng;
    let d_lat = a.lat - b.lat;
    (d_lng * d_lng + d_lat * d_lat).sqrt()
}

/// `distance(a, b) < threshold`
///
/// The comparison is strict: a distance exactly equal to the threshold is
/// not close.
pub fn is_close(a: Position, b: Position, threshold: f64) -> bool {
    distance(a, b) < threshold
}

/// Whether `position` lies inside `region` or on its boundary
///
/// Points on an edge are treated as inside, which keeps drones strictly
/// clear of no-fly-zone boundaries. Everything else goes through the
/// crossing-number test.
pub fn point_in_region(position: Position, region: &Region) -> bool {
    if !region.bounding_box().contains(position) {
        return false;
    }

    if region
        .edges()
        .any(|(a, b)| is_on_segment(position, a, b))
    {
        return true;
    }

    let mut inside = false;
    for (a, b) in region.edges() {
        if (a.lat > position.lat) != (b.lat > position.lat) {
            let crossing_lng = a.lng + (position.lat - a.lat) * (b.lng - a.lng) / (b.lat - a.lat);
            if position.lng < crossing_lng {
                inside = !inside;
            }
        }
    }

    inside
}

/// Whether the segment `from → to` touches or crosses any edge of `region`
///
/// Catches moves that would jump over a corner of a no-fly zone even though
/// both endpoints are outside it.
pub fn segment_crosses_region(from: Position, to: Position, region: &Region) -> bool {
    if !BoundingBox::from_segment(from, to).intersects(region.bounding_box()) {
        return false;
    }

    region
        .edges()
        .any(|(a, b)| segments_intersect(from, to, a, b))
}

/// Whether segments `p1 → p2` and `q1 → q2` share at least one point
pub fn segments_intersect(p1: Position, p2: Position, q1: Position, q2: Position) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    is_on_segment(p1, q1, q2)
        || is_on_segment(p2, q1, q2)
        || is_on_segment(q1, p1, p2)
        || is_on_segment(q2, p1, p2)
}

/// Z component of `(b - a) × (c - a)`
fn cross(a: Position, b: Position, c: Position) -> f64 {
    (b.lng - a.lng) * (c.lat - a.lat) - (b.lat - a.lat) * (c.lng - a.lng)
}

fn straddles(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// Whether `p` lies on the closed segment `a → b`
fn is_on_segment(p: Position, a: Position, b: Position) -> bool {
    let length = distance(a, b);
    if length == 0.0 {
        return distance(p, a) <= BOUNDARY_EPSILON;
    }

    if cross(a, b, p).abs() > BOUNDARY_EPSILON * length {
        return false;
    }

    let bbox = BoundingBox::from_segment(a, b);
    p.lng >= bbox.left - BOUNDARY_EPSILON
        && p.lng <= bbox.right + BOUNDARY_EPSILON
        && p.lat >= bbox.bottom - BOUNDARY_EPSILON
        && p.lat <= bbox.top + BOUNDARY_EPSILON
}
