use crate::error::{Error, RegionDefect, Result};
use crate::geometry;
use crate::types::{BoundingBox, Position};
use serde::{Deserialize, Serialize};

/// Minimum vertex count of a closed ring (a triangle plus the closing vertex)
pub const MIN_VERTICES: usize = 4;

/// Unvalidated region as it appears on the wire and in configuration files
///
/// ```json
/// { "name": "George Square Area", "vertices": [{"lng": .., "lat": ..}, ..] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub name: String,
    pub vertices: Vec<Position>,
}

/// A named polygon with a closed boundary ring
///
/// Only constructed through validation, so every `Region` has at least
/// [`MIN_VERTICES`] in-range vertices and its first vertex equals its last.
/// Open rings are rejected, never auto-closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    vertices: Vec<Position>,
    bounding_box: BoundingBox,
}

impl Region {
    /// Validate a boundary ring and build a region from it
    pub fn new(name: impl Into<String>, vertices: Vec<Position>) -> Result<Self> {
        let name = name.into();

        let malformed = |reason| Error::MalformedRegion {
            name: name.clone(),
            reason,
        };

        if vertices.len() < MIN_VERTICES {
            return Err(malformed(RegionDefect::TooFewVertices(vertices.len())));
        }

        if let Some(index) = vertices.iter().position(|vertex| !vertex.is_valid()) {
            return Err(malformed(RegionDefect::InvalidVertex(index)));
        }

        if vertices.first() != vertices.last() {
            return Err(malformed(RegionDefect::OpenRing));
        }

        let bounding_box = BoundingBox::from_positions(&vertices)
            .ok_or_else(|| malformed(RegionDefect::TooFewVertices(0)))?;

        Ok(Self {
            name,
            vertices,
            bounding_box,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Boundary ring, closing vertex included
    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Iterate over the boundary edges as `(from, to)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Whether `position` lies inside or on the boundary
    pub fn contains(&self, position: Position) -> bool {
        geometry::point_in_region(position, self)
    }

    /// Whether the segment `from → to` touches or crosses the boundary
    pub fn is_crossed_by(&self, from: Position, to: Position) -> bool {
        geometry::segment_crosses_region(from, to, self)
    }
}

impl TryFrom<RegionDefinition> for Region {
    type Error = Error;

    fn try_from(definition: RegionDefinition) -> Result<Self> {
        Region::new(definition.name, definition.vertices)
    }
}

impl From<Region> for RegionDefinition {
    fn from(region: Region) -> Self {
        Self {
            name: region.name,
            vertices: region.vertices,
        }
    }
}
