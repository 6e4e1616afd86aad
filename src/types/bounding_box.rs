use crate::types::Position;

/// Axis-aligned bounding box in degree space
///
/// Used as a cheap pre-check before the exact polygon predicates run.
/// Bounds are inclusive.
///
/// # Limitations
///
/// **Anti-meridian handling**: Simple min/max logic is used, so a region
/// crossing the ±180° longitude line gets a box spanning nearly the whole
/// globe. Delivery areas never come close to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,   // west longitude (degrees)
    pub top: f64,    // north latitude (degrees)
    pub right: f64,  // east longitude (degrees)
    pub bottom: f64, // south latitude (degrees)
}

impl BoundingBox {
    /// Create a bounding box from a slice of positions
    ///
    /// Returns `None` if the slice is empty.
    pub fn from_positions(positions: &[Position]) -> Option<Self> {
        let (first, rest) = positions.split_first()?;

        let mut bbox = Self::from(*first);
        for &position in rest {
            bbox.extend(position);
        }
        Some(bbox)
    }

    /// Bounding box of the segment between two positions
    pub fn from_segment(a: Position, b: Position) -> Self {
        let mut bbox = Self::from(a);
        bbox.extend(b);
        bbox
    }

    /// Extend bounding box to include a position
    ///
    /// Grows the bounding box if necessary to encompass the given position.
    /// If the position is already inside the bbox, no change is made.
    pub fn extend(&mut self, position: Position) {
        self.left = self.left.min(position.lng);
        self.right = self.right.max(position.lng);
        self.top = self.top.max(position.lat);
        self.bottom = self.bottom.min(position.lat);
    }

    /// Whether the position lies inside or on the edge of the box
    pub fn contains(&self, position: Position) -> bool {
        (self.left..=self.right).contains(&position.lng)
            && (self.bottom..=self.top).contains(&position.lat)
    }

    /// Whether the two boxes share at least one point
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.bottom <= other.top
            && other.bottom <= self.top
    }
}

impl From<Position> for BoundingBox {
    fn from(position: Position) -> Self {
        Self {
            left: position.lng,
            top: position.lat,
            right: position.lng,
            bottom: position.lat,
        }
    }
}
