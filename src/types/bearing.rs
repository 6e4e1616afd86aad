use crate::error::{Error, Result};

/// Angular separation between neighbouring compass bearings (degrees)
pub const BEARING_INCREMENT: f64 = 22.5;

/// Wire value of the "no movement" angle
///
/// Accepted by the next-position query, never produced by the path search.
pub const HOVER_ANGLE: f64 = 999.0;

/// One of the sixteen compass directions a drone can fly in
///
/// Angles are measured from east, increasing counter-clockwise, so
/// `North` is 90° and `South` is 270°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Bearing {
    East,
    EastNorthEast,
    NorthEast,
    NorthNorthEast,
    North,
    NorthNorthWest,
    NorthWest,
    WestNorthWest,
    West,
    WestSouthWest,
    SouthWest,
    SouthSouthWest,
    South,
    SouthSouthEast,
    SouthEast,
    EastSouthEast,
}

impl Bearing {
    /// All bearings in ascending angle order
    ///
    /// The path search expands successors in exactly this order, which makes
    /// its tie-breaking deterministic.
    pub const ALL: [Bearing; 16] = [
        Bearing::East,
        Bearing::EastNorthEast,
        Bearing::NorthEast,
        Bearing::NorthNorthEast,
        Bearing::North,
        Bearing::NorthNorthWest,
        Bearing::NorthWest,
        Bearing::WestNorthWest,
        Bearing::West,
        Bearing::WestSouthWest,
        Bearing::SouthWest,
        Bearing::SouthSouthWest,
        Bearing::South,
        Bearing::SouthSouthEast,
        Bearing::SouthEast,
        Bearing::EastSouthEast,
    ];

    /// Position of this bearing in [`Bearing::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn degrees(self) -> f64 {
        self.index() as f64 * BEARING_INCREMENT
    }

    pub fn radians(self) -> f64 {
        self.degrees().to_radians()
    }

    /// Parse an exact multiple of 22.5° in `[0, 360)`
    pub fn from_degrees(angle: f64) -> Option<Self> {
        if !(0.0..360.0).contains(&angle) {
            return None;
        }

        let steps = angle / BEARING_INCREMENT;
        if steps.fract() != 0.0 {
            return None;
        }

        Self::ALL.get(steps as usize).copied()
    }

    /// The bearing pointing the other way
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 8) % 16]
    }

    /// Unit direction vector as `(Δlng, Δlat)`
    ///
    /// Cardinal bearings are exact so that axis-aligned moves never drift.
    pub fn unit_vector(self) -> (f64, f64) {
        match self {
            Bearing::East => (1.0, 0.0),
            Bearing::North => (0.0, 1.0),
            Bearing::West => (-1.0, 0.0),
            Bearing::South => (0.0, -1.0),
            _ => {
                let (sin, cos) = self.radians().sin_cos();
                (cos, sin)
            }
        }
    }
}

/// A caller-requested movement: fly along a bearing or hover in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Fly(Bearing),
    Hover,
}

impl Move {
    /// Validate an angle from the caller-facing API
    ///
    /// Accepts multiples of 22.5° in `[0, 360)` and [`HOVER_ANGLE`]. Anything
    /// else, including negative angles, is `InvalidAngle`.
    pub fn from_angle(angle: f64) -> Result<Self> {
        if angle == HOVER_ANGLE {
            return Ok(Move::Hover);
        }

        Bearing::from_degrees(angle)
            .map(Move::Fly)
            .ok_or(Error::InvalidAngle { angle })
    }
}
