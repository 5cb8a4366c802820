//! Coordinate strings attached to findings, e.g. `X:10, Y:64, Z:-5`.

use std::fmt::{self, Display};

/// Marker used when a block entity position cannot be resolved.
pub const NO_COORDS: &str = "N/A";

/// Marker used when an entity has no usable `Pos`.
pub const NO_POS: &str = "N/A_Pos";

/// X/Y/Z components of a position string; empty when unknown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coords {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Coords {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.z.is_empty()
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{}, Y:{}, Z:{}", self.x, self.y, self.z)
    }
}

/// Parses `X:.., Y:.., Z:..` into its components.
///
/// Never fails: `N/A` markers, empty input and malformed parts leave the
/// affected components empty.
pub fn parse_coords(coord_str: &str) -> Coords {
    let mut coords = Coords::default();
    if coord_str.eq_ignore_ascii_case(NO_COORDS) || coord_str.eq_ignore_ascii_case(NO_POS) {
        return coords;
    }
    for part in coord_str.split(',') {
        let mut pieces = part.split(':');
        let (Some(key), Some(value), None) = (pieces.next(), pieces.next(), pieces.next()) else {
            continue;
        };
        let value = value.trim().to_owned();
        match key.trim() {
            "X" => coords.x = value,
            "Y" => coords.y = value,
            "Z" => coords.z = value,
            _ => {}
        }
    }
    coords
}
