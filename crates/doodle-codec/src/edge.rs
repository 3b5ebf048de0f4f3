use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BITS_PER_UNIT, CodecError, PackedPixels};

/// Side length of a square doodle, in cells.
///
/// One value is fixed per deployment and threaded through the codec, the
/// store and the renderer. It must be a positive multiple of 4 so that
/// `edge²` splits evenly into 16-pixel groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(usize);

impl Edge {
    /// 32x32, packed into 64 units.
    pub const DEFAULT: Edge = Edge(32);

    pub fn new(edge: usize) -> Result<Self, CodecError> {
        if edge == 0 || edge % 4 != 0 {
            return Err(CodecError::InvalidEdge(edge));
        }
        Ok(Self(edge))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of pixels in an unpacked drawing.
    #[inline]
    pub fn pixel_count(self) -> usize {
        self.0 * self.0
    }

    /// Number of code units in a packed drawing.
    #[inline]
    pub fn packed_len(self) -> usize {
        self.pixel_count() / BITS_PER_UNIT
    }

    pub fn check_packed(self, packed: &PackedPixels) -> Result<(), CodecError> {
        if packed.len() != self.packed_len() {
            return Err(CodecError::EdgeMismatch {
                edge: self,
                unit: "packed units",
                expected: self.packed_len(),
                actual: packed.len(),
            });
        }
        Ok(())
    }

    /// Edge of a square drawing with `pixels` cells, if it is a valid one.
    pub fn from_pixel_count(pixels: usize) -> Option<Self> {
        let side = (pixels as f64).sqrt().round() as usize;
        if side * side != pixels {
            return None;
        }
        Self::new(side).ok()
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Edge {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let edge = s.trim().parse::<usize>().map_err(|_| CodecError::InvalidEdge(0))?;
        Self::new(edge)
    }
}

impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0 as u64)
    }
}

impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let edge = usize::deserialize(deserializer)?;
        Self::new(edge).map_err(serde::de::Error::custom)
    }
}
