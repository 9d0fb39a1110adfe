//! Hex coordinates in odd-row offset layout
//!
//! Tiles are stored by `(x, y)` with every odd row shifted half a tile to the
//! right. Distances are computed through axial coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset hex coordinate; identity of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to axial (q, r) coordinates
    pub fn to_axial(&self) -> (i32, i32) {
        let q = self.x - (self.y - (self.y & 1)) / 2;
        (q, self.y)
    }

    /// Distance in hex steps
    pub fn distance(&self, other: &TileCoord) -> i32 {
        let (q1, r1) = self.to_axial();
        let (q2, r2) = other.to_axial();
        let dq = q2 - q1;
        let dr = r2 - r1;
        dq.abs().max(dr.abs()).max((dq + dr).abs())
    }

    /// Adjacent coordinate in a direction, without bounds checking
    pub fn neighbour(&self, direction: TileDirection) -> TileCoord {
        let odd = self.y & 1 == 1;
        let (dx, dy) = match direction {
            TileDirection::NW => (if odd { 0 } else { -1 }, -1),
            TileDirection::NE => (if odd { 1 } else { 0 }, -1),
            TileDirection::E => (1, 0),
            TileDirection::SE => (if odd { 1 } else { 0 }, 1),
            TileDirection::SW => (if odd { 0 } else { -1 }, 1),
            TileDirection::W => (-1, 0),
        };
        TileCoord::new(self.x + dx, self.y + dy)
    }

    /// All 6 adjacent coordinates, in `TileDirection::ALL` order
    pub fn neighbours(&self) -> [TileCoord; 6] {
        TileDirection::ALL.map(|d| self.neighbour(d))
    }

    /// Direction towards an adjacent coordinate
    pub fn direction_to(&self, other: &TileCoord) -> Option<TileDirection> {
        TileDirection::ALL
            .into_iter()
            .find(|d| self.neighbour(*d) == *other)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Edge of a hex tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileDirection {
    NW,
    NE,
    E,
    SE,
    SW,
    W,
}

impl TileDirection {
    pub const ALL: [TileDirection; 6] = [
        TileDirection::NW,
        TileDirection::NE,
        TileDirection::E,
        TileDirection::SE,
        TileDirection::SW,
        TileDirection::W,
    ];

    pub fn opposite(self) -> TileDirection {
        match self {
            TileDirection::NW => TileDirection::SE,
            TileDirection::NE => TileDirection::SW,
            TileDirection::E => TileDirection::W,
            TileDirection::SE => TileDirection::NW,
            TileDirection::SW => TileDirection::NE,
            TileDirection::W => TileDirection::E,
        }
    }
}
