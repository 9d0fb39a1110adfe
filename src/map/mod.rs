//! Hex tile grid: coordinates, tiles and connectivity

pub mod hex;
pub mod tile;
pub mod tiles_map;

pub use hex::{TileCoord, TileDirection};
pub use tile::{ResourceDeposit, Tile, Yields};
pub use tiles_map::{AreaKind, PassableArea, TilesMap};
