//! Tile grid with connectivity analysis
//!
//! Owns every tile of the world and derives the per-tile caches the
//! generators and the AI depend on: coast flags, yields, sweet spot values
//! and passable areas.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::config::{COAST_SWEET_SPOT_MULTIPLIER, SWEET_SPOT_RADIUS};
use crate::core::types::{AreaId, PlayerId};
use crate::data::LandForm;
use crate::map::hex::TileCoord;
use crate::map::tile::{ResourceDeposit, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaKind {
    Land,
    Water,
}

/// Maximal connected set of tiles a unit can traverse
///
/// Land connects to land and water to water; mountains belong to no area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassableArea {
    pub id: AreaId,
    pub kind: AreaKind,
    /// Number of tiles in the area
    pub size: u32,
    pub player: Option<PlayerId>,
}

/// Rectangular hex map stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    areas: Vec<PassableArea>,
}

impl TilesMap {
    /// Create a map filled with deep temperate ocean
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(TileCoord::new(x, y)));
            }
        }
        Self {
            width,
            height,
            tiles,
            areas: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    #[inline]
    fn index(&self, coord: TileCoord) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.y * self.width + coord.x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, coord: TileCoord) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        self.index(coord).map(move |i| &mut self.tiles[i])
    }

    /// Iterate all tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles.iter().map(|t| t.coord)
    }

    /// In-bounds neighbours of a tile
    pub fn neighbours(&self, coord: TileCoord) -> impl Iterator<Item = TileCoord> + '_ {
        coord
            .neighbours()
            .into_iter()
            .filter(move |n| self.contains(*n))
    }

    /// Every tile within `range` hex steps of `center`, the center included
    pub fn tiles_in_range(&self, center: TileCoord, range: i32) -> Vec<TileCoord> {
        if range < 0 || !self.contains(center) {
            return Vec::new();
        }
        let mut result = Vec::new();
        // A hex step moves at most one column, so the box bounds the disk
        for y in (center.y - range).max(0)..=(center.y + range).min(self.height - 1) {
            for x in (center.x - range).max(0)..=(center.x + range).min(self.width - 1) {
                let coord = TileCoord::new(x, y);
                if center.distance(&coord) <= range {
                    result.push(coord);
                }
            }
        }
        result
    }

    // === PASSABLE AREAS ===

    pub fn area(&self, id: AreaId) -> Option<&PassableArea> {
        id.0
            .checked_sub(1)
            .and_then(|i| self.areas.get(i as usize))
    }

    pub fn areas(&self) -> &[PassableArea] {
        &self.areas
    }

    /// Area a tile belongs to, if any
    pub fn area_of_tile(&self, coord: TileCoord) -> Option<&PassableArea> {
        self.get(coord)
            .and_then(|t| t.passable_area)
            .and_then(|id| self.area(id))
    }

    /// Record the player controlling an area; returns false for unknown ids
    pub fn set_area_owner(&mut self, id: AreaId, player: Option<PlayerId>) -> bool {
        match id.0.checked_sub(1).and_then(|i| self.areas.get_mut(i as usize)) {
            Some(area) => {
                area.player = player;
                true
            }
            None => false,
        }
    }

    /// Total number of tiles in land areas
    pub fn total_land_area(&self) -> u32 {
        self.areas
            .iter()
            .filter(|a| a.kind == AreaKind::Land)
            .map(|a| a.size)
            .sum()
    }

    /// Recompute every derived cache: coast, yields, areas, sweet spots
    pub fn precompute(&mut self) {
        self.compute_coast();
        for tile in &mut self.tiles {
            tile.compute_yields();
        }
        self.precompute_passable_areas();
        self.compute_sweet_spots();
    }

    /// Flood-fill the map into passable areas
    ///
    /// Area ids restart from 1 on every call; previous handles are invalidated.
    pub fn precompute_passable_areas(&mut self) {
        self.areas.clear();
        let mut visited = vec![false; self.tiles.len()];

        for start in 0..self.tiles.len() {
            if visited[start] {
                continue;
            }
            if self.tiles[start].land_form == LandForm::Mountains {
                self.tiles[start].passable_area = None;
                continue;
            }

            let id = AreaId(self.areas.len() as u32 + 1);
            let is_water = self.tiles[start].is_water();
            let mut size = 0;

            // Queue instead of recursion; continents can span thousands of tiles
            let mut queue = VecDeque::from([start]);
            visited[start] = true;

            while let Some(current) = queue.pop_front() {
                self.tiles[current].passable_area = Some(id);
                size += 1;

                let coord = self.tiles[current].coord;
                for neighbour in coord.neighbours() {
                    let Some(n) = self.index(neighbour) else {
                        continue;
                    };
                    if visited[n] {
                        continue;
                    }
                    let tile = &self.tiles[n];
                    if tile.land_form != LandForm::Mountains && tile.is_water() == is_water {
                        visited[n] = true;
                        queue.push_back(n);
                    }
                }
            }

            self.areas.push(PassableArea {
                id,
                kind: if is_water { AreaKind::Water } else { AreaKind::Land },
                size,
                player: None,
            });
        }

        tracing::debug!(
            areas = self.areas.len(),
            land_tiles = self.total_land_area(),
            "passable areas computed"
        );
    }

    fn compute_coast(&mut self) {
        let coast: Vec<bool> = self
            .tiles
            .iter()
            .map(|tile| {
                tile.is_land()
                    && self
                        .neighbours(tile.coord)
                        .any(|n| self.get(n).map_or(false, |t| t.is_water()))
            })
            .collect();
        for (tile, is_coast) in self.tiles.iter_mut().zip(coast) {
            tile.coast = is_coast;
        }
    }

    /// Sum of yields around each city-able tile; requires fresh yields
    fn compute_sweet_spots(&mut self) {
        let values: Vec<f32> = self
            .tiles
            .iter()
            .map(|tile| {
                if tile.area_of.is_some()
                    || tile.land_form == LandForm::Mountains
                    || tile.is_water()
                {
                    return 0.0;
                }
                let total: i32 = self
                    .tiles_in_range(tile.coord, SWEET_SPOT_RADIUS)
                    .into_iter()
                    .filter_map(|c| self.get(c))
                    .map(|t| t.yields.total())
                    .sum();
                let value = total as f32;
                if tile.coast {
                    value * COAST_SWEET_SPOT_MULTIPLIER
                } else {
                    value
                }
            })
            .collect();
        for (tile, value) in self.tiles.iter_mut().zip(values) {
            tile.sweet_spot_value = value;
        }
    }

    // === TERRAIN EDITING ===

    /// Run a river along the shared edge of two adjacent tiles
    ///
    /// Returns false if the tiles are not adjacent or the edge already
    /// carries a river.
    pub fn place_river_between(&mut self, a: TileCoord, b: TileCoord) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let Some(direction) = a.direction_to(&b) else {
            return false;
        };
        if let Some(tile) = self.get_mut(a) {
            if tile.river_parts.contains(&direction) {
                return false;
            }
            tile.river_parts.push(direction);
        }
        if let Some(tile) = self.get_mut(b) {
            tile.river_parts.push(direction.opposite());
        }
        true
    }

    /// Land tiles with at least one water neighbour
    pub fn find_coastline(&self) -> Vec<TileCoord> {
        self.tiles
            .iter()
            .filter(|tile| {
                tile.is_land()
                    && self
                        .neighbours(tile.coord)
                        .any(|n| self.get(n).map_or(false, |t| t.is_water()))
            })
            .map(|tile| tile.coord)
            .collect()
    }

    /// Every deposit on the map, row-major
    pub fn all_resources(&self) -> Vec<&ResourceDeposit> {
        self.tiles.iter().filter_map(|t| t.resource.as_ref()).collect()
    }
}
