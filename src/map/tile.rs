//! A single hex tile and its deposits

use serde::{Deserialize, Serialize};

use crate::core::types::{AreaId, CityId, PlayerId};
use crate::data::{Climate, ImprovementId, LandForm, ResourceId, SeaLevel};
use crate::map::hex::{TileCoord, TileDirection};

/// Food and production produced by a tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yields {
    pub food: i32,
    pub production: i32,
}

impl Yields {
    pub fn new(food: i32, production: i32) -> Self {
        Self { food, production }
    }

    pub fn total(&self) -> i32 {
        self.food + self.production
    }
}

/// A natural resource deposit sitting on one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeposit {
    pub resource: ResourceId,
    pub tile: TileCoord,
    /// Remaining amount, always >= 1 when placed
    pub quantity: u32,
    pub difficulty: u32,
}

/// A hex tile on the world map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub coord: TileCoord,
    pub climate: Climate,
    pub land_form: LandForm,
    pub sea_level: SeaLevel,
    /// Edges with a river running along them
    pub river_parts: Vec<TileDirection>,
    pub forest: bool,
    pub wetlands: bool,
    /// Land tile touching water; derived by `TilesMap::precompute`
    pub coast: bool,
    pub resource: Option<ResourceDeposit>,
    pub improvement: Option<ImprovementId>,
    pub city: Option<CityId>,
    /// Player controlling the region this tile belongs to
    pub area_of: Option<PlayerId>,
    pub yields: Yields,
    /// Desirability for a city; derived by `TilesMap::precompute`
    pub sweet_spot_value: f32,
    /// Connected passable region; derived by `TilesMap::precompute_passable_areas`
    pub passable_area: Option<AreaId>,
}

impl Tile {
    pub fn new(coord: TileCoord) -> Self {
        Self {
            coord,
            climate: Climate::default(),
            land_form: LandForm::default(),
            sea_level: SeaLevel::default(),
            river_parts: Vec::new(),
            forest: false,
            wetlands: false,
            coast: false,
            resource: None,
            improvement: None,
            city: None,
            area_of: None,
            yields: Yields::default(),
            sweet_spot_value: 0.0,
            passable_area: None,
        }
    }

    pub fn with_climate(mut self, climate: Climate) -> Self {
        self.climate = climate;
        self
    }

    pub fn with_land_form(mut self, land_form: LandForm) -> Self {
        self.land_form = land_form;
        self
    }

    pub fn with_sea_level(mut self, sea_level: SeaLevel) -> Self {
        self.sea_level = sea_level;
        self
    }

    pub fn is_water(&self) -> bool {
        self.sea_level.is_water()
    }

    pub fn is_land(&self) -> bool {
        !self.is_water()
    }

    pub fn has_river(&self) -> bool {
        !self.river_parts.is_empty()
    }

    /// Recompute yields from terrain, vegetation and rivers
    pub fn compute_yields(&mut self) {
        self.yields = match self.sea_level {
            SeaLevel::Deep => Yields::default(),
            SeaLevel::Shallow => Yields::new(1, 0),
            // Mountains produce nothing and cannot be worked
            SeaLevel::None if self.land_form == LandForm::Mountains => Yields::default(),
            SeaLevel::None => {
                let (mut food, mut production) = match self.climate {
                    Climate::Temperate => (2, 1),
                    Climate::Savanna => (1, 1),
                    Climate::Tropical => (1, 0),
                    Climate::Tundra => (0, 1),
                    Climate::Desert | Climate::Arctic => (0, 0),
                };
                if self.land_form == LandForm::Hills {
                    food -= 1;
                }
                if self.forest {
                    food -= 1;
                    production += 1;
                }
                if self.wetlands {
                    food -= 1;
                    production -= 1;
                }
                if self.has_river() {
                    food += if self.climate == Climate::Desert { 3 } else { 1 };
                }
                Yields::new(food.max(0), production.max(0))
            }
        };
    }
}
