//! Terrain classification enums

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Climate {
    Tropical,
    Savanna,
    Desert,
    #[default]
    Temperate,
    Tundra,
    Arctic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandForm {
    #[default]
    Plains,
    Hills,
    Mountains,
}

/// Water coverage of a tile; `None` means dry land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeaLevel {
    None,
    Shallow,
    #[default]
    Deep,
}

impl SeaLevel {
    pub fn is_water(self) -> bool {
        self != SeaLevel::None
    }
}
