//! Static game data consumed by the generators and the AI

pub mod catalog;
pub mod terrain;

pub use catalog::{
    Catalog, DepositDefinition, ImprovementId, ResourceCategory, ResourceDefinition,
    ResourceDistribution, ResourceId, Richness, TileImprovementDefinition, UnitDefinition, UnitId,
    UnitTrait,
};
pub use terrain::{Climate, LandForm, SeaLevel};
