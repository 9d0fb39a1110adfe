//! AI bookkeeping: who claims which tiles and areas, and what the roster can do

pub mod areas_registry;
pub mod assignment;
pub mod features;
pub mod tiles_registry;

pub use areas_registry::AiAreasRegistry;
pub use assignment::{Assignment, ClaimIndex};
pub use features::{AiFeatures, Capability};
pub use tiles_registry::AiTilesRegistry;
