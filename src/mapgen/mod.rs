//! World generation: terrain, resources and starting locations

pub mod eligibility;
pub mod resources;
pub mod starting;
pub mod terrain;

use serde::Serialize;

use crate::core::config::WorldGenConfig;
use crate::core::error::Result;
use crate::core::random::GameRng;
use crate::data::Catalog;
use crate::map::{TileCoord, TilesMap};

pub use eligibility::{
    are_wetlands_possible, is_forestable, is_improvement_possible, is_resource_possible,
    is_road_possible, resource_richness,
};
pub use resources::{place_resources, PlacementReport};
pub use starting::{generate_starting_locations, min_location_distance};
pub use terrain::generate_terrain;

/// A freshly generated world
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedWorld {
    pub seed: u64,
    pub map: TilesMap,
    pub starting_locations: Vec<TileCoord>,
    pub placement: PlacementReport,
}

/// Run the whole generation pipeline for a configuration
///
/// Each stage draws from its own stream derived from the seed, so the same
/// configuration always produces the same world.
pub fn generate_world(config: &WorldGenConfig, catalog: &Catalog) -> Result<GeneratedWorld> {
    config.validate()?;

    let mut rng = GameRng::new(config.seed);
    let mut terrain_rng = rng.derive();
    let mut resource_rng = rng.derive();
    let mut start_rng = rng.derive();

    tracing::info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        "generating world"
    );

    let mut map = TilesMap::new(config.width, config.height);
    generate_terrain(&mut map, config, &mut terrain_rng);
    tracing::info!(areas = map.areas().len(), "terrain ready");

    let placement = place_resources(
        &mut map,
        catalog,
        config.abundance,
        config.richness,
        &mut resource_rng,
    )?;
    map.precompute();
    tracing::info!(deposits = placement.placed, "resources ready");

    let starting_locations = generate_starting_locations(&mut map, config.players, &mut start_rng);
    tracing::info!(
        locations = starting_locations.len(),
        requested = config.players,
        "starting locations ready"
    );

    Ok(GeneratedWorld {
        seed: config.seed,
        map,
        starting_locations,
        placement,
    })
}
