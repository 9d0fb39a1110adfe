//! Natural resource placement
//!
//! One pass over the map. Each tile is considered with probability
//! `abundance`; a considered tile gets a uniformly chosen natural resource if
//! the terrain allows it. There is no retry and no spacing rule, so clusters
//! and empty stretches are both normal.

use serde::Serialize;

use crate::core::error::{HexforgeError, Result};
use crate::core::random::GameRng;
use crate::data::{Catalog, ResourceCategory, Richness};
use crate::map::{ResourceDeposit, TilesMap};
use crate::mapgen::eligibility::resource_richness;

/// Outcome of a placement pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    /// Tiles that passed the abundance roll
    pub considered: usize,
    pub placed: usize,
    /// Considered tiles where the drawn resource could not occur
    pub infeasible: usize,
}

/// Base (mean, standard deviation) of deposit quantity per tier
fn quantity_parameters(richness: Richness) -> (f64, f64) {
    match richness {
        Richness::VeryPoor => (1.0, 1.0),
        Richness::Poor => (2.0, 2.0),
        Richness::Rich => (3.0, 2.0),
        Richness::VeryRich => (4.0, 3.0),
    }
}

/// Sample a deposit quantity; never below 1
pub fn sample_quantity(tier: Richness, richness: f64, rng: &mut GameRng) -> u32 {
    let (mean, stddev) = quantity_parameters(tier);
    let value = rng.normal(mean * richness, stddev * richness);
    value.max(1.0).ceil() as u32
}

/// Scatter natural resource deposits over the map
///
/// `abundance` is the per-tile probability in `[0, 1]`; `richness` scales
/// quantities and must be non-negative. Existing deposits on chosen tiles are
/// overwritten.
pub fn place_resources(
    map: &mut TilesMap,
    catalog: &Catalog,
    abundance: f64,
    richness: f64,
    rng: &mut GameRng,
) -> Result<PlacementReport> {
    if !(0.0..=1.0).contains(&abundance) {
        return Err(HexforgeError::invalid(
            "abundance",
            format!("{abundance} is outside [0, 1]"),
        ));
    }
    if !richness.is_finite() || richness < 0.0 {
        return Err(HexforgeError::invalid(
            "richness",
            format!("{richness} must be a non-negative number"),
        ));
    }

    let natural = catalog.resources_in(ResourceCategory::Natural);
    if natural.is_empty() {
        tracing::warn!("catalog has no natural resources, nothing to place");
    }

    let mut report = PlacementReport::default();

    for tile in map.tiles_mut() {
        if rng.unit() >= abundance {
            continue;
        }
        report.considered += 1;

        if natural.is_empty() {
            report.infeasible += 1;
            continue;
        }
        let resource = natural[rng.index(natural.len())];

        let Some(tier) = resource_richness(tile, Some(resource)) else {
            report.infeasible += 1;
            continue;
        };

        tile.resource = Some(ResourceDeposit {
            resource: resource.id,
            tile: tile.coord,
            quantity: sample_quantity(tier, richness, rng),
            difficulty: 0,
        });
        report.placed += 1;
    }

    tracing::debug!(
        considered = report.considered,
        placed = report.placed,
        infeasible = report.infeasible,
        "resources placed"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        Climate, DepositDefinition, LandForm, ResourceDefinition, ResourceDistribution, SeaLevel,
    };
    use crate::map::TileCoord;

    fn dry_map(width: i32, height: i32) -> TilesMap {
        let mut map = TilesMap::new(width, height);
        for tile in map.tiles_mut() {
            tile.sea_level = SeaLevel::None;
        }
        map
    }

    fn plains_catalog(tier: Richness) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_resource(
            ResourceDefinition::new("wheat")
                .with_category(ResourceCategory::Natural)
                .with_deposit(
                    DepositDefinition::new(tier).with_distribution(
                        ResourceDistribution::default()
                            .with_sea_levels(&[SeaLevel::None])
                            .with_land_forms(&[LandForm::Plains])
                            .with_climates(&[Climate::Temperate]),
                    ),
                ),
        )
        .unwrap();
        catalog
    }

    #[test]
    fn test_zero_abundance_places_nothing() {
        let mut map = dry_map(10, 10);
        let mut rng = GameRng::new(1);
        let report = place_resources(&mut map, &plains_catalog(Richness::Rich), 0.0, 1.0, &mut rng).unwrap();
        assert_eq!(report, PlacementReport::default());
        assert!(map.all_resources().is_empty());
    }

    #[test]
    fn test_full_abundance_considers_every_tile() {
        let mut map = dry_map(10, 10);
        let mut rng = GameRng::new(2);
        let report = place_resources(&mut map, &plains_catalog(Richness::Rich), 1.0, 1.0, &mut rng).unwrap();
        assert_eq!(report.considered, 100);
        assert_eq!(report.placed, 100);
        for deposit in map.all_resources() {
            assert!(deposit.quantity >= 1);
            assert_eq!(deposit.difficulty, 0);
            assert_eq!(map.get(deposit.tile).unwrap().coord, deposit.tile);
        }
    }

    #[test]
    fn test_infeasible_tiles_are_skipped() {
        let mut map = dry_map(6, 6);
        for tile in map.tiles_mut() {
            if tile.coord.y < 3 {
                tile.climate = Climate::Desert;
            }
        }
        let mut rng = GameRng::new(3);
        let report = place_resources(&mut map, &plains_catalog(Richness::Poor), 1.0, 1.0, &mut rng).unwrap();
        assert_eq!(report.placed, 18);
        assert_eq!(report.infeasible, 18);
        assert!(map.get(TileCoord::new(0, 0)).unwrap().resource.is_none());
        assert!(map.get(TileCoord::new(0, 5)).unwrap().resource.is_some());
    }

    #[test]
    fn test_zero_richness_still_yields_one() {
        let mut rng = GameRng::new(4);
        for tier in [Richness::VeryPoor, Richness::Poor, Richness::Rich, Richness::VeryRich] {
            for _ in 0..50 {
                assert_eq!(sample_quantity(tier, 0.0, &mut rng), 1);
                assert!(sample_quantity(tier, 1e-9, &mut rng) >= 1);
            }
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut map = dry_map(4, 4);
        let catalog = plains_catalog(Richness::Rich);
        let mut rng = GameRng::new(5);
        assert!(place_resources(&mut map, &catalog, 1.5, 1.0, &mut rng).is_err());
        assert!(place_resources(&mut map, &catalog, f64::NAN, 1.0, &mut rng).is_err());
        assert!(place_resources(&mut map, &catalog, 0.5, -1.0, &mut rng).is_err());
    }

    #[test]
    fn test_empty_catalog_places_nothing() {
        let mut map = dry_map(5, 5);
        let mut rng = GameRng::new(6);
        let report = place_resources(&mut map, &Catalog::new(), 1.0, 1.0, &mut rng).unwrap();
        assert_eq!(report.considered, 25);
        assert_eq!(report.placed, 0);
    }

    #[test]
    fn test_same_seed_same_deposits() {
        let catalog = plains_catalog(Richness::VeryRich);
        let run = |seed| {
            let mut map = dry_map(12, 12);
            let mut rng = GameRng::new(seed);
            place_resources(&mut map, &catalog, 0.4, 2.0, &mut rng).unwrap();
            map.all_resources().into_iter().copied().collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }
}
