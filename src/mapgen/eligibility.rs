//! Tile eligibility rules
//!
//! Pure predicates answering whether something can exist on, or be built on,
//! a given tile. Used by the terrain and resource generators and by the AI
//! when it looks for work.

use crate::data::{
    Catalog, Climate, LandForm, ResourceDefinition, Richness, SeaLevel, TileImprovementDefinition,
};
use crate::map::Tile;
use crate::player::Knowledge;

/// Dry, non-mountain tile in a climate that grows trees
pub fn is_forestable(tile: &Tile) -> bool {
    tile.sea_level == SeaLevel::None
        && tile.land_form != LandForm::Mountains
        && matches!(
            tile.climate,
            Climate::Temperate | Climate::Tropical | Climate::Tundra
        )
}

/// Dry river plains in a temperate or tropical climate
pub fn are_wetlands_possible(tile: &Tile) -> bool {
    tile.sea_level == SeaLevel::None
        && tile.land_form == LandForm::Plains
        && tile.has_river()
        && matches!(tile.climate, Climate::Temperate | Climate::Tropical)
}

/// Whether `knowledge`'s player may build `improvement` on the tile
///
/// `None` asks whether the current improvement may be cleared.
pub fn is_improvement_possible(
    knowledge: &Knowledge,
    tile: &Tile,
    improvement: Option<&TileImprovementDefinition>,
    catalog: &Catalog,
) -> bool {
    if tile.city.is_some() {
        return false;
    }
    let Some(improvement) = improvement else {
        return true;
    };
    if tile.improvement == Some(improvement.id) {
        return false;
    }
    if tile.area_of.map_or(false, |owner| owner != knowledge.player()) {
        return false;
    }
    if !knowledge.has_discovered_improvement(improvement.id) {
        return false;
    }

    if improvement.require_resource {
        // Only the improvement the deposit asks for can harvest it
        return tile
            .resource
            .and_then(|deposit| catalog.resource(deposit.resource))
            .and_then(|resource| resource.required_improvement())
            == Some(improvement.id);
    }

    let climate_ok = improvement
        .climates
        .as_ref()
        .map_or(true, |climates| climates.contains(&tile.climate));
    let land_form_ok = improvement
        .land_forms
        .as_ref()
        .map_or(true, |forms| forms.contains(&tile.land_form));
    let river_ok = improvement.river.map_or(true, |river| river == tile.has_river());
    let forest_ok = improvement.forest.map_or(true, |forest| forest == tile.forest);

    climate_ok && land_form_ok && river_ok && forest_ok
}

pub fn is_road_possible(tile: &Tile) -> bool {
    tile.sea_level == SeaLevel::None && tile.land_form != LandForm::Mountains
}

/// Whether a resource can naturally occur on the tile
pub fn is_resource_possible(tile: &Tile, resource: Option<&ResourceDefinition>) -> bool {
    let Some(resource) = resource else {
        return false;
    };
    if tile.land_form == LandForm::Mountains {
        return false;
    }
    let Some(distribution) = resource.distribution() else {
        return false;
    };

    let sea_ok = distribution
        .sea_levels
        .as_ref()
        .map_or(true, |levels| levels.contains(&tile.sea_level));
    let land_form_ok = distribution
        .land_forms
        .as_ref()
        .map_or(true, |forms| forms.contains(&tile.land_form));
    let climate_ok = distribution
        .climates
        .as_ref()
        .map_or(true, |climates| climates.contains(&tile.climate));
    let forest_ok = distribution.forest.map_or(true, |forest| forest == tile.forest);

    sea_ok && land_form_ok && climate_ok && forest_ok
}

/// Richness tier of a resource on a tile, `None` if it cannot occur there
pub fn resource_richness(tile: &Tile, resource: Option<&ResourceDefinition>) -> Option<Richness> {
    if !is_resource_possible(tile, resource) {
        return None;
    }
    resource
        .and_then(|r| r.deposit.as_ref())
        .map(|deposit| deposit.richness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CityId, PlayerId};
    use crate::data::{DepositDefinition, ImprovementId, ResourceDistribution, ResourceId};
    use crate::map::{ResourceDeposit, TileCoord, TileDirection};

    fn plains(climate: Climate) -> Tile {
        Tile::new(TileCoord::new(2, 2))
            .with_sea_level(SeaLevel::None)
            .with_climate(climate)
    }

    fn wheat() -> ResourceDefinition {
        ResourceDefinition::new("wheat").with_deposit(
            DepositDefinition::new(Richness::Rich).with_distribution(
                ResourceDistribution::default()
                    .with_sea_levels(&[SeaLevel::None])
                    .with_land_forms(&[LandForm::Plains])
                    .with_climates(&[Climate::Temperate]),
            ),
        )
    }

    #[test]
    fn test_forestable() {
        assert!(is_forestable(&plains(Climate::Temperate)));
        assert!(is_forestable(&plains(Climate::Tundra)));
        assert!(!is_forestable(&plains(Climate::Desert)));
        assert!(!is_forestable(
            &plains(Climate::Temperate).with_land_form(LandForm::Mountains)
        ));
        assert!(!is_forestable(
            &plains(Climate::Temperate).with_sea_level(SeaLevel::Shallow)
        ));
    }

    #[test]
    fn test_wetlands_need_river_plains() {
        let mut tile = plains(Climate::Tropical);
        assert!(!are_wetlands_possible(&tile));
        tile.river_parts.push(TileDirection::SE);
        assert!(are_wetlands_possible(&tile));

        let hills = tile.clone().with_land_form(LandForm::Hills);
        assert!(!are_wetlands_possible(&hills));
        let tundra = tile.with_climate(Climate::Tundra);
        assert!(!are_wetlands_possible(&tundra));
    }

    #[test]
    fn test_road_possible() {
        assert!(is_road_possible(&plains(Climate::Arctic)));
        assert!(is_road_possible(&plains(Climate::Arctic).with_land_form(LandForm::Hills)));
        assert!(!is_road_possible(
            &plains(Climate::Arctic).with_land_form(LandForm::Mountains)
        ));
        assert!(!is_road_possible(&Tile::new(TileCoord::new(0, 0))));
    }

    #[test]
    fn test_resource_possible() {
        let wheat = wheat();
        assert!(is_resource_possible(&plains(Climate::Temperate), Some(&wheat)));
        assert!(!is_resource_possible(&plains(Climate::Desert), Some(&wheat)));
        assert!(!is_resource_possible(&plains(Climate::Temperate), None));
        assert_eq!(
            resource_richness(&plains(Climate::Temperate), Some(&wheat)),
            Some(Richness::Rich)
        );
        assert_eq!(resource_richness(&plains(Climate::Desert), Some(&wheat)), None);
    }

    #[test]
    fn test_resource_without_distribution_never_occurs() {
        let iron = ResourceDefinition::new("iron").with_deposit(DepositDefinition::new(Richness::Poor));
        assert!(!is_resource_possible(&plains(Climate::Temperate), Some(&iron)));
        let bare = ResourceDefinition::new("nothing");
        assert!(!is_resource_possible(&plains(Climate::Temperate), Some(&bare)));
    }

    #[test]
    fn test_unconstrained_distribution_excludes_mountains_only() {
        let anywhere = ResourceDefinition::new("stone").with_deposit(
            DepositDefinition::new(Richness::Poor).with_distribution(ResourceDistribution::default()),
        );
        assert!(is_resource_possible(&Tile::new(TileCoord::new(0, 0)), Some(&anywhere)));
        assert!(!is_resource_possible(
            &plains(Climate::Temperate).with_land_form(LandForm::Mountains),
            Some(&anywhere)
        ));
    }

    #[test]
    fn test_forest_constraint_on_resource() {
        let furs = ResourceDefinition::new("furs").with_deposit(
            DepositDefinition::new(Richness::Poor)
                .with_distribution(ResourceDistribution::default().with_forest(true)),
        );
        let mut tile = plains(Climate::Tundra);
        assert!(!is_resource_possible(&tile, Some(&furs)));
        tile.forest = true;
        assert!(is_resource_possible(&tile, Some(&furs)));
    }

    fn improvement_setup() -> (Catalog, Knowledge, ImprovementId, ImprovementId) {
        let mut catalog = Catalog::new();
        let farm = catalog
            .add_improvement(
                TileImprovementDefinition::new("farm")
                    .with_land_forms(&[LandForm::Plains])
                    .with_forest(false),
            )
            .unwrap();
        let mine = catalog
            .add_improvement(TileImprovementDefinition::new("mine").requiring_resource())
            .unwrap();
        let mut knowledge = Knowledge::new(PlayerId(1));
        knowledge.discover_improvement(farm);
        knowledge.discover_improvement(mine);
        (catalog, knowledge, farm, mine)
    }

    #[test]
    fn test_improvement_terrain_constraints() {
        let (catalog, knowledge, farm, _) = improvement_setup();
        let farm = catalog.improvement(farm);

        let mut tile = plains(Climate::Temperate);
        assert!(is_improvement_possible(&knowledge, &tile, farm, &catalog));

        tile.forest = true;
        assert!(!is_improvement_possible(&knowledge, &tile, farm, &catalog));

        let hills = plains(Climate::Temperate).with_land_form(LandForm::Hills);
        assert!(!is_improvement_possible(&knowledge, &hills, farm, &catalog));
    }

    #[test]
    fn test_improvement_blocked_by_city_owner_or_duplicate() {
        let (catalog, knowledge, farm_id, _) = improvement_setup();
        let farm = catalog.improvement(farm_id);

        let mut city = plains(Climate::Temperate);
        city.city = Some(CityId(1));
        assert!(!is_improvement_possible(&knowledge, &city, farm, &catalog));
        assert!(!is_improvement_possible(&knowledge, &city, None, &catalog));

        let mut foreign = plains(Climate::Temperate);
        foreign.area_of = Some(PlayerId(2));
        assert!(!is_improvement_possible(&knowledge, &foreign, farm, &catalog));
        foreign.area_of = Some(PlayerId(1));
        assert!(is_improvement_possible(&knowledge, &foreign, farm, &catalog));

        let mut farmed = plains(Climate::Temperate);
        farmed.improvement = Some(farm_id);
        assert!(!is_improvement_possible(&knowledge, &farmed, farm, &catalog));
        assert!(is_improvement_possible(&knowledge, &farmed, None, &catalog));
    }

    #[test]
    fn test_improvement_requires_discovery() {
        let (catalog, _, farm, _) = improvement_setup();
        let ignorant = Knowledge::new(PlayerId(1));
        assert!(!is_improvement_possible(
            &ignorant,
            &plains(Climate::Temperate),
            catalog.improvement(farm),
            &catalog
        ));
    }

    #[test]
    fn test_resource_improvement_matches_deposit() {
        let (mut catalog, knowledge, farm, mine) = improvement_setup();
        let iron = catalog
            .add_resource(
                ResourceDefinition::new("iron")
                    .with_deposit(DepositDefinition::new(Richness::Poor).with_required_improvement(mine)),
            )
            .unwrap();
        let wheat = catalog
            .add_resource(
                ResourceDefinition::new("wheat")
                    .with_deposit(DepositDefinition::new(Richness::Rich).with_required_improvement(farm)),
            )
            .unwrap();
        let deposit = |resource: ResourceId| ResourceDeposit {
            resource,
            tile: TileCoord::new(2, 2),
            quantity: 3,
            difficulty: 0,
        };

        let mut tile = plains(Climate::Temperate);
        assert!(!is_improvement_possible(&knowledge, &tile, catalog.improvement(mine), &catalog));

        tile.resource = Some(deposit(iron));
        assert!(is_improvement_possible(&knowledge, &tile, catalog.improvement(mine), &catalog));

        tile.resource = Some(deposit(wheat));
        assert!(!is_improvement_possible(&knowledge, &tile, catalog.improvement(mine), &catalog));
    }
}
