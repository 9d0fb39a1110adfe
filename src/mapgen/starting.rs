//! Starting location selection
//!
//! Greedy and randomized: repeatedly pick one of the best remaining candidates
//! and discard everything too close to it.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;

use crate::core::config::{
    BEST_CANDIDATES_FRACTION, MIN_LAND_AREA_FRACTION, MIN_LOCATION_DISTANCE,
    MIN_STARTING_SWEET_SPOT, MIN_WORLD_EDGE_DISTANCE,
};
use crate::core::random::GameRng;
use crate::data::LandForm;
use crate::map::{Tile, TileCoord, TilesMap};

/// Minimum distance between two starting locations on a map of `tile_count`
/// tiles; grows slowly with map size
pub fn min_location_distance(tile_count: usize) -> i32 {
    let scaled = (tile_count as f64).powf(0.3).ceil() as i32 - 3;
    scaled.max(MIN_LOCATION_DISTANCE)
}

/// Whether a tile may host a starting city
///
/// Requires passable areas to be up to date.
pub fn is_starting_candidate(map: &TilesMap, tile: &Tile) -> bool {
    let min_area = (MIN_LAND_AREA_FRACTION * map.tile_count() as f64).floor() as u32;
    let margin = MIN_WORLD_EDGE_DISTANCE;
    let Some(area) = tile.passable_area.and_then(|id| map.area(id)) else {
        return false;
    };

    area.size >= min_area
        && tile.sweet_spot_value >= MIN_STARTING_SWEET_SPOT
        && tile.is_land()
        && tile.land_form != LandForm::Mountains
        && tile.coord.x >= margin
        && tile.coord.x <= map.width() - 1 - margin
        && tile.coord.y >= margin
        && tile.coord.y <= map.height() - 1 - margin
}

/// Pick up to `count` well separated starting tiles
///
/// Recomputes passable areas but trusts the sweet spot values already on the
/// map: after editing terrain, run [`TilesMap::precompute`] before calling
/// this. Fewer than `count` tiles are returned when candidates run out.
pub fn generate_starting_locations(
    map: &mut TilesMap,
    count: usize,
    rng: &mut GameRng,
) -> Vec<TileCoord> {
    map.precompute_passable_areas();

    let min_distance = min_location_distance(map.tile_count());

    let view: &TilesMap = map;
    let mut candidates: Vec<(TileCoord, f32)> = view
        .tiles()
        .filter(|tile| is_starting_candidate(view, tile))
        .map(|tile| (tile.coord, tile.sweet_spot_value))
        .collect();
    // Stable sort; removals below keep the order
    candidates.sort_by_key(|(_, sweet)| Reverse(OrderedFloat(*sweet)));

    tracing::debug!(
        candidates = candidates.len(),
        min_distance,
        requested = count,
        "selecting starting locations"
    );

    let mut locations = Vec::with_capacity(count);

    while locations.len() < count && !candidates.is_empty() {
        let best = ((candidates.len() as f64 * BEST_CANDIDATES_FRACTION).ceil() as usize).max(1);
        let (pick, _) = candidates[rng.index(best)];

        enhance_location(map, pick);
        locations.push(pick);

        let nearby = map.tiles_in_range(pick, min_distance);
        candidates.retain(|(coord, _)| !nearby.contains(coord));
    }

    if locations.len() < count {
        tracing::warn!(
            found = locations.len(),
            requested = count,
            "not enough starting locations"
        );
    }

    locations
}

/// Hook for adding bonus resources around a starting location
fn enhance_location(_map: &mut TilesMap, _location: TileCoord) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Climate, SeaLevel};

    fn plains_map(width: i32, height: i32) -> TilesMap {
        let mut map = TilesMap::new(width, height);
        for tile in map.tiles_mut() {
            tile.sea_level = SeaLevel::None;
            tile.climate = Climate::Temperate;
        }
        map.precompute();
        map
    }

    #[test]
    fn test_min_location_distance() {
        assert_eq!(min_location_distance(0), MIN_LOCATION_DISTANCE);
        assert_eq!(min_location_distance(100), 4);
        // 1600^0.3 = 9.16..
        assert_eq!(min_location_distance(1600), 7);
        assert_eq!(min_location_distance(2500), 8);
    }

    #[test]
    fn test_zero_requested() {
        let mut map = plains_map(30, 30);
        let mut rng = GameRng::new(1);
        assert!(generate_starting_locations(&mut map, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_locations_separated_and_inside_margin() {
        let mut map = plains_map(40, 40);
        let mut rng = GameRng::new(7);
        let locations = generate_starting_locations(&mut map, 4, &mut rng);
        assert_eq!(locations.len(), 4);

        let min = min_location_distance(map.tile_count());
        for (i, a) in locations.iter().enumerate() {
            assert!(a.x >= 4 && a.x <= 35 && a.y >= 4 && a.y <= 35);
            for b in &locations[i + 1..] {
                assert!(a.distance(b) > min);
            }
        }
    }

    #[test]
    fn test_too_small_map_returns_nothing() {
        // 8x8 leaves no tile 4 away from every edge
        let mut map = plains_map(8, 8);
        let mut rng = GameRng::new(2);
        assert!(generate_starting_locations(&mut map, 2, &mut rng).is_empty());
    }

    #[test]
    fn test_fewer_than_requested_without_error() {
        let mut map = plains_map(12, 12);
        let mut rng = GameRng::new(3);
        let locations = generate_starting_locations(&mut map, 10, &mut rng);
        assert!(!locations.is_empty());
        assert!(locations.len() < 10);
    }

    #[test]
    fn test_water_and_small_islands_rejected() {
        let mut map = TilesMap::new(30, 30);
        // One lone island tile
        map.get_mut(TileCoord::new(15, 15)).unwrap().sea_level = SeaLevel::None;
        map.precompute();
        let mut rng = GameRng::new(4);
        assert!(generate_starting_locations(&mut map, 1, &mut rng).is_empty());
    }

    #[test]
    fn test_ranks_on_sweet_spots_from_last_precompute() {
        let mut map = plains_map(30, 30);
        for tile in map.tiles_mut() {
            tile.sweet_spot_value = 0.0;
        }
        let mut rng = GameRng::new(6);
        assert!(generate_starting_locations(&mut map, 2, &mut rng).is_empty());

        map.precompute();
        let locations = generate_starting_locations(&mut map, 2, &mut rng);
        assert_eq!(locations.len(), 2);
    }

    #[test]
    fn test_picks_among_best_candidates() {
        let mut map = plains_map(20, 20);
        // 144 candidates, so the top 15 are eligible for the first pick
        let favoured: Vec<TileCoord> = (4..=15)
            .map(|x| TileCoord::new(x, 10))
            .chain((4..=6).map(|x| TileCoord::new(x, 11)))
            .collect();
        for coord in &favoured {
            map.get_mut(*coord).unwrap().sweet_spot_value = 200.0;
        }
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let first = generate_starting_locations(&mut map, 1, &mut rng)[0];
            assert!(favoured.contains(&first));
        }
    }
}
