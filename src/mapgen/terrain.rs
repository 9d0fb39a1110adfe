//! Terrain generation for a blank map
//!
//! Elevation comes from seeded value noise faded towards the map edges, so
//! the border is ocean. Land, hills and mountains are cut from elevation
//! quantiles; climate follows latitude.

use ordered_float::OrderedFloat;
use rand::RngCore;
use std::cmp::Reverse;

use crate::core::config::WorldGenConfig;
use crate::core::random::GameRng;
use crate::data::{Climate, LandForm, SeaLevel};
use crate::map::{TileCoord, TilesMap};
use crate::mapgen::eligibility::{are_wetlands_possible, is_forestable};

/// Lattice spacing of the coarse noise octave, in tiles
const NOISE_CELL: i32 = 8;
/// Distance from the edge over which elevation fades out
const EDGE_FADE: f32 = 5.0;
const MAX_RIVER_LENGTH: usize = 8;
const WETLANDS_CHANCE: f64 = 0.2;

/// Fill `map` with terrain and recompute its derived data
pub fn generate_terrain(map: &mut TilesMap, config: &WorldGenConfig, rng: &mut GameRng) {
    let noise_seed = rng.next_u64();
    let width = map.width();
    let height = map.height();

    let elevation: Vec<f32> = map
        .coords()
        .map(|c| {
            let edge_dist = c.x.min(width - 1 - c.x).min(c.y).min(height - 1 - c.y) as f32;
            let fade = (edge_dist / EDGE_FADE).min(1.0);
            let noise = value_noise(c.x, c.y, NOISE_CELL, noise_seed) * 0.65
                + value_noise(c.x, c.y, NOISE_CELL / 2, noise_seed ^ 0x9e37_79b9) * 0.35;
            noise * fade
        })
        .collect();

    let land_threshold = quantile_threshold(&elevation, config.land_ratio);

    // Sea and land
    for (tile, e) in map.tiles_mut().zip(&elevation) {
        tile.sea_level = match land_threshold {
            Some(threshold) if *e >= threshold => SeaLevel::None,
            _ => SeaLevel::Deep,
        };
        tile.land_form = LandForm::Plains;
        tile.river_parts.clear();
        tile.forest = false;
        tile.wetlands = false;
        tile.resource = None;
    }

    // Highest land becomes mountains, the next band hills
    let mut land: Vec<usize> = (0..elevation.len())
        .filter(|i| land_threshold.map_or(false, |t| elevation[*i] >= t))
        .collect();
    land.sort_by_key(|i| Reverse(OrderedFloat(elevation[*i])));
    let mountains = (land.len() as f64 * config.mountain_ratio).round() as usize;
    let hills = (land.len() as f64 * config.hill_ratio).round() as usize;
    let relief: Vec<(TileCoord, LandForm)> = land
        .iter()
        .take(mountains + hills)
        .enumerate()
        .map(|(rank, i)| {
            let coord = TileCoord::new(*i as i32 % width, *i as i32 / width);
            let form = if rank < mountains { LandForm::Mountains } else { LandForm::Hills };
            (coord, form)
        })
        .collect();
    for (coord, form) in relief {
        if let Some(tile) = map.get_mut(coord) {
            tile.land_form = form;
        }
    }

    // Water touching land is shallow
    let shallow: Vec<TileCoord> = map
        .tiles()
        .filter(|t| t.is_water())
        .filter(|t| map.neighbours(t.coord).any(|n| map.get(n).map_or(false, |nt| nt.is_land())))
        .map(|t| t.coord)
        .collect();
    for coord in shallow {
        if let Some(tile) = map.get_mut(coord) {
            tile.sea_level = SeaLevel::Shallow;
        }
    }

    for tile in map.tiles_mut() {
        tile.climate = climate_at(tile.coord.y, height, rng);
    }

    let rivers = place_rivers(map, config.river_count, rng);

    for tile in map.tiles_mut() {
        tile.forest = is_forestable(tile) && rng.chance(config.forest_ratio);
        tile.wetlands = !tile.forest && are_wetlands_possible(tile) && rng.chance(WETLANDS_CHANCE);
    }

    map.precompute();

    tracing::debug!(
        land = map.tiles().filter(|t| t.is_land()).count(),
        mountains,
        hills,
        rivers,
        "terrain generated"
    );
}

/// Elevation above which `ratio` of the values lie; `None` when nothing is land
fn quantile_threshold(values: &[f32], ratio: f64) -> Option<f32> {
    let mut sorted: Vec<f32> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let skip = ((1.0 - ratio.clamp(0.0, 1.0)) * sorted.len() as f64).round() as usize;
    sorted.get(skip).copied()
}

/// Climate band for a row, with a little jitter in the dry belt
fn climate_at(y: i32, height: i32, rng: &mut GameRng) -> Climate {
    let half = (height - 1) as f32 / 2.0;
    let latitude = if half > 0.0 { ((y as f32 - half) / half).abs() } else { 0.0 };

    if latitude < 0.2 {
        Climate::Tropical
    } else if latitude < 0.35 {
        if rng.chance(0.5) {
            Climate::Savanna
        } else {
            Climate::Desert
        }
    } else if latitude < 0.7 {
        Climate::Temperate
    } else if latitude < 0.85 {
        Climate::Tundra
    } else {
        Climate::Arctic
    }
}

/// Walk rivers inland from random coastline tiles; returns how many started
fn place_rivers(map: &mut TilesMap, count: usize, rng: &mut GameRng) -> usize {
    let coastline = map.find_coastline();
    if coastline.is_empty() {
        return 0;
    }

    let mut placed = 0;
    for _ in 0..count {
        let mut current = coastline[rng.index(coastline.len())];
        let mut visited = vec![current];

        for _ in 0..MAX_RIVER_LENGTH {
            let options: Vec<TileCoord> = map
                .neighbours(current)
                .filter(|n| !visited.contains(n))
                .filter(|n| {
                    map.get(*n)
                        .map_or(false, |t| t.is_land() && t.land_form != LandForm::Mountains)
                })
                .collect();
            if options.is_empty() {
                break;
            }
            let next = options[rng.index(options.len())];
            if !map.place_river_between(current, next) {
                break;
            }
            visited.push(next);
            current = next;
        }

        if visited.len() > 1 {
            placed += 1;
        }
    }
    placed
}

/// Hash a lattice point to [0, 1)
fn lattice_value(ix: i32, iy: i32, seed: u64) -> f32 {
    let n = (ix as i64 as u64)
        .wrapping_mul(374_761_393)
        .wrapping_add((iy as i64 as u64).wrapping_mul(668_265_263))
        .wrapping_add(seed);
    let n = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
    let n = n ^ (n >> 16);
    (n >> 40) as f32 / (1u64 << 24) as f32
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Bilinear value noise with lattice spacing `cell`
fn value_noise(x: i32, y: i32, cell: i32, seed: u64) -> f32 {
    let cell = cell.max(1);
    let ix = x.div_euclid(cell);
    let iy = y.div_euclid(cell);
    let fx = smoothstep(x.rem_euclid(cell) as f32 / cell as f32);
    let fy = smoothstep(y.rem_euclid(cell) as f32 / cell as f32);

    let top = lerp(lattice_value(ix, iy, seed), lattice_value(ix + 1, iy, seed), fx);
    let bottom = lerp(
        lattice_value(ix, iy + 1, seed),
        lattice_value(ix + 1, iy + 1, seed),
        fx,
    );
    lerp(top, bottom, fy)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
