use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hexforge::ai::{AiTilesRegistry, Assignment};
use hexforge::core::{GameRng, WorldGenConfig};
use hexforge::data::Catalog;
use hexforge::map::{TileCoord, TilesMap};
use hexforge::mapgen::{generate_starting_locations, generate_terrain, generate_world, place_resources};

fn terrain_map(config: &WorldGenConfig) -> TilesMap {
    let mut map = TilesMap::new(config.width, config.height);
    generate_terrain(&mut map, config, &mut GameRng::new(config.seed));
    map
}

fn bench_worldgen(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let config = WorldGenConfig {
        width: 80,
        height: 50,
        ..WorldGenConfig::default()
    };
    let base = terrain_map(&config);

    let mut group = c.benchmark_group("hexforge/worldgen");

    group.bench_function("generate_world_80x50", |b| {
        b.iter(|| {
            let world = generate_world(&config, &catalog).expect("world");
            black_box(world.starting_locations.len());
        })
    });

    group.bench_function("precompute_80x50", |b| {
        let mut map = base.clone();
        b.iter(|| {
            map.precompute();
            black_box(map.areas().len());
        })
    });

    group.bench_function("place_resources_80x50", |b| {
        let mut rng = GameRng::new(1);
        b.iter(|| {
            let mut map = base.clone();
            let report = place_resources(&mut map, &catalog, 0.3, 1.0, &mut rng).expect("placement");
            black_box(report.placed);
        })
    });

    group.bench_function("starting_locations_80x50", |b| {
        let mut rng = GameRng::new(2);
        b.iter(|| {
            let mut map = base.clone();
            black_box(generate_starting_locations(&mut map, 8, &mut rng).len());
        })
    });

    group.finish();
}

fn bench_registries(c: &mut Criterion) {
    let tiles: Vec<TileCoord> = (0..64)
        .flat_map(|y| (0..64).map(move |x| TileCoord::new(x, y)))
        .collect();

    c.bench_function("hexforge/tiles_registry_churn", |b| {
        let mut registry = AiTilesRegistry::new();
        b.iter(|| {
            for (i, tile) in tiles.iter().enumerate() {
                registry.assign(Some(*tile), Assignment::ALL[i % Assignment::COUNT]);
            }
            for (i, tile) in tiles.iter().enumerate() {
                registry.unassign(Some(*tile), Assignment::ALL[i % Assignment::COUNT]);
            }
            black_box(registry.len());
        })
    });
}

criterion_group!(benches, bench_worldgen, bench_registries);
criterion_main!(benches);
