//! Hexforge - World Generator
//!
//! Generates a world from a config file and command line overrides, then
//! prints a summary or the full world as JSON.

use clap::Parser;
use std::path::PathBuf;

use hexforge::core::error::Result;
use hexforge::core::WorldGenConfig;
use hexforge::data::{Catalog, LandForm};
use hexforge::mapgen::{generate_world, GeneratedWorld};

/// Procedural hex world generator
#[derive(Parser, Debug)]
#[command(name = "hexforge")]
#[command(about = "Generate a hex world with resources and starting locations")]
struct Args {
    /// TOML world generation config
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML catalog; the built-in catalog is used otherwise
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Map width in hexes
    #[arg(long)]
    width: Option<i32>,

    /// Map height in hexes
    #[arg(long)]
    height: Option<i32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of starting locations to place
    #[arg(long)]
    players: Option<usize>,

    /// Print the whole world as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hexforge=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WorldGenConfig::load(path)?,
        None => WorldGenConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(players) = args.players {
        config.players = players;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::load_file(path)?,
        None => Catalog::builtin()?,
    };

    let world = generate_world(&config, &catalog)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&world)?);
    } else {
        print_summary(&world, &catalog);
    }

    Ok(())
}

fn print_summary(world: &GeneratedWorld, catalog: &Catalog) {
    let map = &world.map;
    let land = map.tiles().filter(|t| t.is_land()).count();
    let mountains = map
        .tiles()
        .filter(|t| t.land_form == LandForm::Mountains)
        .count();
    let rivers = map.tiles().filter(|t| t.has_river()).count();

    println!("\n=== HEXFORGE WORLD (seed {}) ===", world.seed);
    println!("Size:        {}x{} ({} tiles)", map.width(), map.height(), map.tile_count());
    println!("Land:        {} tiles ({} mountains, {} along rivers)", land, mountains, rivers);
    println!("Areas:       {} ({} land tiles)", map.areas().len(), map.total_land_area());
    println!(
        "Resources:   {} placed / {} considered / {} infeasible",
        world.placement.placed, world.placement.considered, world.placement.infeasible
    );

    let mut per_resource: Vec<(String, usize)> = catalog
        .resources()
        .iter()
        .map(|def| {
            let count = map
                .all_resources()
                .iter()
                .filter(|d| d.resource == def.id)
                .count();
            (def.name.clone(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();
    per_resource.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (name, count) in per_resource {
        println!("  {:<12} {}", name, count);
    }

    println!("Starting locations:");
    for (i, coord) in world.starting_locations.iter().enumerate() {
        let sweet = map.get(*coord).map_or(0.0, |t| t.sweet_spot_value);
        println!("  #{} at {} (sweet spot {:.1})", i + 1, coord, sweet);
    }
}
