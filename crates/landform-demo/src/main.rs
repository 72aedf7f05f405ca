//! Command-line terrain generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p landform-demo -- --seed 7 --normal-mode smooth`.
//! Add `--heightmap-out height.png` to export the normalized height map.

mod export;

use clap::Parser;
use landform_config::{CliArgs, Config};
use landform_mesh::{TerrainMesh, generate_terrain_mesh};
use landform_terrain::ElementType;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let default_dir = || dirs::config_dir().map(|dir| dir.join("landform"));
    let config_dir = match args.config.clone().or_else(default_dir) {
        Some(dir) => dir,
        None => {
            eprintln!("Failed to resolve config directory; pass --config");
            std::process::exit(1);
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    landform_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let output = match generate_terrain_mesh(&config.terrain) {
        Ok(output) => output,
        Err(e) => {
            error!("Terrain generation failed: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Generated {} vertices ({} triangles, {} KiB of attributes)",
        output.mesh.vertex_count,
        output.mesh.triangle_count(),
        output.mesh.buffer_bytes() / 1024
    );
    info!(
        "Placed {} trees and {} buildings",
        output.tree_count(),
        output.building_count()
    );

    if config.debug.log_mesh_stats {
        log_mesh_stats(&output);
    }

    if let Some(path) = &config.output.heightmap_png {
        match export::write_heightmap_png(&output.heightmap_image(), path) {
            Ok(()) => info!("Wrote height map to {}", path.display()),
            Err(e) => {
                error!("Height map export failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn log_mesh_stats(output: &TerrainMesh) {
    let range = output.height_range();
    info!("Height range: {:.3} .. {:.3}", range.min, range.max);

    let overlays = output.overlays();
    info!(
        "Overlay cells: road={} water={} lawn={} building={}",
        overlays.road, overlays.water, overlays.lawn, overlays.building
    );

    for element in ElementType::ALL {
        let count = output.mesh.count_of(element);
        if count > 0 {
            info!("  {element:?}: {count} vertices");
        }
    }
}
