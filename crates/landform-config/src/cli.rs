//! Command-line argument parsing for Landform.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::terrain::NormalMode;

/// Landform command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "landform", about = "Procedural terrain mesh generator")]
pub struct CliArgs {
    /// Generation seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Base grid size (cells per side).
    #[arg(long)]
    pub grid_size: Option<usize>,

    /// Grid size after upsampling.
    #[arg(long)]
    pub target_grid_size: Option<usize>,

    /// Upsample the base grid before triangulating.
    #[arg(long)]
    pub interpolate: Option<bool>,

    /// Normal resolution strategy.
    #[arg(long, value_enum)]
    pub normal_mode: Option<NormalMode>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the normalized height map to this PNG file.
    #[arg(long)]
    pub heightmap_out: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(size) = args.grid_size {
            self.terrain.base_grid_size = size;
        }
        if let Some(size) = args.target_grid_size {
            self.terrain.target_grid_size = size;
        }
        if let Some(interpolate) = args.interpolate {
            self.terrain.interpolate = interpolate;
        }
        if let Some(mode) = args.normal_mode {
            self.terrain.normal_mode = mode;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.heightmap_out {
            self.output.heightmap_png = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(7),
            interpolate: Some(false),
            normal_mode: Some(NormalMode::Flat),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.seed, 7);
        assert!(!config.terrain.interpolate);
        assert_eq!(config.terrain.normal_mode, NormalMode::Flat);
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.base_grid_size, 50);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "landform",
            "--seed",
            "9",
            "--grid-size",
            "32",
            "--normal-mode",
            "gradient",
            "--interpolate",
            "false",
        ]);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.grid_size, Some(32));
        assert_eq!(args.normal_mode, Some(NormalMode::Gradient));
        assert_eq!(args.interpolate, Some(false));
    }
}
