//! Configuration system for Landform.
//!
//! Provides the immutable [`TerrainConfig`] threaded into terrain generation,
//! plus application settings that persist to disk as RON files. Supports CLI
//! overrides via clap, hot-reload detection, and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;
mod terrain;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, OutputConfig};
pub use error::ConfigError;
pub use terrain::{
    BuildingPad, DecorationConfig, FeatureLayout, LawnPatch, NormalMode, ReliefProfile,
    RoadCorridor, TerrainConfig, WaterBasin,
};
