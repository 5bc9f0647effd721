//! CLI command implementations

pub mod init;
pub mod keys;
pub mod run;

use anyhow::{Context, Result};
use plume_particles::SimulationConfig;
use std::path::Path;

/// Load the config at `path`, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path)),
        None => Ok(SimulationConfig::default()),
    }
}
