//! Config scaffolding command

use anyhow::{Context, Result};
use plume_particles::SimulationConfig;
use std::fs;
use std::path::Path;

const KEYS_EXAMPLE: &str = r#"
# Key overrides. An overridden action loses its default keys.
# [keys]
# gravity_up = ["G", "+"]
# quit = ["q", "esc"]
"#;

pub fn run(path: &str, force: bool) -> Result<()> {
    let path = Path::new(path);

    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut text = SimulationConfig::default().to_toml_string()?;
    text.push_str(KEYS_EXAMPLE);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text).with_context(|| format!("Failed to write '{}'", path.display()))?;

    println!("Wrote default config to {}", path.display());
    Ok(())
}
