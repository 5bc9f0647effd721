//! Key binding listing

use super::load_config;
use anyhow::{Context, Result};
use plume_core::Control;
use plume_runtime::{display_key, KeyBindings};

pub fn run(config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let mut bindings = KeyBindings::new();
    bindings
        .apply_overrides(&config.keys)
        .context("Invalid [keys] table")?;

    for control in Control::ALL {
        let keys: Vec<String> = bindings
            .keys_for(control)
            .into_iter()
            .map(display_key)
            .collect();
        let keys = if keys.is_empty() {
            "-".to_string()
        } else {
            keys.join(" ")
        };
        println!(
            "  {:<12} {:<24} {}",
            keys,
            control.name(),
            control.description()
        );
    }
    Ok(())
}
