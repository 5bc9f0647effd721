//! Key bindings from keypresses to simulation controls

use plume_core::{Control, PlumeError, Result};
use std::collections::HashMap;

/// The escape key, bound to `Control::Quit` by default
pub const ESCAPE: char = '\u{1b}';

/// Maps single keys to the `Control` they trigger
#[derive(Clone, Debug)]
pub struct KeyBindings {
    map: HashMap<char, Control>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Bindings with the default layout: lowercase lowers, uppercase raises
    pub fn new() -> Self {
        let mut bindings = Self::empty();
        for (key, control) in [
            ('G', Control::GravityUp),
            ('g', Control::GravityDown),
            ('C', Control::ChaosUp),
            ('c', Control::ChaosDown),
            ('F', Control::FountainMore),
            ('f', Control::FountainFewer),
            ('S', Control::SmokeMore),
            ('s', Control::SmokeFewer),
            ('R', Control::RedUp),
            ('r', Control::RedDown),
            ('E', Control::GreenUp),
            ('e', Control::GreenDown),
            ('B', Control::BlueUp),
            ('b', Control::BlueDown),
            ('W', Control::WindFaster),
            ('w', Control::WindSlower),
            ('d', Control::WindClockwise),
            ('a', Control::WindCounterClockwise),
            ('x', Control::Reset),
            ('q', Control::Quit),
            (ESCAPE, Control::Quit),
        ] {
            bindings.bind(key, control);
        }
        bindings
    }

    /// Bindings with no keys mapped
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a key, replacing whatever it was bound to before
    pub fn bind(&mut self, key: char, control: Control) {
        self.map.insert(key, control);
    }

    /// The control a key triggers, if any
    pub fn control_for(&self, key: char) -> Option<Control> {
        self.map.get(&key).copied()
    }

    /// Translate a run of keypresses into controls. Unbound keys are skipped.
    pub fn controls_for_keys(&self, keys: &str) -> Vec<Control> {
        keys.chars().filter_map(|k| self.control_for(k)).collect()
    }

    /// All keys bound to a control, sorted
    pub fn keys_for(&self, control: Control) -> Vec<char> {
        let mut keys: Vec<char> = self
            .map
            .iter()
            .filter(|(_, c)| **c == control)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Apply overrides from a TOML table of `action = "k"` or `action = ["k", "K"]`.
    ///
    /// An overridden action loses all of its previous keys.
    pub fn apply_overrides(&mut self, table: &toml::Table) -> Result<()> {
        for (action, value) in table {
            let control = Control::from_name(action)?;
            let keys = parse_keys(action, value)?;

            self.map.retain(|_, c| *c != control);
            for key in keys {
                if let Some(previous) = self.control_for(key) {
                    log::warn!(
                        "key '{}' rebound from {} to {}",
                        display_key(key),
                        previous.name(),
                        control.name()
                    );
                }
                self.bind(key, control);
            }
        }
        Ok(())
    }
}

/// Printable form of a key, spelling out the ones that are not visible
pub fn display_key(key: char) -> String {
    match key {
        ESCAPE => "esc".to_string(),
        ' ' => "space".to_string(),
        other => other.to_string(),
    }
}

fn parse_keys(action: &str, value: &toml::Value) -> Result<Vec<char>> {
    let invalid = |reason: String| PlumeError::InvalidKeyBinding {
        action: action.to_string(),
        reason,
    };

    match value {
        toml::Value::String(s) => Ok(vec![parse_key(s).map_err(invalid)?]),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| match item.as_str() {
                Some(s) => parse_key(s).map_err(invalid),
                None => Err(invalid(format!(
                    "expected a string, got {}",
                    item.type_str()
                ))),
            })
            .collect(),
        other => Err(invalid(format!(
            "expected a string or array of strings, got {}",
            other.type_str()
        ))),
    }
}

fn parse_key(s: &str) -> std::result::Result<char, String> {
    match s {
        "esc" | "escape" => return Ok(ESCAPE),
        "space" => return Ok(' '),
        _ => {}
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("'{s}' is not a single key")),
    }
}
