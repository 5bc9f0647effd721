//! Simulation configuration, loaded from TOML
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```toml
//! [environment]
//! gravity = -4.0
//!
//! [smoke]
//! population = 20000
//!
//! [keys]
//! reset = ["x", "space"]
//! ```

use plume_core::{Color, PlumeError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GRAVITY: f32 = -9.81;
pub const DEFAULT_POPULATION: usize = 1000;
pub const DEFAULT_CAPACITY: usize = 200_000;

/// Starting values of the parameters the input layer can change
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Gravitational acceleration, negative is downward
    pub gravity: f32,
    /// Standard deviation of the per-frame chaotic smoke velocity kick
    pub chaos_speed: f32,
    pub wind_speed: f32,
    /// Wind direction in degrees, 0 blows along +x and 90 along +z
    pub wind_angle: f32,
    /// Base tint new smoke particles are sampled around
    pub smoke_tint: Color,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            chaos_speed: 0.002,
            wind_speed: 0.0,
            wind_angle: 0.0,
            smoke_tint: Color::gray(0.8),
        }
    }
}

/// Water fountain emitter settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FountainConfig {
    pub capacity: usize,
    pub population: usize,
    /// Mean initial upward speed
    pub speed_mean: f32,
    pub speed_std_dev: f32,
    /// Standard deviation of the sideways (x and z) initial speed
    pub side_splash_std_dev: f32,
    /// Scales how strongly gravity acts on a drop
    pub mass: f32,
    /// Drops above this height have left the visible world
    pub ceiling: f32,
    pub point_size: f32,
    pub origin: Vec3,
    pub color: Color,
}

impl Default for FountainConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            population: DEFAULT_POPULATION,
            speed_mean: 11.0,
            speed_std_dev: 1.2,
            side_splash_std_dev: 0.25,
            mass: 0.03,
            ceiling: 450.0,
            point_size: 3.0,
            origin: Vec3::new(-220.0, -240.0, 0.0),
            color: Color::new(0.36, 0.71, 1.0),
        }
    }
}

/// Smoke emitter settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    pub capacity: usize,
    pub population: usize,
    /// Half-width of the square area puffs spawn in, around the origin
    pub spawn_area: f32,
    /// Mean initial rising speed
    pub speed_mean: f32,
    pub speed_std_dev: f32,
    /// Spread of each color channel around the tint at spawn
    pub color_std_dev: f32,
    pub alpha_mean: f32,
    pub alpha_std_dev: f32,
    /// Opacity lost every frame
    pub alpha_decay: f32,
    /// Mean of the per-frame darkening applied to all three channels
    pub shade_change_mean: f32,
    pub shade_change_std_dev: f32,
    /// Scales gravity and wind
    pub mass: f32,
    /// A puff dies once its color or opacity falls to this value
    pub death_threshold: f32,
    /// Vertical chaotic kick relative to the horizontal one
    pub chaos_vertical_multiplier: f32,
    pub point_size: f32,
    /// Number of textures the render layer supplies for smoke
    pub texture_count: u32,
    pub origin: Vec3,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            population: DEFAULT_POPULATION,
            spawn_area: 15.0,
            speed_mean: 0.7,
            speed_std_dev: 0.1,
            color_std_dev: 0.05,
            alpha_mean: 0.35,
            alpha_std_dev: 0.05,
            alpha_decay: 0.0008,
            shade_change_mean: 0.0015,
            shade_change_std_dev: 0.007,
            mass: 0.00007,
            death_threshold: 0.00001,
            chaos_vertical_multiplier: 0.5,
            point_size: 12.0,
            texture_count: 4,
            origin: Vec3::new(220.0, -240.0, 0.0),
        }
    }
}

/// The whole configuration file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub environment: EnvironmentConfig,
    pub fountain: FountainConfig,
    pub smoke: SmokeConfig,
    /// Key binding overrides, `action = "k"` or `action = ["k", "K"]`
    #[serde(skip_serializing_if = "toml::Table::is_empty")]
    pub keys: toml::Table,
}

impl SimulationConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with. Populations above
    /// capacity are not an error; they are clamped when the simulation starts.
    pub fn validate(&self) -> Result<()> {
        let env = &self.environment;
        finite("environment.gravity", env.gravity)?;
        non_negative("environment.chaos_speed", env.chaos_speed)?;
        non_negative("environment.wind_speed", env.wind_speed)?;
        finite("environment.wind_angle", env.wind_angle)?;
        unit_interval("environment.smoke_tint.r", env.smoke_tint.r)?;
        unit_interval("environment.smoke_tint.g", env.smoke_tint.g)?;
        unit_interval("environment.smoke_tint.b", env.smoke_tint.b)?;

        let fountain = &self.fountain;
        positive_count("fountain.capacity", fountain.capacity)?;
        finite("fountain.speed_mean", fountain.speed_mean)?;
        non_negative("fountain.speed_std_dev", fountain.speed_std_dev)?;
        non_negative("fountain.side_splash_std_dev", fountain.side_splash_std_dev)?;
        non_negative("fountain.mass", fountain.mass)?;
        non_negative("fountain.point_size", fountain.point_size)?;
        vector("fountain.origin", fountain.origin)?;
        if fountain.ceiling.is_nan() || fountain.ceiling <= fountain.origin.y {
            return Err(PlumeError::ValueOutOfRange {
                field: "fountain.ceiling".into(),
                min: f64::from(fountain.origin.y),
                max: f64::from(f32::MAX),
                value: f64::from(fountain.ceiling),
            });
        }

        let smoke = &self.smoke;
        positive_count("smoke.capacity", smoke.capacity)?;
        non_negative("smoke.spawn_area", smoke.spawn_area)?;
        finite("smoke.speed_mean", smoke.speed_mean)?;
        non_negative("smoke.speed_std_dev", smoke.speed_std_dev)?;
        non_negative("smoke.color_std_dev", smoke.color_std_dev)?;
        finite("smoke.alpha_mean", smoke.alpha_mean)?;
        non_negative("smoke.alpha_std_dev", smoke.alpha_std_dev)?;
        non_negative("smoke.alpha_decay", smoke.alpha_decay)?;
        finite("smoke.shade_change_mean", smoke.shade_change_mean)?;
        non_negative("smoke.shade_change_std_dev", smoke.shade_change_std_dev)?;
        non_negative("smoke.mass", smoke.mass)?;
        non_negative("smoke.death_threshold", smoke.death_threshold)?;
        non_negative(
            "smoke.chaos_vertical_multiplier",
            smoke.chaos_vertical_multiplier,
        )?;
        non_negative("smoke.point_size", smoke.point_size)?;
        vector("smoke.origin", smoke.origin)?;

        Ok(())
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> PlumeError {
    PlumeError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

fn finite(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(
            field,
            f64::from(f32::MIN),
            f64::from(f32::MAX),
            f64::from(value),
        ))
    }
}

fn non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(out_of_range(
            field,
            0.0,
            f64::from(f32::MAX),
            f64::from(value),
        ))
    }
}

fn unit_interval(field: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(out_of_range(field, 0.0, 1.0, f64::from(value)))
    }
}

fn positive_count(field: &str, value: usize) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(out_of_range(field, 1.0, usize::MAX as f64, 0.0))
    }
}

fn vector(field: &str, value: Vec3) -> Result<()> {
    if value.is_finite() {
        return Ok(());
    }
    finite(&format!("{field}.x"), value.x)?;
    finite(&format!("{field}.y"), value.y)?;
    finite(&format!("{field}.z"), value.z)
}
