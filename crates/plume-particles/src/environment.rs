//! Tunable simulation parameters and the input nudges that change them

use crate::config::SimulationConfig;
use plume_core::{Color, Control};

/// Factor applied by "more" nudges to gravity, chaos, and wind speed
pub const INCREMENT_MULTIPLIER: f32 = 1.1;
/// Factor applied by "less" nudges to gravity, chaos, and wind speed
pub const DECREMENT_MULTIPLIER: f32 = 0.9;
/// Additive step for each smoke tint channel
pub const COLOR_STEP: f32 = 0.05;
/// Degrees the wind turns per nudge
pub const WIND_ANGLE_STEP: f32 = 10.0;
/// Slowest non-zero wind; speeding up from calm jumps straight to this
pub const WIND_SPEED_STEP: f32 = 0.1;

/// Horizontal wind, kept together with the (x, z) vector it resolves to so
/// the two are never read out of step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wind {
    speed: f32,
    angle: f32,
    /// Mass of the particles the wind pushes
    mass: f32,
    x: f32,
    z: f32,
}

impl Wind {
    pub fn new(speed: f32, angle: f32, mass: f32) -> Self {
        let mut wind = Self {
            speed,
            angle: angle.rem_euclid(360.0),
            mass,
            x: 0.0,
            z: 0.0,
        };
        wind.resolve();
        wind
    }

    fn resolve(&mut self) {
        let radians = self.angle.to_radians();
        self.x = self.mass * self.speed * radians.cos() / 10.0;
        self.z = self.mass * self.speed * radians.sin() / 10.0;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Direction in degrees, in [0, 360)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Per-unit-height velocity change along x and z
    pub fn vector(&self) -> (f32, f32) {
        (self.x, self.z)
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
        self.resolve();
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.rem_euclid(360.0);
        self.resolve();
    }
}

/// Parameters read by the emitter policies every frame and written by the
/// input layer between frames
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    pub gravity: f32,
    pub chaos_speed: f32,
    pub wind: Wind,
    pub smoke_tint: Color,
    fountain_population: usize,
    smoke_population: usize,
    fountain_capacity: usize,
    smoke_capacity: usize,
}

impl Environment {
    /// The starting environment described by a config. Populations are
    /// clamped into [1, capacity].
    pub fn from_config(config: &SimulationConfig) -> Self {
        let env = &config.environment;
        let mut environment = Self {
            gravity: env.gravity,
            chaos_speed: env.chaos_speed,
            wind: Wind::new(env.wind_speed, env.wind_angle, config.smoke.mass),
            smoke_tint: env.smoke_tint.clamped(),
            fountain_population: 0,
            smoke_population: 0,
            fountain_capacity: config.fountain.capacity,
            smoke_capacity: config.smoke.capacity,
        };
        environment.set_fountain_population(config.fountain.population);
        environment.set_smoke_population(config.smoke.population);
        environment
    }

    pub fn fountain_population(&self) -> usize {
        self.fountain_population
    }

    pub fn smoke_population(&self) -> usize {
        self.smoke_population
    }

    /// Set the fountain's target population, clamped into [1, capacity]
    pub fn set_fountain_population(&mut self, population: usize) -> usize {
        self.fountain_population = clamp_population("fountain", population, self.fountain_capacity);
        self.fountain_population
    }

    /// Set the smoke emitter's target population, clamped into [1, capacity]
    pub fn set_smoke_population(&mut self, population: usize) -> usize {
        self.smoke_population = clamp_population("smoke", population, self.smoke_capacity);
        self.smoke_population
    }

    /// Apply a parameter nudge. Returns false for controls that are not
    /// parameter changes (`Reset` and `Quit`), which the caller handles.
    pub fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::GravityUp => self.gravity *= INCREMENT_MULTIPLIER,
            Control::GravityDown => self.gravity *= DECREMENT_MULTIPLIER,
            Control::ChaosUp => self.chaos_speed *= INCREMENT_MULTIPLIER,
            Control::ChaosDown => self.chaos_speed *= DECREMENT_MULTIPLIER,
            Control::FountainMore => {
                self.set_fountain_population(self.fountain_population.saturating_mul(2));
            }
            Control::FountainFewer => {
                self.set_fountain_population(self.fountain_population / 2);
            }
            Control::SmokeMore => {
                self.set_smoke_population(self.smoke_population.saturating_mul(2));
            }
            Control::SmokeFewer => {
                self.set_smoke_population(self.smoke_population / 2);
            }
            Control::RedUp => nudge_channel(&mut self.smoke_tint.r, COLOR_STEP),
            Control::RedDown => nudge_channel(&mut self.smoke_tint.r, -COLOR_STEP),
            Control::GreenUp => nudge_channel(&mut self.smoke_tint.g, COLOR_STEP),
            Control::GreenDown => nudge_channel(&mut self.smoke_tint.g, -COLOR_STEP),
            Control::BlueUp => nudge_channel(&mut self.smoke_tint.b, COLOR_STEP),
            Control::BlueDown => nudge_channel(&mut self.smoke_tint.b, -COLOR_STEP),
            Control::WindFaster => {
                let speed = self.wind.speed();
                if speed < WIND_SPEED_STEP {
                    self.wind.set_speed(WIND_SPEED_STEP);
                } else {
                    self.wind.set_speed(speed * INCREMENT_MULTIPLIER);
                }
            }
            Control::WindSlower => {
                let speed = self.wind.speed() * DECREMENT_MULTIPLIER;
                self.wind.set_speed(if speed < WIND_SPEED_STEP { 0.0 } else { speed });
            }
            Control::WindClockwise => self.wind.set_angle(self.wind.angle() + WIND_ANGLE_STEP),
            Control::WindCounterClockwise => {
                self.wind.set_angle(self.wind.angle() - WIND_ANGLE_STEP)
            }
            Control::Reset | Control::Quit => return false,
        }
        true
    }
}

fn clamp_population(emitter: &str, population: usize, capacity: usize) -> usize {
    if population > capacity {
        log::warn!("{emitter} population {population} exceeds capacity {capacity}, clamping");
    }
    population.clamp(1, capacity.max(1))
}

fn nudge_channel(channel: &mut f32, step: f32) {
    *channel = (*channel + step).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment() -> Environment {
        Environment::from_config(&SimulationConfig::default())
    }

    #[test]
    fn wind_vector_at_right_angle() {
        let mass = SimulationConfig::default().smoke.mass;
        let wind = Wind::new(0.1, 90.0, mass);
        let (x, z) = wind.vector();
        assert!(x.abs() < 1e-12, "x = {x}");
        assert!((z - mass * 0.1 / 10.0).abs() < 1e-12, "z = {z}");
    }

    #[test]
    fn wind_vector_recomputed_on_change() {
        let mut wind = Wind::new(0.0, 0.0, 1.0);
        assert_eq!(wind.vector(), (0.0, 0.0));
        wind.set_speed(10.0);
        let (x, z) = wind.vector();
        assert!((x - 1.0).abs() < 1e-6);
        assert!(z.abs() < 1e-6);
        wind.set_angle(180.0);
        let (x, _) = wind.vector();
        assert!((x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn wind_angle_wraps() {
        let mut wind = Wind::new(1.0, 355.0, 1.0);
        wind.set_angle(wind.angle() + WIND_ANGLE_STEP);
        assert!((wind.angle() - 5.0).abs() < 1e-4);
        wind.set_angle(-10.0);
        assert!((wind.angle() - 350.0).abs() < 1e-4);
    }

    #[test]
    fn gravity_and_chaos_are_multiplicative() {
        let mut env = environment();
        env.apply(Control::GravityUp);
        assert!((env.gravity - (-9.81 * 1.1)).abs() < 1e-4);
        env.apply(Control::ChaosDown);
        assert!((env.chaos_speed - 0.002 * 0.9).abs() < 1e-7);
    }

    #[test]
    fn population_doubles_and_halves_within_bounds() {
        let mut config = SimulationConfig::default();
        config.fountain.capacity = 3000;
        let mut env = Environment::from_config(&config);

        env.apply(Control::FountainMore);
        assert_eq!(env.fountain_population(), 2000);
        env.apply(Control::FountainMore);
        assert_eq!(env.fountain_population(), 3000);

        for _ in 0..20 {
            env.apply(Control::FountainFewer);
        }
        assert_eq!(env.fountain_population(), 1);
        env.apply(Control::SmokeFewer);
        assert_eq!(env.smoke_population(), 500);
    }

    #[test]
    fn configured_population_is_clamped() {
        let mut config = SimulationConfig::default();
        config.smoke.capacity = 10;
        config.smoke.population = 100;
        config.fountain.population = 0;
        let env = Environment::from_config(&config);
        assert_eq!(env.smoke_population(), 10);
        assert_eq!(env.fountain_population(), 1);
    }

    #[test]
    fn tint_nudges_are_clamped() {
        let mut env = environment();
        for _ in 0..10 {
            env.apply(Control::RedUp);
            env.apply(Control::BlueDown);
        }
        assert_eq!(env.smoke_tint.r, 1.0);
        assert!((env.smoke_tint.g - 0.8).abs() < 1e-6);
        assert!((env.smoke_tint.b - 0.3).abs() < 1e-5);
        for _ in 0..10 {
            env.apply(Control::BlueDown);
        }
        assert_eq!(env.smoke_tint.b, 0.0);
    }

    #[test]
    fn wind_speeds_up_from_calm() {
        let mut env = environment();
        assert_eq!(env.wind.speed(), 0.0);
        env.apply(Control::WindFaster);
        assert!((env.wind.speed() - WIND_SPEED_STEP).abs() < 1e-7);
        env.apply(Control::WindFaster);
        assert!((env.wind.speed() - WIND_SPEED_STEP * 1.1).abs() < 1e-7);
        env.apply(Control::WindSlower);
        env.apply(Control::WindSlower);
        assert_eq!(env.wind.speed(), 0.0);
    }

    #[test]
    fn reset_and_quit_are_left_to_the_caller() {
        let mut env = environment();
        let before = env.clone();
        assert!(!env.apply(Control::Reset));
        assert!(!env.apply(Control::Quit));
        assert_eq!(env, before);
    }
}
