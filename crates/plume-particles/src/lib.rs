//! Plume Particles - fountain and smoke particle simulation
//!
//! Provides the per-frame particle engine:
//! - Seedable uniform and Box–Muller Gaussian sampling
//! - Fixed-capacity stores with swap-remove compaction for O(1) kill
//! - Fountain (ballistic) and smoke (buoyant, chaotic, wind-blown, fading) policies
//! - Tunable environment parameters changed through queued controls
//! - Instance packing for the render layer

pub mod config;
pub mod draw;
pub mod emitter;
pub mod environment;
pub mod fountain;
pub mod particle;
pub mod rand;
pub mod smoke;
pub mod texture;

use plume_core::{Control, Result};
use plume_runtime::{EventBus, RuntimeSystem};
use serde::Serialize;

pub use config::{EnvironmentConfig, FountainConfig, SimulationConfig, SmokeConfig};
pub use draw::{InstanceBuffer, ParticleDrawData, ParticleInstance};
pub use emitter::{Emitter, EmitterKind, EmitterPolicy};
pub use environment::{Environment, Wind};
pub use fountain::FountainPolicy;
pub use particle::{Fate, ParticleStore, SmokeParticle, WaterDrop};
pub use smoke::SmokePolicy;
pub use texture::{TextureHandle, TexturePool};

pub use crate::rand::ParticleRng;

/// What happened during one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub frame: u64,
    pub fountain_live: usize,
    pub smoke_live: usize,
    pub spawned: usize,
    pub culled: usize,
}

/// Both emitters, the environment they read, and the frame loop that drives them
pub struct ParticleSystem {
    config: SimulationConfig,
    environment: Environment,
    rng: ParticleRng,
    fountain: Emitter<FountainPolicy>,
    smoke: Emitter<SmokePolicy>,
    controls: EventBus<Control>,
    instances: InstanceBuffer,
    frame: u64,
    quit_requested: bool,
}

impl ParticleSystem {
    pub fn new(config: SimulationConfig, textures: TexturePool, rng: ParticleRng) -> Result<Self> {
        config.validate()?;
        let environment = Environment::from_config(&config);
        let fountain = Emitter::new(
            EmitterKind::Fountain,
            FountainPolicy::new(config.fountain.clone()),
            config.fountain.capacity,
            environment.fountain_population(),
        );
        let smoke = Emitter::new(
            EmitterKind::Smoke,
            SmokePolicy::new(config.smoke.clone(), textures),
            config.smoke.capacity,
            environment.smoke_population(),
        );
        Ok(Self {
            config,
            environment,
            rng,
            fountain,
            smoke,
            controls: EventBus::new(),
            instances: InstanceBuffer::new(),
            frame: 0,
            quit_requested: false,
        })
    }

    /// A reproducible system with a sequential texture pool
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self> {
        let textures = TexturePool::sequential(config.smoke.texture_count);
        Self::new(config, textures, ParticleRng::new(seed))
    }

    /// Queue a control for the start of the next frame
    pub fn queue_control(&mut self, control: Control) {
        self.controls.push(control);
    }

    pub fn queue_controls(&mut self, controls: impl IntoIterator<Item = Control>) {
        self.controls.extend(controls);
    }

    /// Apply every queued control, in order. Returns how many were applied.
    pub fn apply_pending_controls(&mut self) -> usize {
        let pending = self.controls.drain();
        let count = pending.len();
        for control in pending {
            self.apply_control(control);
        }
        count
    }

    /// Apply one control immediately
    pub fn apply_control(&mut self, control: Control) {
        log::debug!("control: {}", control.name());
        match control {
            Control::Reset => self.reset(),
            Control::Quit => self.quit_requested = true,
            other => {
                self.environment.apply(other);
            }
        }
    }

    /// Restore every parameter to its configured default and empty both emitters
    pub fn reset(&mut self) {
        self.environment = Environment::from_config(&self.config);
        self.fountain.store.clear();
        self.smoke.store.clear();
        self.instances.clear();
        log::debug!("simulation reset");
    }

    /// Top both emitters up to their target populations
    pub fn spawn(&mut self) -> usize {
        let env = &self.environment;
        self.fountain
            .spawn(&mut self.rng, env, env.fountain_population())
            + self.smoke.spawn(&mut self.rng, env, env.smoke_population())
    }

    /// Advance both emitters one frame, culling the dead
    pub fn progress(&mut self) -> usize {
        let env = &self.environment;
        self.fountain.progress(&mut self.rng, env) + self.smoke.progress(&mut self.rng, env)
    }

    /// Repack the render instances from the current live particles
    pub fn pack_instances(&mut self) {
        self.instances.clear();

        let fountain = &self.config.fountain;
        self.instances.push_range(
            EmitterKind::Fountain,
            self.fountain
                .live()
                .iter()
                .map(|d| ParticleInstance::from_drop(d, fountain.color, fountain.point_size)),
        );

        let size = self.config.smoke.point_size;
        self.instances.push_range(
            EmitterKind::Smoke,
            self.smoke
                .live()
                .iter()
                .map(|p| ParticleInstance::from_smoke(p, size)),
        );
    }

    /// One full frame: apply queued controls, spawn, snapshot for rendering,
    /// then advance the physics.
    ///
    /// Once `Quit` has been applied the simulation is frozen: this frame and
    /// every later one neither spawns nor moves anything.
    pub fn frame(&mut self) -> FrameStats {
        self.apply_pending_controls();
        if self.quit_requested {
            return self.stats(0, 0);
        }

        let spawned = self.spawn();
        self.pack_instances();
        let culled = self.progress();
        self.frame += 1;

        let stats = self.stats(spawned, culled);
        log::trace!(
            "frame {}: fountain {} smoke {} (+{spawned} -{culled})",
            stats.frame,
            stats.fountain_live,
            stats.smoke_live
        );
        stats
    }

    fn stats(&self, spawned: usize, culled: usize) -> FrameStats {
        FrameStats {
            frame: self.frame,
            fountain_live: self.fountain.live_count(),
            smoke_live: self.smoke.live_count(),
            spawned,
            culled,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn fountain(&self) -> &ParticleStore<WaterDrop> {
        &self.fountain.store
    }

    pub fn smoke(&self) -> &ParticleStore<SmokeParticle> {
        &self.smoke.store
    }

    /// Instances packed by the last frame
    pub fn instance_data(&self) -> &[ParticleInstance] {
        self.instances.instance_data()
    }

    pub fn draw_data(&self) -> Vec<ParticleDrawData<'_>> {
        self.instances.draw_data()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// True once a `Quit` control has been applied
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

impl RuntimeSystem for ParticleSystem {
    fn initialize(&mut self) -> Result<()> {
        log::debug!(
            "particles: fountain capacity {}, smoke capacity {}, {} smoke texture(s)",
            self.fountain.store.capacity(),
            self.smoke.store.capacity(),
            self.smoke.policy.textures().len()
        );
        Ok(())
    }

    fn update(&mut self, _dt: f64) -> Result<()> {
        self.frame();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::debug!("particles: stopped after {} frames", self.frame);
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.fountain.capacity = 1000;
        config.fountain.population = 5;
        config.smoke.capacity = 1000;
        config.smoke.population = 50;
        config
    }

    #[test]
    fn first_frame_fills_both_emitters() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        assert!(system.fountain().is_empty());

        let stats = system.frame();
        assert_eq!(stats.frame, 1);
        assert_eq!(stats.spawned, 55);

        // The render snapshot holds the freshly spawned particles
        let draw = system.draw_data();
        assert_eq!(draw.len(), 2);
        assert_eq!(draw[0].emitter, EmitterKind::Fountain);
        assert_eq!(draw[0].instances.len(), 5);
        assert_eq!(draw[1].instances.len(), 50);
        let origin = system.config().fountain.origin;
        assert!(draw[0].instances.iter().all(|i| i.pos_size[1] == origin.y));
    }

    #[test]
    fn controls_wait_for_the_next_frame() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        let gravity = system.environment().gravity;

        system.queue_control(Control::GravityUp);
        assert_eq!(system.environment().gravity, gravity);

        system.frame();
        assert!((system.environment().gravity - gravity * 1.1).abs() < 1e-4);
    }

    #[test]
    fn doubling_population_stops_at_capacity() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        system.queue_controls(std::iter::repeat(Control::SmokeMore).take(10));
        system.frame();
        assert_eq!(system.environment().smoke_population(), 1000);
        assert!(system.smoke().live_count() <= 1000);
        assert_eq!(system.draw_data()[1].instances.len(), 1000);
    }

    #[test]
    fn halving_population_drops_surplus() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        system.frame();
        system.queue_control(Control::SmokeFewer);
        system.frame();
        assert_eq!(system.environment().smoke_population(), 25);
        assert!(system.smoke().live_count() <= 25);
    }

    #[test]
    fn reset_restores_defaults_and_empties() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        let initial = system.environment().clone();
        system.queue_controls([Control::GravityDown, Control::WindFaster, Control::RedUp]);
        for _ in 0..5 {
            system.frame();
        }
        assert_ne!(system.environment(), &initial);

        system.apply_control(Control::Reset);
        assert_eq!(system.environment(), &initial);
        assert!(system.fountain().is_empty());
        assert!(system.smoke().is_empty());
        assert!(system.instance_data().is_empty());
    }

    #[test]
    fn quit_is_recorded() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        system.queue_control(Control::Quit);
        assert!(!system.quit_requested());
        system.frame();
        assert!(system.quit_requested());
    }

    #[test]
    fn quit_stops_the_frame_it_arrives_in() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        system.queue_control(Control::Quit);
        let stats = system.frame();
        assert_eq!(stats.spawned, 0);
        assert_eq!(stats.fountain_live, 0);
        assert_eq!(stats.smoke_live, 0);
        assert_eq!(system.frame_count(), 0);
        assert!(system.instance_data().is_empty());
    }

    #[test]
    fn nothing_moves_after_quit() {
        let mut system = ParticleSystem::with_seed(small_config(), 1).unwrap();
        system.frame();
        let before: Vec<WaterDrop> = system.fountain().live().to_vec();

        system.queue_control(Control::Quit);
        let stats = system.frame();
        assert_eq!(stats.frame, 1);
        assert_eq!((stats.spawned, stats.culled), (0, 0));
        assert_eq!(system.fountain().live(), before.as_slice());

        system.frame();
        assert_eq!(system.frame_count(), 1);
        assert_eq!(system.fountain().live(), before.as_slice());
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = ParticleSystem::with_seed(small_config(), 99).unwrap();
        let mut b = ParticleSystem::with_seed(small_config(), 99).unwrap();
        for _ in 0..30 {
            assert_eq!(a.frame(), b.frame());
        }
        assert_eq!(a.instance_data(), b.instance_data());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = small_config();
        config.smoke.capacity = 0;
        assert!(ParticleSystem::with_seed(config, 1).is_err());
    }

    #[test]
    fn runtime_system_update_runs_a_frame() {
        let mut system = ParticleSystem::with_seed(small_config(), 3).unwrap();
        system.initialize().unwrap();
        system.update(1.0 / 60.0).unwrap();
        assert_eq!(system.frame_count(), 1);
        assert_eq!(system.name(), "particles");
        system.shutdown().unwrap();
    }
}
