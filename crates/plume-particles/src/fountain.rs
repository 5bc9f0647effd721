//! Water fountain: drops launched upward that fall back under gravity

use crate::config::FountainConfig;
use crate::emitter::EmitterPolicy;
use crate::environment::Environment;
use crate::particle::{Fate, WaterDrop};
use crate::rand::ParticleRng;

pub struct FountainPolicy {
    pub config: FountainConfig,
}

impl FountainPolicy {
    pub fn new(config: FountainConfig) -> Self {
        Self { config }
    }
}

impl EmitterPolicy for FountainPolicy {
    type Particle = WaterDrop;

    fn spawn(&mut self, rng: &mut ParticleRng, _env: &Environment, drop: &mut WaterDrop) {
        let config = &self.config;
        // Both sideways components come from one Box–Muller pair
        let (x, z) = rng.gaussian_pair(0.0, config.side_splash_std_dev);
        let y = rng.gaussian(config.speed_mean, config.speed_std_dev);

        drop.position = config.origin;
        drop.velocity.x = x;
        drop.velocity.y = y;
        drop.velocity.z = z;
    }

    fn update(&self, _rng: &mut ParticleRng, env: &Environment, drop: &mut WaterDrop) -> Fate {
        let height = drop.position.y;
        if height < self.config.origin.y || height > self.config.ceiling {
            return Fate::Dead;
        }

        drop.position += drop.velocity;
        drop.velocity.y += self.config.mass * env.gravity;
        Fate::Alive
    }
}
