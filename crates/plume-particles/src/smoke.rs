//! Smoke: buoyant puffs pushed around by chaotic motion and wind, fading out

use crate::config::SmokeConfig;
use crate::emitter::EmitterPolicy;
use crate::environment::Environment;
use crate::particle::{Fate, SmokeParticle};
use crate::rand::ParticleRng;
use crate::texture::TexturePool;
use plume_core::{Color, Vec3};

pub struct SmokePolicy {
    pub config: SmokeConfig,
    textures: TexturePool,
    /// Number of puffs spawned so far, used to hand out textures in turn
    spawned: u64,
}

impl SmokePolicy {
    pub fn new(config: SmokeConfig, textures: TexturePool) -> Self {
        Self {
            config,
            textures,
            spawned: 0,
        }
    }

    pub fn textures(&self) -> &TexturePool {
        &self.textures
    }
}

impl EmitterPolicy for SmokePolicy {
    type Particle = SmokeParticle;

    fn spawn(&mut self, rng: &mut ParticleRng, env: &Environment, puff: &mut SmokeParticle) {
        let config = &self.config;
        let tint = env.smoke_tint;

        puff.position = Vec3::new(
            config.origin.x + rng.uniform(config.spawn_area),
            config.origin.y,
            config.origin.z + rng.uniform(config.spawn_area),
        );
        puff.velocity = Vec3::new(
            0.0,
            rng.gaussian(config.speed_mean, config.speed_std_dev),
            0.0,
        );
        puff.color = Color::new(
            rng.gaussian(tint.r, config.color_std_dev),
            rng.gaussian(tint.g, config.color_std_dev),
            rng.gaussian(tint.b, config.color_std_dev),
        );
        puff.alpha = rng.gaussian(config.alpha_mean, config.alpha_std_dev);
        puff.texture = self.textures.pick(self.spawned);
        self.spawned += 1;
    }

    fn update(&self, rng: &mut ParticleRng, env: &Environment, puff: &mut SmokeParticle) -> Fate {
        let config = &self.config;
        let threshold = config.death_threshold;
        if puff.color.all_at_or_below(threshold) || puff.alpha <= threshold {
            return Fate::Dead;
        }

        puff.position += puff.velocity;
        // Smoke crawls along the ground instead of sinking through it
        if puff.position.y < config.origin.y {
            puff.position.y = config.origin.y;
        }

        let height = puff.position.y;
        let (wind_x, wind_z) = env.wind.vector();
        let (chaos_x, chaos_z) = rng.gaussian_pair(0.0, env.chaos_speed);
        puff.velocity.x += chaos_x + height * wind_x;
        puff.velocity.z += chaos_z + height * wind_z;
        puff.velocity.y += config.mass * env.gravity
            + rng.gaussian(0.0, env.chaos_speed * config.chaos_vertical_multiplier);

        let shade = rng.gaussian(config.shade_change_mean, config.shade_change_std_dev);
        puff.color.r -= shade;
        puff.color.g -= shade;
        puff.color.b -= shade;
        puff.alpha -= config.alpha_decay;

        Fate::Alive
    }
}
