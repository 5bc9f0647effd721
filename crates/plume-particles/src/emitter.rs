//! Emitter policies and the emitter that pairs a policy with its store

use crate::environment::Environment;
use crate::particle::{Fate, ParticleStore};
use crate::rand::ParticleRng;

/// Which of the two emitters a piece of data belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmitterKind {
    Fountain,
    Smoke,
}

impl EmitterKind {
    pub fn name(self) -> &'static str {
        match self {
            EmitterKind::Fountain => "fountain",
            EmitterKind::Smoke => "smoke",
        }
    }
}

/// Per-emitter rules for how particles are born, move, and die
pub trait EmitterPolicy {
    type Particle: Clone + Default;

    /// Overwrite `particle` with a freshly sampled initial state
    fn spawn(&mut self, rng: &mut ParticleRng, env: &Environment, particle: &mut Self::Particle);

    /// Advance `particle` by one frame. The death check comes first: a
    /// particle reported `Dead` has not been modified.
    fn update(
        &self,
        rng: &mut ParticleRng,
        env: &Environment,
        particle: &mut Self::Particle,
    ) -> Fate;
}

/// A particle source: one policy and the store it fills
pub struct Emitter<E: EmitterPolicy> {
    pub kind: EmitterKind,
    pub policy: E,
    pub store: ParticleStore<E::Particle>,
}

impl<E: EmitterPolicy> Emitter<E> {
    pub fn new(kind: EmitterKind, policy: E, capacity: usize, target: usize) -> Self {
        Self {
            kind,
            policy,
            store: ParticleStore::new(capacity, target),
        }
    }

    /// Top the store up to `target` live particles. Returns how many spawned.
    pub fn spawn(&mut self, rng: &mut ParticleRng, env: &Environment, target: usize) -> usize {
        self.store.set_target(target);
        let policy = &mut self.policy;
        self.store.top_up(|p| policy.spawn(rng, env, p))
    }

    /// Advance every live particle, culling the dead. Returns how many died.
    pub fn progress(&mut self, rng: &mut ParticleRng, env: &Environment) -> usize {
        let policy = &self.policy;
        self.store.step_and_cull(|p| policy.update(rng, env, p))
    }

    pub fn live_count(&self) -> usize {
        self.store.live_count()
    }

    pub fn live(&self) -> &[E::Particle] {
        self.store.live()
    }
}
