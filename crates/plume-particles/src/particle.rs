//! Particle types and the compacting particle store

use crate::texture::TextureHandle;
use plume_core::{Color, Vec3};

/// A fountain water drop. Liveness is positional: a drop is alive exactly
/// when it sits below its store's live count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaterDrop {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// A smoke puff
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmokeParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub alpha: f32,
    /// Bound when the puff is spawned and kept for its whole life
    pub texture: Option<TextureHandle>,
}

/// Outcome of advancing one particle by one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Dead,
}

/// Fixed-capacity store whose first `live_count` slots hold the live particles.
///
/// Removal is a swap with the last live particle, so the index of a particle
/// is only a storage slot and may change whenever something dies.
pub struct ParticleStore<P> {
    particles: Vec<P>,
    target: usize,
    live_count: usize,
}

impl<P: Clone + Default> ParticleStore<P> {
    /// Pre-allocate `capacity` slots. `target` is clamped to the capacity.
    pub fn new(capacity: usize, target: usize) -> Self {
        let mut store = Self {
            particles: vec![P::default(); capacity],
            target: 0,
            live_count: 0,
        };
        store.set_target(target);
        store
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Change the desired population. Requests above capacity are clamped, and
    /// live particles beyond the new target are dropped. Returns the target
    /// actually stored.
    pub fn set_target(&mut self, target: usize) -> usize {
        let clamped = target.min(self.capacity());
        if clamped < target {
            log::warn!(
                "population {target} exceeds capacity {}, clamping",
                self.capacity()
            );
        }
        self.target = clamped;
        self.live_count = self.live_count.min(clamped);
        clamped
    }

    /// Fill slots `live_count..min(target, capacity)` with the sampler, in
    /// slot order. Returns how many particles were spawned.
    pub fn spawn_up_to(&mut self, target: usize, mut sampler: impl FnMut(&mut P)) -> usize {
        let end = target.min(self.capacity());
        let start = self.live_count;
        while self.live_count < end {
            sampler(&mut self.particles[self.live_count]);
            self.live_count += 1;
        }
        self.live_count - start
    }

    /// Spawn up to the stored target
    pub fn top_up(&mut self, sampler: impl FnMut(&mut P)) -> usize {
        self.spawn_up_to(self.target, sampler)
    }

    /// Advance every live particle once, swap-removing those the updater
    /// reports dead. Returns how many particles died.
    ///
    /// The updater must leave a particle it reports dead untouched. After a
    /// removal the loop index does not move, so the particle swapped into the
    /// slot is also advanced this frame.
    pub fn step_and_cull(&mut self, mut updater: impl FnMut(&mut P) -> Fate) -> usize {
        let before = self.live_count;
        let mut i = 0;
        while i < self.live_count {
            match updater(&mut self.particles[i]) {
                Fate::Alive => i += 1,
                Fate::Dead => {
                    self.live_count -= 1;
                    self.particles.swap(i, self.live_count);
                }
            }
        }
        before - self.live_count
    }

    /// Forget every live particle
    pub fn clear(&mut self) {
        self.live_count = 0;
    }

    /// The live particles, for reading
    pub fn live(&self) -> &[P] {
        &self.particles[..self.live_count]
    }

    /// The live particles, mutably
    pub fn live_mut(&mut self) -> &mut [P] {
        &mut self.particles[..self.live_count]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Tagged {
        id: u32,
        doomed: bool,
        steps: u32,
    }

    fn store_with(ids: &[(u32, bool)]) -> ParticleStore<Tagged> {
        let mut store = ParticleStore::new(16, 16);
        let mut it = ids.iter();
        store.spawn_up_to(ids.len(), |p| {
            let (id, doomed) = *it.next().unwrap();
            *p = Tagged {
                id,
                doomed,
                steps: 0,
            };
        });
        store
    }

    fn kill_doomed(p: &mut Tagged) -> Fate {
        if p.doomed {
            return Fate::Dead;
        }
        p.steps += 1;
        Fate::Alive
    }

    #[test]
    fn spawn_fills_to_target() {
        let mut store: ParticleStore<Tagged> = ParticleStore::new(1000, 5);
        let mut next = 0;
        let spawned = store.top_up(|p| {
            p.id = next;
            next += 1;
        });
        assert_eq!(spawned, 5);
        assert_eq!(store.live_count(), 5);
        let ids: Vec<u32> = store.live().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        // Already full
        assert_eq!(store.top_up(|_| panic!("store is full")), 0);
    }

    #[test]
    fn spawn_never_exceeds_capacity() {
        let mut store: ParticleStore<Tagged> = ParticleStore::new(4, 4);
        assert_eq!(store.spawn_up_to(10, |_| {}), 4);
        assert_eq!(store.live_count(), 4);
        assert_eq!(store.spawn_up_to(10, |_| {}), 0);
    }

    #[test]
    fn spawn_below_live_count_is_a_no_op() {
        let mut store: ParticleStore<Tagged> = ParticleStore::new(8, 8);
        store.spawn_up_to(6, |_| {});
        assert_eq!(store.spawn_up_to(3, |_| {}), 0);
        assert_eq!(store.live_count(), 6);
    }

    #[test]
    fn target_is_clamped_to_capacity() {
        let mut store: ParticleStore<Tagged> = ParticleStore::new(10, 50);
        assert_eq!(store.target(), 10);
        assert_eq!(store.set_target(1_000_000), 10);
        assert_eq!(store.set_target(3), 3);
    }

    #[test]
    fn lowering_target_drops_surplus() {
        let mut store: ParticleStore<Tagged> = ParticleStore::new(10, 10);
        store.top_up(|_| {});
        store.set_target(4);
        assert_eq!(store.live_count(), 4);
    }

    #[test]
    fn cull_keeps_exactly_the_survivors() {
        let mut store = store_with(&[(0, false), (1, true), (2, false), (3, true), (4, false)]);
        let died = store.step_and_cull(kill_doomed);
        assert_eq!(died, 2);
        assert_eq!(store.live_count(), 3);

        let mut ids: Vec<u32> = store.live().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 2, 4]);
        // Every survivor advanced exactly once, including the ones swapped
        // into a freed slot
        assert!(store.live().iter().all(|p| p.steps == 1));
    }

    #[test]
    fn cull_reevaluates_swapped_in_particle() {
        // The last particle is swapped into slot 0 and is doomed as well
        let mut store = store_with(&[(0, true), (1, false), (2, true)]);
        store.step_and_cull(kill_doomed);
        assert_eq!(store.live_count(), 1);
        assert_eq!(store.live()[0].id, 1);
        assert_eq!(store.live()[0].steps, 1);
    }

    #[test]
    fn cull_everything() {
        let mut store = store_with(&[(0, true), (1, true), (2, true)]);
        assert_eq!(store.step_and_cull(kill_doomed), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn repeated_steps_never_grow() {
        let mut store: ParticleStore<Tagged> = ParticleStore::new(64, 64);
        let mut next = 0;
        store.top_up(|p| {
            p.id = next;
            next += 1;
        });
        let mut previous = store.live_count();
        for round in 0..8u32 {
            // Particles die once their id is divisible by the round number
            store.step_and_cull(|p| {
                if round > 0 && p.id % (round + 1) == 0 {
                    Fate::Dead
                } else {
                    Fate::Alive
                }
            });
            assert!(store.live_count() <= previous);
            previous = store.live_count();
        }
    }

    #[test]
    fn clear_empties_store() {
        let mut store: ParticleStore<Tagged> = ParticleStore::new(8, 8);
        store.top_up(|_| {});
        store.clear();
        assert!(store.live().is_empty());
        assert_eq!(store.capacity(), 8);
    }
}
