//! Uniform and Gaussian variates for stochastic particle behaviour
//!
//! Each `ParticleRng` owns its bit source and its own pending Gaussian draw,
//! so two simulations (or two threads) never share sampling state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct ParticleRng {
    rng: SmallRng,
    /// Second variate of the last Box–Muller pair produced by `gaussian`
    secondary: Option<f32>,
}

impl ParticleRng {
    /// A reproducible generator
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            secondary: None,
        }
    }

    /// A generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            secondary: None,
        }
    }

    /// Returns a value in [-1, 1)
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>() * 2.0 - 1.0
    }

    /// Returns a value uniformly distributed in [-range, range]
    pub fn uniform(&mut self, range: f32) -> f32 {
        (self.unit() * f64::from(range)) as f32
    }

    /// Two independent draws from Normal(mean, std_dev), produced by one
    /// accepted trial of the polar Box–Muller method.
    pub fn gaussian_pair(&mut self, mean: f32, std_dev: f32) -> (f32, f32) {
        let (mean, std_dev) = (f64::from(mean), f64::from(std_dev));
        loop {
            let u1 = self.unit();
            let u2 = self.unit();
            let s = u1 * u1 + u2 * u2;
            // s == 0 would put ln(0) / 0 into the transform
            if s <= 0.0 || s >= 1.0 {
                continue;
            }
            let w = (-2.0 * s.ln() / s).sqrt();
            return (
                (u1 * w * std_dev + mean) as f32,
                (u2 * w * std_dev + mean) as f32,
            );
        }
    }

    /// One draw from Normal(mean, std_dev). The other half of the pair is kept
    /// and can be claimed with [`take_secondary`](Self::take_secondary).
    pub fn gaussian(&mut self, mean: f32, std_dev: f32) -> f32 {
        let (primary, secondary) = self.gaussian_pair(mean, std_dev);
        self.secondary = Some(secondary);
        primary
    }

    /// Claim the pending second variate from the last `gaussian` call. It was
    /// drawn with that call's mean and standard deviation.
    ///
    /// This is for callers outside the crate that sample one value at a time.
    /// The fountain and smoke policies take both halves at once through
    /// [`gaussian_pair`](Self::gaussian_pair) and never read the cache.
    pub fn take_secondary(&mut self) -> Option<f32> {
        self.secondary.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_and_std_dev(samples: &[f32]) -> (f64, f64) {
        let n = samples.len() as f64;
        let mean = samples.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        let var = samples
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / n;
        (mean, var.sqrt())
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = ParticleRng::new(42);
        for range in [0.25f32, 1.0, 15.0] {
            for _ in 0..10_000 {
                let v = rng.uniform(range);
                assert!(v >= -range && v <= range, "{v} outside ±{range}");
            }
        }
    }

    #[test]
    fn uniform_covers_both_signs() {
        let mut rng = ParticleRng::new(7);
        let samples: Vec<f32> = (0..1000).map(|_| rng.uniform(1.0)).collect();
        assert!(samples.iter().any(|&v| v < -0.5));
        assert!(samples.iter().any(|&v| v > 0.5));
    }

    #[test]
    fn standard_normal_statistics() {
        let mut rng = ParticleRng::new(1234);
        let samples: Vec<f32> = (0..100_000).map(|_| rng.gaussian(0.0, 1.0)).collect();
        let (mean, std_dev) = mean_and_std_dev(&samples);
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((std_dev - 1.0).abs() < 0.05, "std dev {std_dev}");
    }

    #[test]
    fn shifted_normal_statistics() {
        let mut rng = ParticleRng::new(99);
        let samples: Vec<f32> = (0..100_000).map(|_| rng.gaussian(11.0, 1.2)).collect();
        let (mean, std_dev) = mean_and_std_dev(&samples);
        assert!((mean - 11.0).abs() < 0.05, "mean {mean}");
        assert!((std_dev - 1.2).abs() < 0.05, "std dev {std_dev}");
    }

    #[test]
    fn secondary_draws_are_normal_too() {
        let mut rng = ParticleRng::new(5);
        let samples: Vec<f32> = (0..100_000)
            .map(|_| {
                rng.gaussian(0.0, 1.0);
                rng.take_secondary().unwrap()
            })
            .collect();
        let (mean, std_dev) = mean_and_std_dev(&samples);
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((std_dev - 1.0).abs() < 0.05, "std dev {std_dev}");
    }

    #[test]
    fn secondary_is_consumed_once() {
        let mut rng = ParticleRng::new(3);
        assert_eq!(rng.take_secondary(), None);
        rng.gaussian(0.0, 1.0);
        assert!(rng.take_secondary().is_some());
        assert_eq!(rng.take_secondary(), None);
    }

    #[test]
    fn gaussian_matches_pair_for_same_seed() {
        let mut a = ParticleRng::new(2024);
        let mut b = ParticleRng::new(2024);
        let primary = a.gaussian(0.0, 0.25);
        let secondary = a.take_secondary().unwrap();
        assert_eq!((primary, secondary), b.gaussian_pair(0.0, 0.25));
    }

    #[test]
    fn zero_std_dev_returns_mean() {
        let mut rng = ParticleRng::new(11);
        let (a, b) = rng.gaussian_pair(0.7, 0.0);
        assert_eq!(a, 0.7);
        assert_eq!(b, 0.7);
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let mut a = ParticleRng::new(42);
        let mut b = ParticleRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform(3.0), b.uniform(3.0));
            assert_eq!(a.gaussian(1.0, 2.0), b.gaussian(1.0, 2.0));
        }
    }
}
