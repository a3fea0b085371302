//! Random source used for body placement and gas velocities.
//!
//! Anything implementing `rand::Rng` is a `RandomSource`, so tests can hand in
//! a seeded `StdRng` and get reproducible layouts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use super::states::NVec2;

pub trait RandomSource {
    /// Uniform sample in `[min, max)`; returns `min` when the range is empty
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Gaussian sample
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.gen_range(min..max)
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        if std_dev == 0.0 {
            return mean;
        }
        // Box-Muller, u1 kept away from 0 so ln stays finite
        let u1: f64 = 1.0 - self.gen::<f64>();
        let u2: f64 = self.gen::<f64>();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + std_dev * z
    }
}

/// Deterministic generator for a scenario seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Initial gas velocity: each component ~ N(0, sqrt(temperature))
pub fn random_velocity<R: RandomSource + ?Sized>(rng: &mut R, temperature: f64) -> NVec2 {
    let sigma = temperature.max(0.0).sqrt();
    NVec2::new(rng.normal(0.0, sigma), rng.normal(0.0, sigma))
}
