//! Synthetic observations from a fixed nonlinear ground truth.
//!
//! All randomness flows through a single `StdRng` seeded once per run and
//! passed by `&mut`. The draw order for a full run is:
//!
//! 1. training inputs (uniform)
//! 2. training noise (standard normal)
//! 3. held-out inputs (uniform)
//! 4. held-out noise (standard normal)
//!
//! Noiseless evaluations never touch the stream.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

use crate::domain::SampleSet;
use crate::math::eval_polynomial;

/// The "unknown" prediction mechanism:
/// `f(x) = x - 0.1 x² - x³ + 0.1 x⁵`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundTruth;

impl GroundTruth {
    /// Coefficients in ascending power order.
    pub const COEFFICIENTS: [f64; 6] = [0.0, 1.0, -0.1, -1.0, 0.0, 0.1];

    /// Noiseless value at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        eval_polynomial(&Self::COEFFICIENTS, x)
    }

    /// Noiseless values at every input.
    pub fn eval_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    /// Observed values `f(x_i) + noise_scale * ε_i` with `ε_i ~ N(0, 1)`.
    ///
    /// With `noise_scale == 0` no normal draws are taken.
    pub fn observe<R: Rng + ?Sized>(&self, xs: &[f64], noise_scale: f64, rng: &mut R) -> Vec<f64> {
        if noise_scale == 0.0 {
            return self.eval_all(xs);
        }
        xs.iter()
            .map(|&x| {
                let eps: f64 = rng.sample(StandardNormal);
                self.eval(x) + noise_scale * eps
            })
            .collect()
    }
}

/// Create the run's random source.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draw `n` inputs uniformly from `[low, high)`.
pub fn uniform_inputs<R: Rng + ?Sized>(n: usize, range: (f64, f64), rng: &mut R) -> Vec<f64> {
    let (low, high) = range;
    (0..n).map(|_| rng.gen_range(low..high)).collect()
}

/// Draw inputs, then noisy observations at those inputs.
pub fn generate_sample<R: Rng + ?Sized>(
    truth: &GroundTruth,
    n: usize,
    range: (f64, f64),
    noise_scale: f64,
    rng: &mut R,
) -> SampleSet {
    let x = uniform_inputs(n, range, rng);
    let y = truth.observe(&x, noise_scale, rng);
    SampleSet { x, y }
}

/// `n` evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| {
                let u = i as f64 / (n as f64 - 1.0);
                start + u * (end - start)
            })
            .collect(),
    }
}
