//! Injectable randomness
//!
//! Spawn points, headings and hole timing all draw from a [`RandomSource`],
//! so a seeded source reproduces a round exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform floats in [0, 1)
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform in [base - jitter, base + jitter]
    fn jittered(&mut self, base: f32, jitter: f32) -> f32 {
        base + (self.next_f32() * 2.0 - 1.0) * jitter
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Seeded PCG source
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
///
/// Lets hosts and tests pin spawn points and hole timing exactly.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f32>,
    next: usize,
}

impl SequenceRng {
    /// Values are clamped into [0, 1); an empty list always yields 0
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, next: 0 }
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        let Some(&v) = self.values.get(self.next) else {
            return 0.0;
        };
        self.next = (self.next + 1) % self.values.len();
        v
    }
}
