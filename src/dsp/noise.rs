//! A tiny uniform noise floor.
//!
//! A resonant ladder fed exact digital silence has nothing to ring on, so the
//! host adds noise around 1e-6 (-120 dB) to every input sample. The generator
//! is seeded so renders are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_NOISE_LEVEL: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: StdRng,
    seed: u64,
    level: f32,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self::with_level(seed, DEFAULT_NOISE_LEVEL)
    }

    pub fn with_level(seed: u64, level: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            level,
        }
    }

    /// Uniform sample in `[-level, level)`.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.level == 0.0 {
            return 0.0;
        }
        let r: f32 = self.rng.gen();
        self.level * (2.0 * r - 1.0)
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Restart the sequence from the current seed.
    pub fn restart(&mut self) {
        self.reseed(self.seed);
    }

    pub fn set_level(&mut self, level: f32) {
        self.level = level;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
