//! Deterministic random number generation
//!
//! Every randomized operation takes a `&mut GameRng`, so a single seed
//! reproduces a whole generated world.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Seedable random source shared by the generators
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent generator for a sub-stage
    ///
    /// Consumes one draw, so stages stay reproducible as long as they are
    /// derived in the same order.
    pub fn derive(&mut self) -> GameRng {
        GameRng::new(self.inner.next_u64())
    }

    /// Uniform value in [0, 1)
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform index in `0..len`
    ///
    /// `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() called with empty range");
        self.inner.gen_range(0..len)
    }

    /// Sample a normal distribution
    ///
    /// A zero deviation returns the mean; invalid parameters (negative or
    /// non-finite deviation) fall back to the mean as well.
    pub fn normal(&mut self, mean: f64, stddev: f64) -> f64 {
        // `Normal::new` accepts a negative deviation and mirrors the samples
        if !(stddev.is_finite() && stddev >= 0.0) {
            return mean;
        }
        match Normal::new(mean, stddev) {
            Ok(dist) => dist.sample(&mut self.inner),
            Err(_) => mean,
        }
    }

    /// Bernoulli trial with the given probability
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
