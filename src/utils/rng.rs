//! Deterministic seeding and RNG utilities.
//!
//! A rollout usually needs more than one independent stream (the environment,
//! the policy, a noise process). `SeedSequence` derives those streams from a
//! single root seed so that one number reproduces the whole run.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default RNG stream used across the crate.
pub type RngStream = ChaCha8Rng;

/// Expands a root seed into a deterministic sequence of sub-seeds (SplitMix64).
#[derive(Clone, Debug)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next sub-seed in the sequence.
    pub fn next_subseed(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// A fresh stream seeded from the next sub-seed.
    pub fn next_rng(&mut self) -> RngStream {
        RngStream::seed_from_u64(self.next_subseed())
    }
}

pub fn rng_from_seed(seed: u64) -> RngStream {
    RngStream::seed_from_u64(seed)
}
