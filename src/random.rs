//! Seeded random source for reproducible maze generation.
//!
//! Every randomized decision taken while building a maze goes through [`DeterministicRandom`], so
//! a seed fully determines the layout that comes out of the generators.

use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

/// Seeded pseudo-random source.
///
/// Wraps a ChaCha8 stream. Two instances built from the same seed yield the same sequence for the
/// same sequence of calls.
#[derive(Clone, Debug)]
pub struct DeterministicRandom {
    /// Underlying stream cipher based generator.
    rng: ChaCha8Rng,
    /// Seed the generator was built from.
    seed: u64,
}

impl DeterministicRandom {
    /// Creates a random source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed this source was built from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns an integer in `lo..=hi`.
    ///
    /// A range holding at most one value (`hi <= lo`) yields `lo` without consuming randomness.
    ///
    /// Draws are taken as `u32` whenever both bounds fit, which covers every maze up to
    /// [`MAX_DIMENSION`](crate::config::MAX_DIMENSION), so the stream is consumed the same way on
    /// 32-bit and 64-bit targets. Wider ranges fall back to `u64` draws.
    pub fn next_in_range(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }

        if let (Ok(low), Ok(high)) = (u32::try_from(lo), u32::try_from(hi)) {
            return usize::try_from(self.rng.gen_range(low..=high)).unwrap_or(lo);
        }

        match (u64::try_from(lo), u64::try_from(hi)) {
            (Ok(low), Ok(high)) => usize::try_from(self.rng.gen_range(low..=high)).unwrap_or(lo),
            _ => lo,
        }
    }

    /// Shuffles `items` in place.
    ///
    /// Forward Fisher-Yates: for every index `i` a partner is drawn from `i..len` and the two are
    /// swapped. All randomized orderings in the crate use this routine.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let Some(last) = items.len().checked_sub(1) else {
            return;
        };

        for i in 0..items.len() {
            let j = self.next_in_range(i, last);
            items.swap(i, j);
        }
    }
}
