//! Injectable randomness for trade and inquiry fields
//!
//! Feeds never reach for a global RNG. Every random draw goes through a
//! [`RandomSource`], so a seeded source makes whole runs reproducible and
//! tests can script exact draws.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Letters drawn for trade IDs
pub const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Source of the random draws a feed needs
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`; returns `lo` when `hi < lo`
    fn range_inclusive(&mut self, lo: u64, hi: u64) -> u64;

    /// Fill `buf` with random bytes
    fn fill_bytes(&mut self, buf: &mut [u8]);

    /// Uniform index into a collection of `len` items; callers pass `len > 0`
    fn pick_index(&mut self, len: usize) -> usize {
        self.range_inclusive(0, len.saturating_sub(1) as u64) as usize
    }

    /// ASCII letters only
    fn alpha_string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(ID_ALPHABET[self.pick_index(ID_ALPHABET.len())]))
            .collect()
    }
}

/// [`StdRng`] seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent stream for one named consumer of the run seed
    ///
    /// Lets each feed draw from its own sequence, so selecting a subset of
    /// feeds does not shift the values of the others.
    pub fn for_stream(seed: u64, stream: &str) -> Self {
        // FNV-1a over the stream name
        let salt = stream.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        });
        Self::new(seed ^ salt)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn range_inclusive(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn fill_bytes(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }
}
