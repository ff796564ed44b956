//! Binary symmetric channel: independent per-bit noise.
//!
//! Every bit of a frame is flipped independently with probability `p`,
//! modeling the classic binary symmetric channel. Frame length is preserved
//! exactly; nothing else about the frame's structure survives.
//!
//! # Determinism
//!
//! The randomness source is injected, not hardwired: any `rand::Rng` works,
//! and `NoiseChannel::seeded` provides a ChaCha8 generator for reproducible
//! runs. Given the same seed and input, the flipped positions are
//! bit-identical. Each channel owns its generator, so concurrent frame
//! builds never share RNG state.

use crate::bits::BitString;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A noisy channel that corrupts frames with i.i.d. Bernoulli bit flips.
#[derive(Debug)]
pub struct NoiseChannel<R: Rng> {
    rng: R,
}

impl NoiseChannel<ChaCha8Rng> {
    /// Create a channel with a seeded ChaCha8 generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> NoiseChannel<R> {
    /// Create a channel around an externally constructed generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Corrupt a frame: flip each bit independently with probability `p`.
    ///
    /// `p = 0.0` returns a frame equal to the input; `p = 1.0` returns its
    /// bitwise complement (the flip roll samples `[0, 1)`, so both edges
    /// fall out of the comparison without special cases).
    ///
    /// # Errors
    /// Returns `Error::InvalidProbability` when `p` is outside `[0.0, 1.0]`
    /// (NaN included).
    pub fn apply(&mut self, frame: &BitString, p: f64) -> Result<BitString> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability(p));
        }

        let mut out = BitString::with_capacity(frame.len());
        for bit in frame.bits() {
            let roll: f64 = self.rng.gen();
            out.push_bit(bit ^ (roll < p));
        }
        Ok(out)
    }
}
