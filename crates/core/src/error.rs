//! Error types for the linksim system.
//!
//! All operations return structured errors rather than panicking.
//! Every failure is detected eagerly at the boundary of the offending
//! operation; the core performs no I/O and has no transient failure modes,
//! so nothing here is ever retried.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit strings: characters other than `0`/`1`, or bad grouping
/// - Hamming: block size outside the supported range
/// - Noise: probability outside `[0, 1]`
/// - Framing: empty message, or envelope serialization failure
#[derive(Debug, Error)]
pub enum Error {
    /// A bit string contained a character other than `0` or `1`
    #[error("invalid symbol {found:?} at position {position}: expected '0' or '1'")]
    InvalidSymbol { found: char, position: usize },

    /// Bit length incompatible with the expected grouping
    /// (e.g. not a multiple of 8 when decoding back to bytes)
    #[error("malformed input: {bit_len} bits is not a multiple of {group}")]
    MalformedInput { bit_len: usize, group: usize },

    /// Hamming block size outside the supported range `1..=64`
    #[error("invalid block size {0}: k must be in 1..=64")]
    InvalidBlockSize(usize),

    /// Bit-flip probability outside `[0.0, 1.0]`
    #[error("invalid probability {0}: must be within [0.0, 1.0]")]
    InvalidProbability(f64),

    /// Zero-length message text
    #[error("empty message: nothing to encode")]
    EmptyMessage,

    /// Transport record could not be serialized
    #[error("envelope serialization error: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
