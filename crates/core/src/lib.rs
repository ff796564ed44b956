//! linksim-core: Educational link-layer error-control pipeline
//!
//! This library provides the core components for a learning-focused system that:
//! - Converts text messages to an MSB-first bitstream
//! - Protects the stream with CRC-32 (detection) or Hamming SEC (correction)
//! - Corrupts frames with an independent per-bit noise process
//! - Packages the result into a transport-ready record
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bits`: Validated bit strings and byte/bit conversion
//! - `crc32`: Bit-serial CRC-32 checksum (non-reflected variant)
//! - `hamming`: Hamming single-error-correcting block encoder
//! - `noise`: Binary symmetric channel with seeded randomness
//! - `frame`: Stage-by-stage frame construction and the wire envelope
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Exact bit semantics**: A decoder written from the wire format alone
//!   must reproduce every checksum and parity bit
//! - **Deterministic**: Seeded randomness makes noisy runs reproducible
//! - **No I/O**: Delivery over a socket belongs to the caller, not the core

pub mod bits;
pub mod crc32;
pub mod error;
pub mod frame;
pub mod hamming;
pub mod noise;

// Re-export commonly used types
pub use error::{Error, Result};
