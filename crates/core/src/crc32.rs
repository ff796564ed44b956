//! Bit-serial CRC-32 checksum.
//!
//! Parameterization: polynomial `0x04C11DB7`, initial register `0xFFFFFFFF`,
//! final XOR `0xFFFFFFFF`, no input or output reflection.
//!
//! # Caution: non-reflected variant
//!
//! This is IEEE 802.3's polynomial but *without* the bit reversal most
//! libraries apply (zlib's `crc32`, the `crc32fast` crate). Emitter and
//! receiver in this system agree on the convention, so it is self-consistent,
//! but checksums here will not match a standard reflected CRC-32. Do not
//! swap this implementation for a table-driven library routine.
//!
//! # Algorithm
//!
//! A 32-bit linear-feedback shift register seeded to all-ones consumes the
//! message one bit at a time: feedback is the register's MSB XOR the input
//! bit, the register shifts left, and when feedback is set the polynomial is
//! XORed in. The register is inverted once after the last bit.

use crate::bits::BitString;

/// Generator polynomial (IEEE 802.3), MSB-first form.
const POLY: u32 = 0x04C1_1DB7;

/// Initial shift-register value.
const INIT: u32 = 0xFFFF_FFFF;

/// Final inversion applied after the last input bit.
const XOR_OUT: u32 = 0xFFFF_FFFF;

/// A computed 32-bit checksum.
///
/// Rendered in two views: 32 MSB-first bits for the wire, and eight
/// uppercase hex digits for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32Value(pub u32);

impl Crc32Value {
    /// Render as exactly 32 bits, most significant bit first.
    pub fn to_bits(self) -> BitString {
        let mut out = BitString::with_capacity(32);
        for shift in (0..32).rev() {
            out.push_bit((self.0 >> shift) & 1 == 1);
        }
        out
    }

    /// Render as eight uppercase hex digits (no `0x` prefix).
    pub fn to_hex(self) -> String {
        format!("{:08X}", self.0)
    }
}

impl std::fmt::Display for Crc32Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Compute the CRC-32 of a bit sequence, in stream order.
///
/// Pure function of its input: no state survives between calls, identical
/// input always yields an identical value. Symbol validity is guaranteed by
/// `BitString` construction.
pub fn compute(message: &BitString) -> Crc32Value {
    let register = message.bits().fold(INIT, |crc, bit| {
        let top = (crc >> 31) & 1 == 1;
        let feedback = top ^ bit;
        let shifted = crc << 1;
        if feedback {
            shifted ^ POLY
        } else {
            shifted
        }
    });
    Crc32Value(register ^ XOR_OUT)
}

/// Append the message's checksum to form a checksummed frame.
///
/// The frame layout is `message ++ crc_bits` (32 trailing bits). The
/// receiver recomputes the CRC over the leading bits and compares it with
/// the trailing 32 to detect corruption.
pub fn append_checksum(message: &BitString) -> BitString {
    message.concat(&compute(message).to_bits())
}
