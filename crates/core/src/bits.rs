//! Validated bit strings and byte/bit conversion.
//!
//! This module provides `BitString`, the value every pipeline stage consumes
//! and produces. A `BitString` is an ordered sequence of binary symbols;
//! construction from text rejects anything other than `'0'`/`'1'`, so the
//! codecs downstream never re-validate symbols.
//!
//! # Bit Order
//!
//! Byte conversion is MSB-first: the octet `0x48` becomes `"01001000"`.
//! This matches the wire convention of the whole system; a receiver decoding
//! `frame_bits` back to text must walk bits the same way.
//!
//! # Example
//! ```
//! use linksim_core::bits::BitString;
//!
//! let bits = BitString::from_bytes(b"Hi");
//! assert_eq!(bits.as_str(), "0100100001101001");
//! assert_eq!(bits.to_bytes().unwrap(), b"Hi");
//! ```

use crate::error::{Error, Result};
use std::fmt;

/// An immutable, validated sequence of binary symbols.
///
/// # Invariants
/// - Every character of the backing string is exactly `'0'` or `'1'`
/// - Insertion order is significant (MSB-first values, concatenated streams)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString(String);

impl BitString {
    /// Build a bit string from its text representation.
    ///
    /// # Errors
    /// Returns `Error::InvalidSymbol` (with the offending character and its
    /// position) for any character other than `'0'` or `'1'`. Validation is
    /// eager: the first bad symbol fails the whole construction.
    pub fn from_symbols(symbols: impl Into<String>) -> Result<Self> {
        let symbols = symbols.into();
        for (position, found) in symbols.chars().enumerate() {
            if found != '0' && found != '1' {
                return Err(Error::InvalidSymbol { found, position });
            }
        }
        Ok(Self(symbols))
    }

    /// Convert an octet sequence to its binary representation, MSB first.
    ///
    /// Output length is exactly `8 × bytes.len()`. Never fails for byte input.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut symbols = String::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for shift in (0..8).rev() {
                symbols.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
            }
        }
        Self(symbols)
    }

    /// Convert back to bytes, consuming 8 bits per octet, MSB first.
    ///
    /// # Errors
    /// Returns `Error::MalformedInput` if the length is not a multiple of 8.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.len() % 8 != 0 {
            return Err(Error::MalformedInput {
                bit_len: self.len(),
                group: 8,
            });
        }

        let mut bytes = Vec::with_capacity(self.len() / 8);
        for chunk in self.0.as_bytes().chunks(8) {
            let mut byte = 0u8;
            for &symbol in chunk {
                byte = (byte << 1) | u8::from(symbol == b'1');
            }
            bytes.push(byte);
        }
        Ok(bytes)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the string holds no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the bits as booleans, in stream order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// View as the plain `0`/`1` text representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return a new bit string `self ++ other`.
    ///
    /// Neither input is modified; every stage owns a fresh value.
    pub fn concat(&self, other: &BitString) -> BitString {
        let mut symbols = String::with_capacity(self.len() + other.len());
        symbols.push_str(&self.0);
        symbols.push_str(&other.0);
        BitString(symbols)
    }

    /// Pre-sized empty buffer for encoder output.
    pub(crate) fn with_capacity(bits: usize) -> Self {
        Self(String::with_capacity(bits))
    }

    /// Append one bit. Only encoders build bit strings incrementally;
    /// values handed across stage boundaries stay immutable.
    pub(crate) fn push_bit(&mut self, bit: bool) {
        self.0.push(if bit { '1' } else { '0' });
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
