//! Stage-by-stage frame construction and the wire envelope.
//!
//! A frame moves through five states:
//!
//! ```text
//! Idle -> MessageLoaded -> Encoded -> Noised -> Framed
//! ```
//!
//! Each state is its own type and every transition consumes its input, so a
//! stale stage can never be replayed or mutated after hand-off. The terminal
//! product is a [`TransportRecord`], one JSON object per line:
//!
//! ```text
//! {"msg_ascii_len":2,"algo":"CRC32","frame_bits":"0100..."}
//! {"msg_ascii_len":2,"algo":"HAMMING","frame_bits":"0110...","k":4,"pad_bits":3,"r":3}
//! ```
//!
//! Hamming records carry `k`, `pad_bits`, and `r` because block boundaries
//! and padding cannot be recovered from the bitstream alone. The transport
//! collaborator treats the line as an opaque byte sequence; connection
//! lifecycle is its problem, not this module's.

use crate::bits::BitString;
use crate::crc32::{self, Crc32Value};
use crate::error::{Error, Result};
use crate::hamming::{self, BlockParams};
use crate::noise::NoiseChannel;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Error-control code selector, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CodeId {
    Crc32,
    Hamming,
}

impl std::fmt::Display for CodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeId::Crc32 => f.write_str("CRC32"),
            CodeId::Hamming => f.write_str("HAMMING"),
        }
    }
}

/// Code selection plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Append a 32-bit checksum to the message
    Crc32,
    /// Encode the message as Hamming SEC blocks of `k` data bits
    Hamming { k: usize },
}

impl Algorithm {
    /// The wire identifier for this algorithm.
    pub fn id(&self) -> CodeId {
        match self {
            Algorithm::Crc32 => CodeId::Crc32,
            Algorithm::Hamming { .. } => CodeId::Hamming,
        }
    }
}

/// Code-specific facts produced by the encoding stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeDetail {
    /// The computed checksum (for display in both views)
    Crc32 { value: Crc32Value },
    /// Block dimensions and final-chunk padding
    Hamming { params: BlockParams, pad_bits: usize },
}

/// Idle state: the pipeline's entry point.
pub struct FrameBuilder;

impl FrameBuilder {
    /// `Idle -> MessageLoaded`: accept message text and convert it to bits.
    ///
    /// # Errors
    /// Returns `Error::EmptyMessage` for zero-length text.
    pub fn load_message(text: &str) -> Result<MessageLoaded> {
        if text.is_empty() {
            return Err(Error::EmptyMessage);
        }
        Ok(MessageLoaded {
            msg_ascii_len: text.len(),
            bits: BitString::from_bytes(text.as_bytes()),
        })
    }
}

/// A message converted to its MSB-first bitstream.
#[derive(Debug, Clone)]
pub struct MessageLoaded {
    msg_ascii_len: usize,
    bits: BitString,
}

impl MessageLoaded {
    /// The message bitstream (8 bits per input byte).
    pub fn bits(&self) -> &BitString {
        &self.bits
    }

    /// `MessageLoaded -> Encoded`: apply the selected error-control code.
    ///
    /// # Errors
    /// Returns `Error::InvalidBlockSize` for a Hamming `k` outside `1..=64`.
    pub fn encode(self, algorithm: Algorithm) -> Result<Encoded> {
        let (frame, detail) = match algorithm {
            Algorithm::Crc32 => {
                let value = crc32::compute(&self.bits);
                (self.bits.concat(&value.to_bits()), CodeDetail::Crc32 { value })
            }
            Algorithm::Hamming { k } => {
                let stream = hamming::encode_stream(&self.bits, k)?;
                (
                    stream.frame,
                    CodeDetail::Hamming {
                        params: stream.params,
                        pad_bits: stream.pad_bits,
                    },
                )
            }
        };

        Ok(Encoded {
            msg_ascii_len: self.msg_ascii_len,
            code: algorithm.id(),
            frame,
            detail,
        })
    }
}

/// A frame carrying error-control redundancy, before channel noise.
#[derive(Debug, Clone)]
pub struct Encoded {
    msg_ascii_len: usize,
    code: CodeId,
    frame: BitString,
    detail: CodeDetail,
}

impl Encoded {
    /// The clean encoded frame.
    pub fn frame(&self) -> &BitString {
        &self.frame
    }

    /// Code-specific facts (checksum value or block dimensions).
    pub fn detail(&self) -> CodeDetail {
        self.detail
    }

    /// Redundancy overhead as a percentage: of the whole frame for CRC-32,
    /// of each block for Hamming (every block has the same ratio).
    pub fn overhead_percent(&self) -> f64 {
        match self.detail {
            CodeDetail::Crc32 { .. } => 100.0 * 32.0 / self.frame.len() as f64,
            CodeDetail::Hamming { params, .. } => params.overhead_percent(),
        }
    }

    /// `Encoded -> Noised`: pass the frame through the noisy channel.
    ///
    /// The clean frame is retained alongside the noisy one so callers can
    /// report both.
    ///
    /// # Errors
    /// Returns `Error::InvalidProbability` when `p` is outside `[0.0, 1.0]`.
    pub fn add_noise<R: Rng>(self, channel: &mut NoiseChannel<R>, p: f64) -> Result<Noised> {
        let noisy = channel.apply(&self.frame, p)?;
        Ok(Noised {
            msg_ascii_len: self.msg_ascii_len,
            code: self.code,
            clean: self.frame,
            noisy,
            detail: self.detail,
        })
    }
}

/// A frame after channel corruption, ready for packaging.
#[derive(Debug, Clone)]
pub struct Noised {
    msg_ascii_len: usize,
    code: CodeId,
    clean: BitString,
    noisy: BitString,
    detail: CodeDetail,
}

impl Noised {
    /// The frame as encoded, before noise.
    pub fn clean(&self) -> &BitString {
        &self.clean
    }

    /// The frame after per-bit corruption.
    pub fn noisy(&self) -> &BitString {
        &self.noisy
    }

    /// `Noised -> Framed`: produce the transport-ready record.
    ///
    /// Terminal transition; no further mutation happens inside the core.
    pub fn finish(self) -> TransportRecord {
        let (k, pad_bits, r) = match self.detail {
            CodeDetail::Crc32 { .. } => (None, None, None),
            CodeDetail::Hamming { params, pad_bits } => {
                (Some(params.k), Some(pad_bits), Some(params.r))
            }
        };

        TransportRecord {
            msg_ascii_len: self.msg_ascii_len,
            algo: self.code,
            frame_bits: self.noisy.as_str().to_owned(),
            k,
            pad_bits,
            r,
        }
    }
}

/// The serialized envelope handed to the transport collaborator.
///
/// CRC-32 records omit the three Hamming metadata fields entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRecord {
    /// Original message length in bytes
    pub msg_ascii_len: usize,
    /// Which code protected the frame
    pub algo: CodeId,
    /// The noisy frame, as a `0`/`1` string
    pub frame_bits: String,
    /// Hamming data-block size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
    /// Zero bits appended to the final Hamming chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_bits: Option<usize>,
    /// Parity bits per Hamming block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<usize>,
}

impl TransportRecord {
    /// Serialize as a single newline-terminated JSON line.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    /// Parse a received line back into a record.
    pub fn from_line(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line.trim_end())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_rejected() {
        assert!(matches!(
            FrameBuilder::load_message(""),
            Err(Error::EmptyMessage)
        ));
    }

    #[test]
    fn test_load_message_bits() {
        let loaded = FrameBuilder::load_message("Hi").unwrap();
        assert_eq!(loaded.bits().as_str(), "0100100001101001");
    }

    #[test]
    fn test_crc_encode_stage() {
        let encoded = FrameBuilder::load_message("Hi")
            .unwrap()
            .encode(Algorithm::Crc32)
            .unwrap();

        assert_eq!(encoded.frame().len(), 48);
        match encoded.detail() {
            CodeDetail::Crc32 { value } => assert_eq!(value.0, 0xBA2A_8204),
            other => panic!("unexpected detail {other:?}"),
        }
        assert!((encoded.overhead_percent() - 100.0 * 32.0 / 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_hamming_encode_stage() {
        let encoded = FrameBuilder::load_message("Hi")
            .unwrap()
            .encode(Algorithm::Hamming { k: 4 })
            .unwrap();

        // 16 message bits, k=4 -> 4 blocks of 7 bits, no padding
        assert_eq!(encoded.frame().len(), 28);
        match encoded.detail() {
            CodeDetail::Hamming { params, pad_bits } => {
                assert_eq!(params.k, 4);
                assert_eq!(params.r, 3);
                assert_eq!(pad_bits, 0);
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_hamming_bad_k_propagates() {
        let result = FrameBuilder::load_message("Hi")
            .unwrap()
            .encode(Algorithm::Hamming { k: 65 });
        assert!(matches!(result, Err(Error::InvalidBlockSize(65))));
    }

    #[test]
    fn test_noiseless_pipeline_preserves_frame() {
        let encoded = FrameBuilder::load_message("Hi")
            .unwrap()
            .encode(Algorithm::Crc32)
            .unwrap();
        let clean = encoded.frame().clone();

        let mut channel = NoiseChannel::seeded(42);
        let noised = encoded.add_noise(&mut channel, 0.0).unwrap();
        assert_eq!(noised.noisy(), &clean);
        assert_eq!(noised.clean(), &clean);
    }

    #[test]
    fn test_crc_record_fields() {
        let mut channel = NoiseChannel::seeded(1);
        let record = FrameBuilder::load_message("Hi")
            .unwrap()
            .encode(Algorithm::Crc32)
            .unwrap()
            .add_noise(&mut channel, 0.0)
            .unwrap()
            .finish();

        assert_eq!(record.msg_ascii_len, 2);
        assert_eq!(record.algo, CodeId::Crc32);
        assert_eq!(record.frame_bits.len(), 48);
        assert_eq!(record.k, None);
        assert_eq!(record.pad_bits, None);
        assert_eq!(record.r, None);
    }

    #[test]
    fn test_hamming_record_fields() {
        let mut channel = NoiseChannel::seeded(1);
        let record = FrameBuilder::load_message("A")
            .unwrap()
            .encode(Algorithm::Hamming { k: 3 })
            .unwrap()
            .add_noise(&mut channel, 0.0)
            .unwrap()
            .finish();

        // 8 message bits, k=3: pad 1, three blocks of n=6
        assert_eq!(record.algo, CodeId::Hamming);
        assert_eq!(record.k, Some(3));
        assert_eq!(record.pad_bits, Some(1));
        assert_eq!(record.r, Some(3));
        assert_eq!(record.frame_bits.len(), 18);
    }

    #[test]
    fn test_record_json_shape() {
        let record = TransportRecord {
            msg_ascii_len: 2,
            algo: CodeId::Crc32,
            frame_bits: "0101".to_owned(),
            k: None,
            pad_bits: None,
            r: None,
        };

        let line = record.to_line().unwrap();
        assert!(line.ends_with('\n'));
        assert!(line.contains("\"algo\":\"CRC32\""));
        assert!(line.contains("\"msg_ascii_len\":2"));
        assert!(line.contains("\"frame_bits\":\"0101\""));
        // CRC records must not leak Hamming metadata
        assert!(!line.contains("pad_bits"));

        let parsed = TransportRecord::from_line(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_hamming_record_json_round_trip() {
        let record = TransportRecord {
            msg_ascii_len: 1,
            algo: CodeId::Hamming,
            frame_bits: "011001101100110110".to_owned(),
            k: Some(3),
            pad_bits: Some(1),
            r: Some(3),
        };

        let line = record.to_line().unwrap();
        assert!(line.contains("\"algo\":\"HAMMING\""));
        assert!(line.contains("\"k\":3"));
        assert!(line.contains("\"pad_bits\":1"));
        assert!(line.contains("\"r\":3"));

        let parsed = TransportRecord::from_line(&line).unwrap();
        assert_eq!(parsed, record);
    }
}
