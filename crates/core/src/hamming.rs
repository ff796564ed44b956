//! Hamming single-error-correcting (SEC) block encoder, even parity.
//!
//! # Block Layout
//!
//! Positions are 1-indexed. Every position that is an exact power of two
//! (1, 2, 4, 8, ...) holds a parity bit; all other positions hold the data
//! bits in stream order:
//!
//! ```text
//! position:  1   2   3   4   5   6   7      (k=4, r=3, n=7)
//!            p1  p2  d1  p4  d2  d3  d4
//! ```
//!
//! Parity bit `p = 2^i` covers every position whose index has bit `i` set,
//! itself included, and is chosen so the XOR over that group is zero. A
//! decoder recomputes each group parity and ORs the failing group indices
//! together to obtain the 1-indexed position of a single flipped bit.
//!
//! # Stream Encoding
//!
//! Arbitrary-length input is zero-padded on the right to a multiple of the
//! block size `k` and encoded as independent blocks. The pad length and `r`
//! must travel alongside the frame: the bitstream alone does not reveal
//! where the padding starts.

use crate::bits::BitString;
use crate::error::{Error, Result};

/// Largest supported data-block size.
///
/// Keeps position indexing and per-group parity scans small; the original
/// system rejected larger blocks at the prompt for the same reason.
pub const MAX_BLOCK_SIZE: usize = 64;

/// True when `x` is an exact power of two (parity position test).
fn is_power_of_two(x: usize) -> bool {
    x != 0 && x & (x - 1) == 0
}

/// Derived Hamming dimensions for a data block of length `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockParams {
    /// Data bits per block
    pub k: usize,
    /// Redundancy (parity) bits per block
    pub r: usize,
    /// Total block length, `k + r`
    pub n: usize,
}

impl BlockParams {
    /// Compute the minimal redundancy for a `k`-bit data block.
    ///
    /// `r` is the smallest non-negative integer with `2^r >= k + r + 1`,
    /// found by counting up from zero. The minimality criterion makes `r`
    /// unique for each `k`.
    ///
    /// # Errors
    /// Returns `Error::InvalidBlockSize` when `k` is outside `1..=64`.
    pub fn for_data_len(k: usize) -> Result<Self> {
        if k == 0 || k > MAX_BLOCK_SIZE {
            return Err(Error::InvalidBlockSize(k));
        }

        let mut r = 0usize;
        while k + r + 1 > (1 << r) {
            r += 1;
        }

        Ok(Self { k, r, n: k + r })
    }

    /// Redundancy overhead as a percentage of the encoded block.
    pub fn overhead_percent(&self) -> f64 {
        100.0 * self.r as f64 / self.n as f64
    }
}

/// Encode one data block into an n-bit Hamming codeword.
///
/// # Errors
/// Returns `Error::InvalidBlockSize` when the data length is outside
/// `1..=64`.
pub fn encode_block(data: &BitString) -> Result<BitString> {
    let params = BlockParams::for_data_len(data.len())?;
    let n = params.n;

    // 1-indexed working buffer; index 0 stays unused.
    let mut code = vec![false; n + 1];

    // Data bits fill the non-power-of-two positions in stream order.
    let mut data_bits = data.bits();
    for pos in 1..=n {
        if !is_power_of_two(pos) {
            // params guarantee exactly k such positions
            code[pos] = data_bits.next().unwrap_or(false);
        }
    }

    // Even parity per group: p = 2^i covers every position with bit i set.
    for i in 0..params.r {
        let p = 1 << i;
        let mut parity = false;
        for pos in 1..=n {
            if pos & p != 0 {
                parity ^= code[pos];
            }
        }
        code[p] = parity;
    }

    let mut out = BitString::with_capacity(n);
    for &bit in &code[1..] {
        out.push_bit(bit);
    }
    Ok(out)
}

/// A Hamming-encoded stream with the side metadata a decoder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HammingStream {
    /// Concatenated codewords, in chunk order
    pub frame: BitString,
    /// Zero bits appended to the last chunk before encoding
    pub pad_bits: usize,
    /// Block dimensions used for every chunk
    pub params: BlockParams,
}

/// Encode an arbitrary-length bitstream as fixed-size Hamming blocks.
///
/// The input is padded on the right with zero bits until its length is a
/// multiple of `k` (`pad_bits = (k - len % k) % k`, so an exact multiple
/// gets no padding), split into consecutive `k`-bit chunks, and each chunk
/// is encoded independently. Output length is `(padded_len / k) * n` bits.
///
/// # Errors
/// Returns `Error::InvalidBlockSize` when `k` is outside `1..=64`.
pub fn encode_stream(bits: &BitString, k: usize) -> Result<HammingStream> {
    let params = BlockParams::for_data_len(k)?;

    let pad_bits = (k - bits.len() % k) % k;
    let mut padded = String::with_capacity(bits.len() + pad_bits);
    padded.push_str(bits.as_str());
    for _ in 0..pad_bits {
        padded.push('0');
    }

    let block_count = padded.len() / k;
    let mut frame = BitString::with_capacity(block_count * params.n);
    for chunk_start in (0..padded.len()).step_by(k) {
        // chunks are pure 0/1 substrings of an already validated stream
        let chunk = BitString::from_symbols(&padded[chunk_start..chunk_start + k])?;
        let codeword = encode_block(&chunk)?;
        frame = frame.concat(&codeword);
    }

    Ok(HammingStream {
        frame,
        pad_bits,
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        BitString::from_symbols(s).unwrap()
    }

    /// XOR of the group covered by parity position `p` over a codeword.
    fn group_parity(code: &BitString, p: usize) -> bool {
        code.bits()
            .enumerate()
            .filter(|(idx, _)| (idx + 1) & p != 0)
            .fold(false, |acc, (_, bit)| acc ^ bit)
    }

    #[test]
    fn test_redundancy_table() {
        let cases = [
            (1, 2, 3),
            (4, 3, 7),
            (8, 4, 12),
            (11, 4, 15),
            (26, 5, 31),
            (57, 6, 63),
            (64, 7, 71),
        ];
        for (k, r, n) in cases {
            let params = BlockParams::for_data_len(k).unwrap();
            assert_eq!(params.r, r, "r mismatch for k={k}");
            assert_eq!(params.n, n, "n mismatch for k={k}");
        }
    }

    #[test]
    fn test_redundancy_is_minimal() {
        for k in 1..=MAX_BLOCK_SIZE {
            let r = BlockParams::for_data_len(k).unwrap().r;
            assert!(1usize << r >= k + r + 1, "inequality fails for k={k}");
            if r > 0 {
                let smaller = r - 1;
                assert!(
                    1usize << smaller < k + smaller + 1,
                    "r not minimal for k={k}"
                );
            }
        }
    }

    #[test]
    fn test_invalid_block_sizes() {
        assert!(matches!(
            BlockParams::for_data_len(0),
            Err(Error::InvalidBlockSize(0))
        ));
        assert!(matches!(
            BlockParams::for_data_len(65),
            Err(Error::InvalidBlockSize(65))
        ));
    }

    #[test]
    fn test_encode_block_classic_7_4() {
        // The textbook Hamming(7,4) example: data 1011 -> codeword 0110011
        assert_eq!(encode_block(&bits("1011")).unwrap().as_str(), "0110011");
        assert_eq!(encode_block(&bits("1101")).unwrap().as_str(), "1010101");
        assert_eq!(encode_block(&bits("0000")).unwrap().as_str(), "0000000");
        assert_eq!(encode_block(&bits("1111")).unwrap().as_str(), "1111111");
    }

    #[test]
    fn test_encode_block_8_bits() {
        // k=8 -> r=4, n=12; verified against the original emitter
        let code = encode_block(&bits("10110110")).unwrap();
        assert_eq!(code.as_str(), "111001100110");
    }

    #[test]
    fn test_data_bits_preserved_in_order() {
        let code = encode_block(&bits("1011")).unwrap();
        // Non-power-of-two positions 3, 5, 6, 7 carry the data in order
        let data: String = code
            .as_str()
            .chars()
            .enumerate()
            .filter(|(idx, _)| !is_power_of_two(idx + 1))
            .map(|(_, c)| c)
            .collect();
        assert_eq!(data, "1011");
    }

    #[test]
    fn test_every_parity_group_is_even() {
        // Structural property a decoder relies on: each power-of-two group
        // XORs to zero over the full codeword.
        for data in ["1", "01", "1011", "110100", "10110110", "11111111111"] {
            let data = bits(data);
            let params = BlockParams::for_data_len(data.len()).unwrap();
            let code = encode_block(&data).unwrap();
            assert_eq!(code.len(), params.n);

            for i in 0..params.r {
                let p = 1 << i;
                assert!(
                    !group_parity(&code, p),
                    "group {p} has odd parity for data {data}"
                );
            }
        }
    }

    #[test]
    fn test_encode_stream_padding() {
        // 9 bits with k=4: pad 3, three blocks of 7, 21 bits total
        let stream = encode_stream(&bits("101101101"), 4).unwrap();
        assert_eq!(stream.pad_bits, 3);
        assert_eq!(stream.params.r, 3);
        assert_eq!(stream.params.n, 7);
        assert_eq!(stream.frame.len(), 21);
    }

    #[test]
    fn test_encode_stream_exact_multiple_no_padding() {
        let stream = encode_stream(&bits("10111101"), 4).unwrap();
        assert_eq!(stream.pad_bits, 0);
        assert_eq!(stream.frame.len(), 14);
    }

    #[test]
    fn test_encode_stream_blocks_are_independent() {
        // Concatenation of per-block encodings equals the stream encoding
        let stream = encode_stream(&bits("10110110"), 4).unwrap();
        let first = encode_block(&bits("1011")).unwrap();
        let second = encode_block(&bits("0110")).unwrap();
        assert_eq!(stream.frame, first.concat(&second));
    }

    #[test]
    fn test_encode_stream_final_block_zero_padded() {
        // 5 bits with k=4: second block encodes "1000" (one data bit + 3 pad)
        let stream = encode_stream(&bits("10111"), 4).unwrap();
        assert_eq!(stream.pad_bits, 3);
        let padded_tail = encode_block(&bits("1000")).unwrap();
        assert_eq!(&stream.frame.as_str()[7..], padded_tail.as_str());
    }

    #[test]
    fn test_encode_stream_rejects_bad_k() {
        let result = encode_stream(&bits("1010"), 0);
        assert!(matches!(result, Err(Error::InvalidBlockSize(0))));
        let result = encode_stream(&bits("1010"), 100);
        assert!(matches!(result, Err(Error::InvalidBlockSize(100))));
    }

    #[test]
    fn test_overhead_percent() {
        let params = BlockParams::for_data_len(4).unwrap();
        // 3 parity bits out of 7
        assert!((params.overhead_percent() - 42.857).abs() < 0.01);
    }
}
