//! Hamming(7,4) forward error correction.
//!
//! Encodes each 4-bit data nibble into a 7-bit block that survives any
//! single flipped bit. The decoder locates the flipped bit through a
//! 3-bit syndrome and corrects it in place.
//!
//! # Block Layout
//!
//! ```text
//! index:   0    1    2    3    4    5    6
//! bit:   [ p2,  p1,  d3,  p0,  d2,  d1,  d0 ]
//!
//! p0 = d3 ^ d2 ^ d0
//! p1 = d3 ^ d1 ^ d0
//! p2 = d2 ^ d1 ^ d0
//! ```
//!
//! # Limits
//!
//! One flipped bit per block is corrected exactly. Two or more flips in
//! the same block produce a nonzero syndrome that still points at a
//! single position, so the decoder corrects the wrong bit and returns a
//! silently wrong nibble. That is inherent to the (7,4) code; callers
//! needing detection of heavier corruption layer a checksum on top (the
//! frame codec's CRC-32 does exactly that).

use crate::error::{HammingError, Result};

/// Coded block size in bits.
pub const BLOCK_LEN: usize = 7;

/// Data bits per block.
pub const DATA_LEN: usize = 4;

/// Flipped-bit position within a block, keyed by the 3-bit syndrome
/// `s2 s1 s0`. Index 0 is unused: a zero syndrome means a clean block.
///
/// Derived once from the parity formulas for the `[p2,p1,d3,p0,d2,d1,d0]`
/// layout: syndrome 1 implicates only p0 (index 3), syndrome 3 implicates
/// p0 and p1, i.e. d3 (index 2), and so on.
const SYNDROME_POSITION: [usize; 8] = [0, 3, 1, 2, 0, 4, 5, 6];

/// Result of decoding a coded bit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Recovered data bits, 4 per block (includes any encode-side padding)
    pub data_bits: Vec<u8>,

    /// Absolute positions (within the coded input) of corrected bits
    pub corrected_positions: Vec<usize>,
}

/// Encode data bits into 7-bit protected blocks.
///
/// Input is zero-padded on the right to a multiple of 4; the padding is
/// not reversible information, so callers that care about the exact
/// original length must carry it out-of-band and truncate after decode.
///
/// Output length is `7 * ceil(len / 4)`.
///
/// # Errors
/// `HammingError::InvalidBit` if any element is not 0 or 1.
pub fn encode(data_bits: &[u8]) -> Result<Vec<u8>> {
    validate_bits(data_bits)?;

    let num_blocks = (data_bits.len() + DATA_LEN - 1) / DATA_LEN;
    let mut coded = Vec::with_capacity(num_blocks * BLOCK_LEN);

    for block in 0..num_blocks {
        let bit = |i: usize| data_bits.get(block * DATA_LEN + i).copied().unwrap_or(0);
        let (d3, d2, d1, d0) = (bit(0), bit(1), bit(2), bit(3));

        let p0 = d3 ^ d2 ^ d0;
        let p1 = d3 ^ d1 ^ d0;
        let p2 = d2 ^ d1 ^ d0;

        coded.extend_from_slice(&[p2, p1, d3, p0, d2, d1, d0]);
    }

    Ok(coded)
}

/// Decode 7-bit blocks, correcting at most one flipped bit per block.
///
/// Each block is checked independently: the three parities are recomputed
/// from the received data bits and XORed against the received parity bits
/// to form the syndrome. A zero syndrome accepts the block as-is; any
/// other value indexes [`SYNDROME_POSITION`] and the implicated bit is
/// flipped before the nibble is extracted.
///
/// # Errors
/// - `HammingError::InvalidBlockLength` if the length is not a multiple of 7
/// - `HammingError::InvalidBit` if any element is not 0 or 1
pub fn decode(coded_bits: &[u8]) -> Result<Decoded> {
    if coded_bits.len() % BLOCK_LEN != 0 {
        return Err(HammingError::InvalidBlockLength(coded_bits.len()).into());
    }
    validate_bits(coded_bits)?;

    let num_blocks = coded_bits.len() / BLOCK_LEN;
    let mut data_bits = Vec::with_capacity(num_blocks * DATA_LEN);
    let mut corrected_positions = Vec::new();

    for (block_idx, chunk) in coded_bits.chunks_exact(BLOCK_LEN).enumerate() {
        let mut block = [0u8; BLOCK_LEN];
        block.copy_from_slice(chunk);

        let syndrome = syndrome(&block);
        if syndrome != 0 {
            let pos = SYNDROME_POSITION[syndrome];
            block[pos] ^= 1;
            corrected_positions.push(block_idx * BLOCK_LEN + pos);
        }

        // Data bits sit at fixed positions in [p2, p1, d3, p0, d2, d1, d0]
        data_bits.extend_from_slice(&[block[2], block[4], block[5], block[6]]);
    }

    Ok(Decoded {
        data_bits,
        corrected_positions,
    })
}

/// Compute the 3-bit syndrome `s2 s1 s0` for one received block.
fn syndrome(block: &[u8; BLOCK_LEN]) -> usize {
    let [p2, p1, d3, p0, d2, d1, d0] = *block;

    let s0 = p0 ^ d3 ^ d2 ^ d0;
    let s1 = p1 ^ d3 ^ d1 ^ d0;
    let s2 = p2 ^ d2 ^ d1 ^ d0;

    ((s2 as usize) << 2) | ((s1 as usize) << 1) | (s0 as usize)
}

fn validate_bits(bits: &[u8]) -> Result<()> {
    for (position, &value) in bits.iter().enumerate() {
        if value > 1 {
            return Err(HammingError::InvalidBit { position, value }.into());
        }
    }
    Ok(())
}
