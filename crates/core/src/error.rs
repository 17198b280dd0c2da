//! Error types for the link-sim codec.
//!
//! All operations return structured errors rather than panicking.
//! Nothing in this crate retries or recovers internally: the only
//! recovery mechanism is the Hamming decoder's designed single-bit
//! correction, and a CRC failure always rejects the frame.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Frame: building or parsing the wire frame
/// - Hamming: FEC encode/decode failures
/// - Channel: noise injection parameter or input validation
#[derive(Debug, Error)]
pub enum Error {
    /// Frame build/parse error (e.g., oversized payload, CRC mismatch)
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Hamming codec error (e.g., invalid bit, bad block length)
    #[error("hamming codec error: {0}")]
    Hamming(#[from] HammingError),

    /// Channel simulator error (e.g., rate out of range)
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Frame codec errors.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Payload exceeds the 16-bit length field
    #[error("payload too large: {size} bytes, max {max}")]
    PayloadTooLarge { size: usize, max: usize },

    /// Fewer bytes present than the header declares
    #[error("frame truncated: need {required} bytes, got {actual}")]
    Truncated { required: usize, actual: usize },

    /// More bytes present than the header declares
    #[error("trailing bytes after frame: expected {expected} bytes, got {actual}")]
    TrailingBytes { expected: usize, actual: usize },

    /// CRC validation failed, indicating corruption; the frame is discarded
    #[error("CRC mismatch: frame says {expected:#010x}, computed {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },

    /// Type byte is not a known frame type
    #[error("unknown frame type: {0:#04x}")]
    UnknownType(u8),
}

/// Hamming(7,4) codec errors.
#[derive(Debug, Error)]
pub enum HammingError {
    /// A supposed bit value outside {0, 1}
    #[error("invalid bit at position {position}: {value} (must be 0 or 1)")]
    InvalidBit { position: usize, value: u8 },

    /// Coded input length is not a multiple of the 7-bit block size
    #[error("coded length {0} is not a multiple of 7")]
    InvalidBlockLength(usize),
}

/// Channel simulator errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A supposed bit value outside {0, 1}
    #[error("invalid bit at position {position}: {value} (must be 0 or 1)")]
    InvalidBit { position: usize, value: u8 },

    /// Bit-error rate outside [0.0, 1.0]
    #[error("invalid bit-error rate: {0} (must be within [0.0, 1.0])")]
    InvalidRate(f64),

    /// Trial count must be positive
    #[error("invalid trial count: {0} (must be > 0)")]
    InvalidTrialCount(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
