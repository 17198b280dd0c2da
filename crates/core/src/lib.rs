//! link-sim-core: Educational link-layer codec with FEC and channel simulation
//!
//! This library provides the core components for a learning-focused system that:
//! - Builds and parses CRC-32-protected wire frames
//! - Protects payloads with Hamming(7,4) single-bit error correction
//! - Simulates a noisy channel that flips bits at a configurable rate
//! - Reports achieved error statistics over repeated trials
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bits`: conversion between bytes and explicit 0/1 bit sequences
//! - `frame`: wire frame build/parse with CRC-32 verification
//! - `hamming`: Hamming(7,4) block encode/decode with syndrome correction
//! - `channel`: seeded per-bit error injection and trial statistics
//!
//! # Data Flow
//!
//! ```text
//! payload bytes
//!   -> (optional) bits -> hamming::encode -> bits_to_bytes
//!   -> frame::build_frame -> frame bytes -> [transport / noisy channel]
//!   -> frame::parse_frame -> frame::recover_payload -> payload bytes
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **Deterministic**: seeded randomness makes channel runs reproducible
//! - **Pure computation**: no I/O, no blocking; the only state is the
//!   channel simulator's RNG stream
//! - **Detection vs correction**: CRC-32 only detects (corrupt frames are
//!   rejected); Hamming(7,4) corrects exactly one bit per 7-bit block

pub mod bits;
pub mod channel;
pub mod error;
pub mod frame;
pub mod hamming;

// Re-export commonly used types
pub use error::{Error, Result};
