//! Decode errors for silt word streams.

use thiserror::Error;

/// Errors that occur while decoding a word stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The high 6 bits of a word name no known operation.
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    /// The stream ended inside a wide immediate or branch target.
    #[error("truncated immediate at word {0}")]
    TruncatedImmediate(usize),
}
