//! Runtime errors for the silt VM.
//!
//! Every variant carries the word position (`at`) of the instruction
//! that failed.

use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Pop on an empty operand stack.
    #[error("stack underflow at word {at}")]
    StackUnderflow { at: u128 },

    /// `div` with a zero divisor.
    #[error("division by zero at word {at}")]
    DivisionByZero { at: u128 },

    /// `gload` past the current end of global memory.
    #[error("global load at address {address} out of range (length {len}) at word {at}")]
    GlobalLoadOutOfRange { at: u128, address: u128, len: usize },

    /// `lload` from a missing region or past its current end.
    #[error("local load at address {address} out of range (region {tag}, length {len}) at word {at}")]
    LocalLoadOutOfRange {
        at: u128,
        tag: u16,
        address: u128,
        len: usize,
    },

    /// A store address too large to be backed by host memory.
    #[error("address {address} exceeds addressable memory at word {at}")]
    AddressTooLarge { at: u128, address: u128 },

    /// The high 6 bits of the fetched word name no known operation.
    #[error("unknown opcode {opcode:#04x} at word {at}")]
    UnknownOpcode { at: u128, opcode: u8 },

    /// The stream ended inside a wide immediate or branch target.
    #[error("truncated immediate at word {at}")]
    TruncatedImmediate { at: u128 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::StackUnderflow { at: 5 }.to_string(),
            "stack underflow at word 5"
        );
        assert_eq!(
            RuntimeError::DivisionByZero { at: 9 }.to_string(),
            "division by zero at word 9"
        );
        assert_eq!(
            RuntimeError::UnknownOpcode { at: 0, opcode: 0x3F }.to_string(),
            "unknown opcode 0x3f at word 0"
        );
        assert_eq!(
            RuntimeError::GlobalLoadOutOfRange {
                at: 2,
                address: 10,
                len: 3
            }
            .to_string(),
            "global load at address 10 out of range (length 3) at word 2"
        );
    }
}
