//! Error types for the silt assembler.

use thiserror::Error;

/// Errors produced while assembling text to a word stream.
///
/// Assembly stops at the first error; there is no recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A double-quoted literal was still open at end of line.
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    /// A token that is neither a mnemonic, a label, nor a directive.
    #[error("line {line}: unknown token '{token}'")]
    UnknownToken { line: usize, token: String },

    /// A mnemonic did not get the operand(s) it requires.
    #[error("line {line}: {mnemonic} expects {expected}")]
    MissingArgument {
        line: usize,
        mnemonic: &'static str,
        expected: &'static str,
    },

    /// A numeric literal could not be parsed.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A numeric literal does not fit the operand's declared width.
    #[error("line {line}: '{token}' does not fit in {width}")]
    NumberOutOfRange {
        line: usize,
        token: String,
        width: &'static str,
    },

    /// A character literal with an unrecognized form or escape.
    #[error("line {line}: invalid character literal {token}")]
    InvalidCharLiteral { line: usize, token: String },

    /// A branch target that is neither a known label nor a number.
    #[error("line {line}: unknown label or address '{token}'")]
    UnknownTarget { line: usize, token: String },

    /// `.string` needs a double-quoted literal in its second operand.
    #[error("line {line}: expected string literal, found '{token}'")]
    ExpectedStringLiteral { line: usize, token: String },
}
