//! silt common types and word-level encoding.
//!
//! This crate provides the foundational data structures shared by the
//! assembler and the VM:
//!
//! - [`Opcode`] — the 24 operations, packed into bits 15..10 of a word
//! - [`Width`] / [`Value`] — tagged 128-bit runtime values
//! - [`Program`] — a flat 16-bit word stream with byte serialization
//! - [`DecodeError`] — errors from decoding word streams
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime
//! cost) and has no other dependencies.

pub mod error;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use opcode::Opcode;
pub use program::Program;
pub use value::{Value, Width};
