//! Assembler-internal instruction representation.
//!
//! Pass 2 lowers tokens into these, then emission flattens them into
//! the 16-bit word stream. The `size_words` of every variant matches
//! what `emit_into` appends — pass 1 relies on the same arithmetic.

use silt_common::Opcode;

/// One resolved instruction, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Instr {
    /// `pushd8` — opcode word plus one data word (low byte meaningful).
    Push8(u8),
    /// `pushd16` — opcode word plus one data word.
    Push16(u16),
    /// `pushd32` — opcode word plus two little-endian halves.
    Push32(u32),
    /// `pushd64` — opcode word plus four halves.
    Push64(u64),
    /// `pushd128` — opcode word plus eight halves.
    Push128(u128),
    /// Control transfer with a resolved 128-bit target.
    Branch(Opcode, u128),
    /// `lload` with its 10-bit region tag packed inline.
    Lload(u16),
    /// `lstore` with its 10-bit region tag packed inline.
    Lstore(u16),
    /// `syscall` with its 10-bit number packed inline.
    Syscall(u16),
    /// Any single-word mnemonic with no operand.
    Bare(Opcode),
    /// `.string` — one pushd8/pushd16/gstore triple per character.
    StringData { address: u16, text: String },
}

impl Instr {
    /// Emitted length in 16-bit words.
    pub(crate) fn size_words(&self) -> u128 {
        match self {
            Instr::Push8(_) | Instr::Push16(_) => 2,
            Instr::Push32(_) => 3,
            Instr::Push64(_) => 5,
            Instr::Push128(_) | Instr::Branch(..) => 9,
            Instr::Lload(_) | Instr::Lstore(_) | Instr::Syscall(_) | Instr::Bare(_) => 1,
            Instr::StringData { text, .. } => 5 * text.len() as u128,
        }
    }

    /// Append this instruction's words to the stream.
    pub(crate) fn emit_into(&self, out: &mut Vec<u16>) {
        match self {
            Instr::Push8(v) => {
                out.push(Opcode::Pushd8.word());
                out.push(*v as u16);
            }
            Instr::Push16(v) => {
                out.push(Opcode::Pushd16.word());
                out.push(*v);
            }
            Instr::Push32(v) => {
                out.push(Opcode::Pushd32.word());
                push_halves(out, *v as u128, 2);
            }
            Instr::Push64(v) => {
                out.push(Opcode::Pushd64.word());
                push_halves(out, *v as u128, 4);
            }
            Instr::Push128(v) => {
                out.push(Opcode::Pushd128.word());
                push_halves(out, *v, 8);
            }
            Instr::Branch(op, target) => {
                out.push(op.word());
                push_halves(out, *target, 8);
            }
            Instr::Lload(tag) => out.push(Opcode::Lload.word_with(*tag)),
            Instr::Lstore(tag) => out.push(Opcode::Lstore.word_with(*tag)),
            Instr::Syscall(num) => out.push(Opcode::Syscall.word_with(*num)),
            Instr::Bare(op) => out.push(op.word()),
            Instr::StringData { address, text } => {
                for (offset, byte) in text.bytes().enumerate() {
                    out.push(Opcode::Pushd8.word());
                    out.push(byte as u16);
                    out.push(Opcode::Pushd16.word());
                    out.push(address.wrapping_add(offset as u16));
                    out.push(Opcode::Gstore.word());
                }
            }
        }
    }
}

/// Append a value as `halves` little-endian 16-bit words, low half first.
fn push_halves(out: &mut Vec<u16>, value: u128, halves: usize) {
    for k in 0..halves {
        out.push((value >> (16 * k)) as u16);
    }
}
