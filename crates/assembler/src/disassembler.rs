//! Disassembler: word stream → canonical assembly text.
//!
//! Output is flat text, one instruction per line. Labels do not survive
//! assembly, so branch targets come back as numeric word positions.

use silt_common::{DecodeError, Opcode, Program};

/// Disassemble a program into canonical assembly text.
///
/// For any stream the assembler emitted, reassembling the output
/// reproduces the identical stream.
pub(crate) fn disassemble(program: &Program) -> Result<String, DecodeError> {
    let words = &program.words;
    let mut text = String::new();
    let mut i = 0;

    while i < words.len() {
        let op = Opcode::from_word(words[i])?;
        let data = op.data_words();
        if i + 1 + data > words.len() {
            return Err(DecodeError::TruncatedImmediate(i));
        }

        let mut value: u128 = 0;
        for k in 0..data {
            value |= (words[i + 1 + k] as u128) << (16 * k);
        }

        match op {
            Opcode::Lload | Opcode::Lstore | Opcode::Syscall => {
                let operand = silt_common::opcode::inline_operand(words[i]);
                text.push_str(&format!("{} {}\n", op.mnemonic(), operand));
            }
            Opcode::Pushd8 => text.push_str(&format!("pushd8 0x{value:02x}\n")),
            Opcode::Pushd16 => text.push_str(&format!("pushd16 0x{value:04x}\n")),
            Opcode::Pushd32 => text.push_str(&format!("pushd32 0x{value:08x}\n")),
            Opcode::Pushd64 => text.push_str(&format!("pushd64 0x{value:016x}\n")),
            Opcode::Pushd128 => text.push_str(&format!("pushd128 0x{value:032x}\n")),
            Opcode::Jmp | Opcode::Jz | Opcode::Jnz | Opcode::Call => {
                text.push_str(&format!("{} {}\n", op.mnemonic(), value));
            }
            _ => {
                text.push_str(op.mnemonic());
                text.push('\n');
            }
        }

        i += 1 + data;
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_opcodes() {
        let program = Program::new(vec![0x0400, 0x4400, 0x3000]);
        assert_eq!(disassemble(&program).unwrap(), "add\ngstore\nret\n");
    }

    #[test]
    fn inline_operands_rendered_decimal() {
        let program = Program::new(vec![0x4805, 0x4FFF, 0x643C]);
        assert_eq!(
            disassemble(&program).unwrap(),
            "lload 5\nlstore 1023\nsyscall 60\n"
        );
    }

    #[test]
    fn wide_immediates_rendered_hex() {
        let program = Program::new(vec![0x5800, 0x5678, 0x1234]);
        assert_eq!(disassemble(&program).unwrap(), "pushd32 0x12345678\n");
    }

    #[test]
    fn branch_target_rendered_decimal() {
        let mut words = vec![0x2000, 40];
        words.extend([0u16; 7]);
        let program = Program::new(words);
        assert_eq!(disassemble(&program).unwrap(), "jmp 40\n");
    }

    #[test]
    fn unknown_opcode_is_fatal() {
        let program = Program::new(vec![0xFC00]);
        assert_eq!(
            disassemble(&program).unwrap_err(),
            DecodeError::UnknownOpcode(0x3F)
        );
    }

    #[test]
    fn truncated_immediate_is_fatal() {
        let program = Program::new(vec![0x5800, 0x5678]);
        assert_eq!(
            disassemble(&program).unwrap_err(),
            DecodeError::TruncatedImmediate(0)
        );
    }
}
