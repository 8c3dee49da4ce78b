//! Two-pass resolver: tokens → resolved instructions.
//!
//! Pass 1 walks the token sequence simulating the emission size of each
//! mnemonic, recording every label at the running word position. Pass 2
//! walks again, resolves branch targets against the label table (falling
//! back to integer literals), and builds [`Instr`]s for emission.
//!
//! The two passes must agree on sizes exactly — a label's recorded
//! position is only correct if pass 2 emits precisely the words pass 1
//! predicted.

use std::collections::HashMap;

use crate::error::AsmError;
use crate::instr::Instr;
use crate::lexer::Token;
use crate::literal::{parse_char_literal, parse_u128, unescape};
use silt_common::opcode::ALL_OPCODES;
use silt_common::Opcode;

/// Resolve a token sequence into instructions.
pub(crate) fn parse(tokens: &[Token]) -> Result<Vec<Instr>, AsmError> {
    let labels = first_pass(tokens)?;
    second_pass(tokens, &labels)
}

/// Pass 1: compute the label table.
fn first_pass(tokens: &[Token]) -> Result<HashMap<String, u128>, AsmError> {
    let mut labels = HashMap::new();
    let mut position: u128 = 0;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match token.text.as_str() {
            ".string" => {
                let literal = expect_arg(tokens, i + 2, token.line, ".string", STRING_ARGS)?;
                let body = expect_string_body(literal)?;
                position += 5 * unescape(body).len() as u128;
                i += 2;
            }
            "pushd8" | "pushd16" => {
                position += 2;
                i += 1;
            }
            "pushd32" => {
                position += 3;
                i += 1;
            }
            "pushd64" => {
                position += 5;
                i += 1;
            }
            "pushd128" | "jmp" | "jz" | "jnz" | "call" => {
                position += 9;
                i += 1;
            }
            "lload" | "lstore" | "syscall" => {
                position += 1;
                i += 1;
            }
            text if text.ends_with(':') => {
                let name = &text[..text.len() - 1];
                labels.insert(name.to_string(), position);
            }
            text => {
                // Bare mnemonics are one word; anything else is left for
                // pass 2 to reject.
                if lookup_opcode(text).is_some() {
                    position += 1;
                }
            }
        }
        i += 1;
    }

    Ok(labels)
}

/// Pass 2: build instructions, resolving labels.
fn second_pass(
    tokens: &[Token],
    labels: &HashMap<String, u128>,
) -> Result<Vec<Instr>, AsmError> {
    let mut instructions = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match token.text.as_str() {
            ".string" => {
                let addr_tok = expect_arg(tokens, i + 1, token.line, ".string", STRING_ARGS)?;
                let literal = expect_arg(tokens, i + 2, token.line, ".string", STRING_ARGS)?;
                let address = expect_number(addr_tok, 16, "16 bits")? as u16;
                let body = expect_string_body(literal)?;
                instructions.push(Instr::StringData {
                    address,
                    text: unescape(body),
                });
                i += 2;
            }
            "pushd8" => {
                let arg = expect_arg(tokens, i + 1, token.line, "pushd8", "8-bit data")?;
                let value = if arg.text.starts_with('\'') {
                    parse_char_literal(&arg.text).ok_or_else(|| AsmError::InvalidCharLiteral {
                        line: arg.line,
                        token: arg.text.clone(),
                    })?
                } else {
                    expect_number(arg, 8, "8 bits")? as u8
                };
                instructions.push(Instr::Push8(value));
                i += 1;
            }
            "pushd16" => {
                let arg = expect_arg(tokens, i + 1, token.line, "pushd16", "16-bit data")?;
                instructions.push(Instr::Push16(expect_number(arg, 16, "16 bits")? as u16));
                i += 1;
            }
            "pushd32" => {
                let arg = expect_arg(tokens, i + 1, token.line, "pushd32", "32-bit data")?;
                instructions.push(Instr::Push32(expect_number(arg, 32, "32 bits")? as u32));
                i += 1;
            }
            "pushd64" => {
                let arg = expect_arg(tokens, i + 1, token.line, "pushd64", "64-bit data")?;
                instructions.push(Instr::Push64(expect_number(arg, 64, "64 bits")? as u64));
                i += 1;
            }
            "pushd128" => {
                let arg = expect_arg(tokens, i + 1, token.line, "pushd128", "128-bit data")?;
                instructions.push(Instr::Push128(expect_number(arg, 128, "128 bits")?));
                i += 1;
            }
            "jmp" | "jz" | "jnz" | "call" => {
                let op = lookup_opcode(&token.text).expect("branch mnemonics are opcodes");
                let arg = expect_arg(tokens, i + 1, token.line, op.mnemonic(), "a target address")?;
                let target = resolve_target(arg, labels)?;
                instructions.push(Instr::Branch(op, target));
                i += 1;
            }
            "lload" => {
                let arg = expect_arg(tokens, i + 1, token.line, "lload", "a 10-bit tag")?;
                instructions.push(Instr::Lload(expect_number(arg, 10, "10 bits")? as u16));
                i += 1;
            }
            "lstore" => {
                let arg = expect_arg(tokens, i + 1, token.line, "lstore", "a 10-bit tag")?;
                instructions.push(Instr::Lstore(expect_number(arg, 10, "10 bits")? as u16));
                i += 1;
            }
            "syscall" => {
                let arg = expect_arg(tokens, i + 1, token.line, "syscall", "a syscall number")?;
                instructions.push(Instr::Syscall(expect_number(arg, 10, "10 bits")? as u16));
                i += 1;
            }
            text if text.ends_with(':') => {
                // Label definitions were consumed by pass 1.
            }
            text => match lookup_opcode(text) {
                Some(op) => instructions.push(Instr::Bare(op)),
                None => {
                    return Err(AsmError::UnknownToken {
                        line: token.line,
                        token: text.to_string(),
                    })
                }
            },
        }
        i += 1;
    }

    Ok(instructions)
}

const STRING_ARGS: &str = "an address and a string literal";

fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    ALL_OPCODES
        .iter()
        .find(|op| op.mnemonic() == mnemonic)
        .copied()
}

/// Fetch the operand token at `idx`, or fail with a missing-argument error.
fn expect_arg<'a>(
    tokens: &'a [Token],
    idx: usize,
    line: usize,
    mnemonic: &'static str,
    expected: &'static str,
) -> Result<&'a Token, AsmError> {
    tokens.get(idx).ok_or(AsmError::MissingArgument {
        line,
        mnemonic,
        expected,
    })
}

/// Parse an integer operand and check it fits the declared width.
fn expect_number(token: &Token, bits: u32, width: &'static str) -> Result<u128, AsmError> {
    let value = parse_u128(&token.text).ok_or_else(|| AsmError::InvalidNumber {
        line: token.line,
        token: token.text.clone(),
    })?;
    if bits < 128 && value >> bits != 0 {
        return Err(AsmError::NumberOutOfRange {
            line: token.line,
            token: token.text.clone(),
            width,
        });
    }
    Ok(value)
}

/// Resolve a branch target: label first, then integer literal.
fn resolve_target(token: &Token, labels: &HashMap<String, u128>) -> Result<u128, AsmError> {
    if let Some(&position) = labels.get(&token.text) {
        return Ok(position);
    }
    parse_u128(&token.text).ok_or_else(|| AsmError::UnknownTarget {
        line: token.line,
        token: token.text.clone(),
    })
}

/// Strip the surrounding quotes from a string-literal token.
fn expect_string_body(token: &Token) -> Result<&str, AsmError> {
    let text = token.text.as_str();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Ok(&text[1..text.len() - 1])
    } else {
        Err(AsmError::ExpectedStringLiteral {
            line: token.line,
            token: token.text.clone(),
        })
    }
}
