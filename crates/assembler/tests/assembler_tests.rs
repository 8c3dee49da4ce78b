//! Integration tests for the silt assembler.
//!
//! Covers layout arithmetic (pass 1 vs pass 2), label resolution,
//! `.string` expansion, wide-immediate word order, and error cases.

use silt_assembler::{assemble, disassemble, AsmError};
use silt_common::{Opcode, Program};

// ---- Layout invariants ----

#[test]
fn emitted_length_is_sum_of_mnemonic_sizes() {
    let cases: &[(&str, usize)] = &[
        ("add", 1),
        ("gstore", 1),
        ("lload 0", 1),
        ("syscall 1", 1),
        ("pushd8 1", 2),
        ("pushd16 1", 2),
        ("pushd32 1", 3),
        ("pushd64 1", 5),
        ("pushd128 1", 9),
        ("jmp 0", 9),
        ("jz 0", 9),
        ("jnz 0", 9),
        ("call 0", 9),
        (".string 0 \"abcd\"", 20),
    ];
    for (source, size) in cases {
        let program = assemble(source).unwrap();
        assert_eq!(program.len(), *size, "wrong emitted size for '{source}'");
    }
}

#[test]
fn every_label_points_at_its_next_emitted_word() {
    let text = "\
entry:
  pushd16 7
mid:
  pushd64 9
tail:
  add
";
    let program = assemble(text).unwrap();
    // entry=0, mid=2, tail=7; prove it by branching to each.
    let jumps = assemble("jmp entry\njmp mid\njmp tail\nentry: pushd16 7\nmid: pushd64 9\ntail: add\n")
        .unwrap();
    assert_eq!(jumps.words[1], 27); // entry: after three 9-word jumps
    assert_eq!(jumps.words[10], 29); // mid
    assert_eq!(jumps.words[19], 34); // tail
    assert_eq!(program.len(), 8);
}

#[test]
fn string_layout_matches_its_expansion() {
    // A label after .string must land exactly past the synthesized words.
    let program = assemble(".string 0 \"xyz\"\nend: pushd16 1\njmp end\n").unwrap();
    assert_eq!(program.words[15], 0x5400);
    // jmp opcode word sits at 17; its low target half follows.
    assert_eq!(program.words[17], Opcode::Jmp.word());
    assert_eq!(program.words[18], 15);
}

// ---- Encoding ----

#[test]
fn opcode_words_match_reference_constants() {
    let program = assemble("add\nsub\nmul\ndiv\npop\ndup\nret\neq\nlt\ngt\ngload\ngstore\n").unwrap();
    assert_eq!(
        program.words,
        vec![
            0x0400, 0x0800, 0x0C00, 0x1000, 0x1800, 0x1C00, 0x3000, 0x3400, 0x3800, 0x3C00,
            0x4000, 0x4400,
        ]
    );
}

#[test]
fn inline_operands_packed_into_low_bits() {
    let program = assemble("lload 5\nlstore 1023\nsyscall 60\n").unwrap();
    assert_eq!(program.words, vec![0x4805, 0x4FFF, 0x643C]);
}

#[test]
fn pushd64_word_order_low_to_high() {
    let program = assemble("pushd64 0x0011223344556677\n").unwrap();
    assert_eq!(
        program.words,
        vec![0x5C00, 0x6677, 0x4455, 0x2233, 0x0011]
    );
}

#[test]
fn pushd128_word_order_low_to_high() {
    let program = assemble("pushd128 0x000102030405060708090a0b0c0d0e0f\n").unwrap();
    assert_eq!(
        program.words,
        vec![
            0x6000, 0x0E0F, 0x0C0D, 0x0A0B, 0x0809, 0x0607, 0x0405, 0x0203, 0x0001,
        ]
    );
}

#[test]
fn branch_targets_little_endian() {
    let program = assemble("call 0x00010002000300040005000600070008\n").unwrap();
    assert_eq!(
        program.words,
        vec![0x2C00, 8, 7, 6, 5, 4, 3, 2, 1]
    );
}

#[test]
fn hex_and_decimal_operands_agree() {
    assert_eq!(
        assemble("pushd16 0x2a\n").unwrap(),
        assemble("pushd16 42\n").unwrap()
    );
}

// ---- .string ----

#[test]
fn string_writes_consecutive_addresses_from_base() {
    let program = assemble(".string 7 \"ok\"\n").unwrap();
    assert_eq!(
        program.words,
        vec![
            0x5000, 'o' as u16, 0x5400, 7, 0x4400,
            0x5000, 'k' as u16, 0x5400, 8, 0x4400,
        ]
    );
}

#[test]
fn string_escapes_decode_before_expansion() {
    let program = assemble(".string 0 \"\\n\"\n").unwrap();
    assert_eq!(program.words[1], b'\n' as u16);
    assert_eq!(program.len(), 5);
}

#[test]
fn empty_string_emits_nothing() {
    let program = assemble(".string 0 \"\"\n").unwrap();
    assert!(program.is_empty());
}

// ---- Errors ----

#[test]
fn unterminated_string_is_fatal() {
    assert_eq!(
        assemble(".string 0 \"oops\n").unwrap_err(),
        AsmError::UnterminatedString { line: 1 }
    );
}

#[test]
fn unknown_mnemonic_is_fatal() {
    assert!(matches!(
        assemble("halt\n").unwrap_err(),
        AsmError::UnknownToken { line: 1, .. }
    ));
}

#[test]
fn missing_operand_is_fatal() {
    assert!(matches!(
        assemble("pushd32\n").unwrap_err(),
        AsmError::MissingArgument { mnemonic: "pushd32", .. }
    ));
}

#[test]
fn operand_wider_than_declared_width_is_fatal() {
    assert!(matches!(
        assemble("pushd16 0x10000\n").unwrap_err(),
        AsmError::NumberOutOfRange { .. }
    ));
}

#[test]
fn invalid_escape_in_char_literal_is_fatal() {
    assert!(matches!(
        assemble("pushd8 '\\q'\n").unwrap_err(),
        AsmError::InvalidCharLiteral { .. }
    ));
}

#[test]
fn unresolved_branch_target_is_fatal() {
    assert!(matches!(
        assemble("call missing\n").unwrap_err(),
        AsmError::UnknownTarget { .. }
    ));
}

// ---- Round-trip ----

#[test]
fn roundtrip_every_instruction_form() {
    let text = "\
pushd8 'Q'
pushd16 0xbeef
pushd32 0x12345678
pushd64 0x1122334455667788
pushd128 0xffeeddccbbaa99887766554433221100
jmp 3
jz 4
jnz 5
call 6
lload 1
lstore 2
syscall 60
add
sub
mul
div
pop
dup
ret
eq
lt
gt
gload
gstore
";
    let original = assemble(text).unwrap();
    let canonical = disassemble(&original).unwrap();
    assert_eq!(assemble(&canonical).unwrap(), original);
}

#[test]
fn disassemble_rejects_foreign_words() {
    // 0x0000 has opcode 0, which no operation claims.
    let program = Program::new(vec![0x0000]);
    assert!(disassemble(&program).is_err());
}
