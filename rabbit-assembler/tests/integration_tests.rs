//! Integration tests for the Rabbit assembler
//!
//! Tests the complete assembly workflow including:
//! - Instruction parsing and encoding for every mnemonic
//! - Addressing-mode flags
//! - Immediate and bif trailing words

use rabbit_assembler::{assemble, encode, parse_instruction};
use rabbit_spec::encoding::decode;
use rabbit_spec::{Bif, Opcode, INSTRUCTION_TABLE};

// ============================================================================
// Basic Assembly Tests
// ============================================================================

#[test]
fn test_assemble_empty_program() {
    let program = assemble("").unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_assemble_comments_only() {
    let source = r#"
        # This is a comment
        ; Another comment
    "#;
    let program = assemble(source).unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_assemble_multiple_instructions() {
    let source = r#"
        add r1, r2, r3
        sub r4, r5, r6
        halt
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.code.len(), 3);
}

#[test]
fn test_immediates_add_a_word() {
    let source = r#"
        move r1, $10
        add r1, r1, r2
        out $65
        halt
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.code, vec![0x1800_0010, 10, 0x2000_0211, 0xE800_0000, 65, 0]);
}

// ============================================================================
// Instruction Table Coverage
// ============================================================================

#[test]
fn test_every_mnemonic_assembles_to_its_opcode() {
    for info in INSTRUCTION_TABLE {
        let operands: Vec<String> = (1..=info.arity).map(|i| format!("r{}", i)).collect();
        let line = format!("{} {}", info.mnemonic, operands.join(", "));

        let program = assemble(&line).unwrap();
        assert_eq!(program.code.len(), 1, "{}", line);

        let decoded = decode(program.code[0]);
        assert_eq!(decoded.opcode(), Some(info.opcode), "{}", line);
        assert!(!decoded.has_immediate());
    }
}

#[test]
fn test_operand_slots_by_arity() {
    let decoded = decode(assemble("add r1, r2, r3").unwrap().code[0]);
    assert_eq!((decoded.rega, decoded.regb, decoded.regc), (1, 2, 3));

    let decoded = decode(assemble("move r4, r5").unwrap().code[0]);
    assert_eq!((decoded.rega, decoded.regb, decoded.regc), (0, 4, 5));

    let decoded = decode(assemble("in r6").unwrap().code[0]);
    assert_eq!((decoded.rega, decoded.regb, decoded.regc), (0, 0, 6));
}

// ============================================================================
// Addressing Modes
// ============================================================================

#[test]
fn test_deref_flags_per_slot() {
    let decoded = decode(assemble("nand (r1), r2, r3").unwrap().code[0]);
    assert!(decoded.modes.rega_deref);
    assert!(!decoded.modes.regb_deref);
    assert!(!decoded.modes.regc_deref);

    let decoded = decode(assemble("nand r1, (r2), r3").unwrap().code[0]);
    assert!(decoded.modes.regb_deref);

    let decoded = decode(assemble("nand r1, r2, (r3)").unwrap().code[0]);
    assert!(decoded.modes.regc_deref);
    assert!(!decoded.modes.immediate);
}

#[test]
fn test_dereferenced_immediate() {
    let program = assemble("move r1, ($200)").unwrap();
    let decoded = decode(program.code[0]);
    assert!(decoded.modes.immediate);
    assert!(decoded.modes.regc_deref);
    assert_eq!(program.code[1], 200);
}

#[test]
fn test_bif_reference() {
    let program = assemble("bif @hello").unwrap();
    let decoded = decode(program.code[0]);
    assert_eq!(decoded.opcode(), Some(Opcode::Bif));
    assert!(decoded.modes.immediate);
    assert_eq!(program.code[1], Bif::Hello.id());
}

#[test]
fn test_bif_through_register() {
    let program = assemble("bif r3").unwrap();
    assert_eq!(program.code.len(), 1);
    assert_eq!(decode(program.code[0]).regc, 3);
}

// ============================================================================
// Register Truncation
// ============================================================================

#[test]
fn test_register_17_is_register_1() {
    let wide = assemble("add r17, r18, r19").unwrap();
    let narrow = assemble("add r1, r2, r3").unwrap();
    assert_eq!(wide, narrow);
}

#[test]
fn test_encode_matches_assemble() {
    let instr = parse_instruction("sub r9, r8, $3").unwrap();
    let words: Vec<u32> = encode(&instr).words().collect();
    assert_eq!(assemble("sub r9, r8, $3").unwrap().code, words);
}
