//! Stress tests for Rabbit
//!
//! Tests with large programs, many iterations, and edge cases.

use rabbit_assembler::assemble;
use rabbit_disassembler::disassemble;
use rabbit_runtime::{run, IOHandler, MachineState, VMConfig, VM};
use rabbit_spec::Register;

// ============================================================================
// Large Program Tests
// ============================================================================

#[test]
fn test_1000_instructions() {
    let mut source = String::from("move r2, $1\n");
    for _ in 0..1000 {
        source.push_str("add r1, r1, r2\n");
    }
    source.push_str("halt\n");

    let program = assemble(&source).unwrap();
    assert_eq!(program.len(), 1003);

    let mut vm = VM::with_io(program, VMConfig::default(), IOHandler::new(&b""[..], Vec::new()));
    let result = vm.run().unwrap();
    assert_eq!(result.steps, 1002);
    assert_eq!(vm.registers().read(Register::R1), 1000);
}

#[test]
fn test_large_listing() {
    let source = "out $1\n".repeat(5000);
    let program = assemble(&source).unwrap();
    let listing = disassemble(&program).unwrap();
    assert_eq!(listing.lines().count(), 5000);
}

// ============================================================================
// Long-running Loops
// ============================================================================

#[test]
fn test_countdown_100000() {
    let source = r#"
        move r1, $100000
        move r2, $1
        sub r1, r1, r2    ; 4
        brz $4
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = VM::with_io(program, VMConfig::default(), IOHandler::new(&b""[..], Vec::new()));
    let result = vm.run().unwrap();

    assert_eq!(result.state, MachineState::Halted);
    assert_eq!(vm.registers().read(Register::R1), 0);
    assert_eq!(result.steps, 2 + 100_000 * 2 + 1);
}

#[test]
fn test_echo_large_input() {
    let source = r#"
        move r2, $-1
        in r1            ; 2
        sub r3, r1, r2
        brnz $9
        out r1
        br $2
        halt             ; 9
    "#;
    let input: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    let (result, output) = run(assemble(source).unwrap(), &input).unwrap();
    assert_eq!(result.state, MachineState::Halted);
    assert_eq!(output, input);
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_wrapping_arithmetic() {
    let source = r#"
        move r1, $-1
        add r2, r1, $2
        mul r3, r1, r1
        sub r4, r0, $1
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = VM::with_io(program, VMConfig::default(), IOHandler::new(&b""[..], Vec::new()));
    vm.run().unwrap();

    assert_eq!(vm.registers().read(Register::R2), 1);
    assert_eq!(vm.registers().read(Register::R3), 1);
    assert_eq!(vm.registers().read(Register::R4), u32::MAX);
}

#[test]
fn test_shift_amount_wraps() {
    let source = r#"
        move r1, $1
        shl r2, r1, $32
        shl r3, r1, $31
        shr r4, r3, $63
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = VM::with_io(program, VMConfig::default(), IOHandler::new(&b""[..], Vec::new()));
    vm.run().unwrap();

    assert_eq!(vm.registers().read(Register::R2), 1);
    assert_eq!(vm.registers().read(Register::R3), 0x8000_0000);
    assert_eq!(vm.registers().read(Register::R4), 1);
}
