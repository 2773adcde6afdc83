use vcpu_bytecode::{Instruction, Program, Register};

use super::{Cpu, PrintTracer, Verbosity};

fn trace(program: &[Instruction], verbosity: Verbosity) -> String {
    let program: Program = program.iter().cloned().collect();
    let mut cpu = Cpu::new();
    cpu.initialize(&program).unwrap();

    let mut tracer = PrintTracer::builder().verbosity(verbosity).build();
    let _ = cpu.execute_with(&mut tracer);
    tracer.output()
}

#[test]
fn default_shows_instructions_and_faults() {
    let program = [
        Instruction::push(25),
        Instruction::pop(Register::R5),
        Instruction::int(0x21),
    ];

    insta::assert_snapshot!(trace(&program, Verbosity::Default), @r"
    0001  0x0403  PUSH 25
    0002  0x040c  POP r5
    0003  0x0415  INT 33
          fault: opcode INT is not implemented
    halt: end of program after 3 cycles
    ");
}

#[test]
fn verbose_adds_stack_traffic_and_jumps() {
    let program = [
        Instruction::jmp(9),
        Instruction::push(-4),
        Instruction::pop(Register::R2),
    ];

    insta::assert_snapshot!(trace(&program, Verbosity::Verbose), @r"
    0001  0x0403  JMP 9
          jump -> 9
    0002  0x040c  PUSH -4
          push -4 (sp 4)
    0003  0x0415  POP r2
          pop -4 -> r2 (sp 0)
    halt: end of program after 3 cycles
    ");
}

#[test]
fn very_verbose_adds_registers() {
    let program = [Instruction::push(7)];

    insta::assert_snapshot!(trace(&program, Verbosity::VeryVerbose), @r"
    0001  0x0403  PUSH 7
          push 7 (sp 4)
          r0=0 r1=0 r2=0 r3=0 r4=0 r5=0 r6=0 r7=0 r8=0 pc=1027 sp=4 px=1036 zf=0 sf=0
    halt: end of program after 1 cycles
    ");
}

#[test]
fn abort_is_the_last_line() {
    let program: Program = [Instruction::push(1)].into_iter().collect();
    let mut cpu = Cpu::new();
    cpu.initialize(&program).unwrap();
    cpu.registers_mut().set(Register::Sp, 2000);

    let mut tracer = PrintTracer::builder().build();
    assert!(cpu.execute_with(&mut tracer).is_err());

    insta::assert_snapshot!(tracer.output(), @"abort: register SP is out of bounds (2000); the stack holds 1024 bytes");
}

#[test]
fn colored_output_uses_ansi_codes() {
    let program: Program = [Instruction::push(1)].into_iter().collect();
    let mut cpu = Cpu::new();
    cpu.initialize(&program).unwrap();

    let mut tracer = PrintTracer::builder().colored(true).build();
    cpu.execute_with(&mut tracer).unwrap();

    assert_eq!(tracer.lines().len(), 2);
    assert!(tracer.lines()[0].contains("\x1b[34mPUSH\x1b[0m"));
    assert!(tracer.lines()[1].starts_with("\x1b[32mhalt"));
}
