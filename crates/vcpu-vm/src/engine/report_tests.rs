use vcpu_bytecode::{Instruction, Program, Register};
use vcpu_core::Colors;

use super::{Cpu, RunReport};

fn run(program: &[Instruction]) -> RunReport {
    let program: Program = program.iter().cloned().collect();
    let mut cpu = Cpu::new();
    cpu.initialize(&program).unwrap();
    cpu.execute().unwrap()
}

#[test]
fn render_lists_registers_and_faults() {
    let report = run(&[
        Instruction::push(-25),
        Instruction::pop(Register::R5),
        Instruction::int(0x21),
    ]);

    insta::assert_snapshot!(report.render(Colors::OFF), @r"
    halt: end of program after 3 cycles
    r0 0      r1 0      r2 0      r3 0      r4 0      r5 -25    r6 0
    r7 0      r8 0      pc 1054   sp 0      px 1054   zf 0      sf 0
    faults: 1
      cycle 3 at 0x0415: opcode INT is not implemented
    ");
}

#[test]
fn render_omits_faults_section_when_clean() {
    let report = run(&[Instruction::push(1)]);
    let text = report.render(Colors::OFF);
    assert!(!text.contains("faults"));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn json_shape() {
    let report = run(&[
        Instruction::push(25),
        Instruction::pop(Register::R5),
        Instruction::int(0x21),
    ]);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["cycles"], 3);
    assert_eq!(json["halt"], "end_of_program");
    assert_eq!(json["registers"]["r5"], 25);
    assert_eq!(json["registers"]["px"], 1054);
    assert_eq!(json["registers"].as_object().unwrap().len(), 14);
    assert_eq!(json["faults"][0]["cycle"], 3);
    assert_eq!(json["faults"][0]["pc"], 1045);
    assert_eq!(json["faults"][0]["message"], "opcode INT is not implemented");
}
