use crate::stream::STREAM_CAPACITY;

use super::encode::{EncodeError, encode_program};
use super::opcode::Opcode;
use super::program::{Instruction, Program};
use super::register::Register;

fn sample() -> Program {
    [
        Instruction::push(25),
        Instruction::pop(Register::R5),
        Instruction::int(0x21),
    ]
    .into_iter()
    .collect()
}

#[test]
fn layout_is_tag_count_operands() {
    let encoded = encode_program(&sample()).unwrap();
    let bytes = encoded.bytes();

    assert_eq!(bytes.len(), 27);
    assert_eq!(bytes[0], Opcode::Push.to_byte());
    assert_eq!(&bytes[1..5], &1i32.to_ne_bytes());
    assert_eq!(&bytes[5..9], &25i32.to_ne_bytes());
    assert_eq!(bytes[9], Opcode::Pop.to_byte());
    assert_eq!(&bytes[14..18], &5u32.to_ne_bytes());
    assert_eq!(bytes[18], Opcode::Int.to_byte());
    assert_eq!(&bytes[23..27], &0x21u32.to_ne_bytes());
}

#[test]
fn records_instruction_starts() {
    let encoded = encode_program(&sample()).unwrap();
    assert_eq!(encoded.instruction_starts(), &[0, 9, 18]);
}

#[test]
fn length_matches_program_encoded_len() {
    let mut program = sample();
    program.push(Instruction::mul(Register::R1, Register::R2));
    program
        .add_instruction(Opcode::Cmp, 2, vec![2, 1], vec![1, 2, 3])
        .unwrap();

    let encoded = encode_program(&program).unwrap();
    assert_eq!(encoded.len(), program.encoded_len());
    assert_eq!(encoded.len(), 27 + 13 + 8);
}

#[test]
fn empty_program_encodes_to_nothing() {
    let encoded = encode_program(&Program::new()).unwrap();
    assert!(encoded.is_empty());
    assert!(encoded.instruction_starts().is_empty());
}

#[test]
fn oversized_program_is_rejected() {
    let program: Program = (0..STREAM_CAPACITY / 9 + 1)
        .map(|i| Instruction::push(i as i32))
        .collect();

    let err = encode_program(&program).unwrap_err();
    assert_eq!(
        err,
        EncodeError::CapacityExceeded {
            needed: program.encoded_len(),
            capacity: STREAM_CAPACITY,
        }
    );
}
