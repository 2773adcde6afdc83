//! Bytecode format: instruction set, program model, encoding and decoding.

mod decode;
mod dump;
mod encode;
mod opcode;
mod program;
mod register;

#[cfg(test)]
mod encode_tests;

pub use decode::{DecodeError, Decoded, MAX_DECODED_OPERANDS, Op, decode};
pub use dump::{dump, format_op};
pub use encode::{EncodeError, EncodedProgram, encode_program};
pub use opcode::{ArithOp, OPERAND_WIDTH, Opcode};
pub use program::{INSTRUCTION_HEADER_LEN, Instruction, Program, ProgramError};
pub use register::{REGISTER_COUNT, Register};
