//! Byte stream codec and bytecode format for vcpu.
//!
//! This crate contains:
//! - `ByteStream`: fixed-capacity cursor buffer with typed accessors
//! - Program model (`Program`, `Instruction`, `Opcode`, `Register`)
//! - Encoding to and decoding from the replayable bytecode layout
//! - Disassembly (`dump`)

pub mod bytecode;
pub mod stream;


// Re-export commonly used items at crate root
pub use bytecode::{
    ArithOp, DecodeError, Decoded, EncodeError, EncodedProgram, INSTRUCTION_HEADER_LEN,
    Instruction, MAX_DECODED_OPERANDS, OPERAND_WIDTH, Op, Opcode, Program, ProgramError,
    REGISTER_COUNT, Register, decode, dump, encode_program, format_op,
};
pub use stream::{ByteStream, STREAM_CAPACITY, STRING_PREFIX_WIDTH};
