//! Instruction decoding from a replay stream.
//!
//! Decoding turns the raw `tag, count, operands` triple into a tagged [`Op`]
//! with typed operands. Instructions the executor has no handler for still
//! consume their operands so the cursor lands on the next instruction.

use std::fmt;

use vcpu_core::Colors;

use crate::stream::ByteStream;

use super::dump::format_op;
use super::opcode::{ArithOp, OPERAND_WIDTH, Opcode};
use super::register::Register;

/// Operand words kept on `Unimplemented`/`Unknown` ops; the rest are skipped.
pub const MAX_DECODED_OPERANDS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid register id {id} in instruction at offset {offset}")]
    InvalidRegister { id: u32, offset: usize },
}

/// Decoded instruction with typed operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Push {
        value: i32,
    },
    Pop {
        dst: Register,
    },
    /// `lhs = lhs <op> rhs`.
    Arith {
        op: ArithOp,
        lhs: Register,
        rhs: Register,
    },
    /// Byte offset inside the loaded window.
    Jmp {
        target: u32,
    },
    /// Opcode in the instruction set without an executor handler.
    Unimplemented {
        opcode: Opcode,
        operands: Vec<u32>,
    },
    /// Tag outside the instruction set.
    Unknown {
        tag: u8,
        operands: Vec<u32>,
    },
    /// Encoded operand count differs from the opcode's arity.
    ArityMismatch {
        opcode: Opcode,
        expected: u32,
        found: u32,
    },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_op(self, Colors::OFF))
    }
}

/// One decoded instruction and the stream offset it started at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub offset: usize,
    pub op: Op,
}

/// Decode the instruction at the stream's cursor.
///
/// On return the cursor sits after the instruction's operands. The only error
/// is a register operand outside the register file.
pub fn decode(stream: &mut ByteStream) -> Result<Decoded, DecodeError> {
    let offset = stream.position();
    let tag = stream.read_u8();
    // Negative counts read as huge and are skipped like any oversized count.
    let count = stream.read_i32() as u32;

    let Some(opcode) = Opcode::from_byte(tag) else {
        let operands = read_words(stream, count);
        return Ok(Decoded {
            offset,
            op: Op::Unknown { tag, operands },
        });
    };

    if !opcode.is_implemented() {
        let operands = read_words(stream, count);
        return Ok(Decoded {
            offset,
            op: Op::Unimplemented { opcode, operands },
        });
    }

    if count != opcode.arity() {
        skip_words(stream, count);
        return Ok(Decoded {
            offset,
            op: Op::ArityMismatch {
                opcode,
                expected: opcode.arity(),
                found: count,
            },
        });
    }

    let op = match opcode {
        Opcode::Push => Op::Push {
            value: stream.read_i32(),
        },
        Opcode::Pop => Op::Pop {
            dst: read_register(stream, offset)?,
        },
        Opcode::Jmp => Op::Jmp {
            target: stream.read_u32(),
        },
        _ => match ArithOp::from_opcode(opcode) {
            Some(op) => Op::Arith {
                op,
                lhs: read_register(stream, offset)?,
                rhs: read_register(stream, offset)?,
            },
            None => Op::Unimplemented {
                opcode,
                operands: read_words(stream, count),
            },
        },
    };

    Ok(Decoded { offset, op })
}

fn read_register(stream: &mut ByteStream, offset: usize) -> Result<Register, DecodeError> {
    let id = stream.read_u32();
    Register::from_id(id).ok_or(DecodeError::InvalidRegister { id, offset })
}

fn read_words(stream: &mut ByteStream, count: u32) -> Vec<u32> {
    let kept = count.min(MAX_DECODED_OPERANDS);
    let words = (0..kept).map(|_| stream.read_u32()).collect();
    skip_words(stream, count - kept);
    words
}

fn skip_words(stream: &mut ByteStream, count: u32) {
    let size = (count as usize).saturating_mul(OPERAND_WIDTH);
    if !stream.skip(size) {
        tracing::warn!(
            position = stream.position(),
            operands = count,
            "operand skip out of bounds"
        );
    }
}
