//! Program serialization.
//!
//! Layout per instruction, concatenated in program order:
//!
//! ```text
//! +--------+------------------+---------------------------+
//! | tag u8 | operand count i32| operand bytes (per width) |
//! +--------+------------------+---------------------------+
//! ```
//!
//! Multi-byte fields use the host's native byte order.

use crate::stream::{ByteStream, STREAM_CAPACITY};

use super::program::Program;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("program needs {needed} bytes but the stream holds {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },
    #[error("instruction {index}: operand count {count} does not fit in i32")]
    OperandCountOverflow { index: usize, count: u32 },
}

/// Serialized program plus the offset where each instruction starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedProgram {
    bytes: Vec<u8>,
    starts: Vec<u32>,
}

impl EncodedProgram {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offsets of instruction starts, ascending.
    pub fn instruction_starts(&self) -> &[u32] {
        &self.starts
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<u32>) {
        (self.bytes, self.starts)
    }
}

/// Serialize `program` through a write-mode [`ByteStream`].
pub fn encode_program(program: &Program) -> Result<EncodedProgram, EncodeError> {
    let needed = program.encoded_len();
    if needed > STREAM_CAPACITY {
        return Err(EncodeError::CapacityExceeded {
            needed,
            capacity: STREAM_CAPACITY,
        });
    }

    let mut stream = ByteStream::writer();
    let mut starts = Vec::with_capacity(program.len());

    for (index, instr) in program.iter().enumerate() {
        let count = i32::try_from(instr.operand_count()).map_err(|_| {
            EncodeError::OperandCountOverflow {
                index,
                count: instr.operand_count(),
            }
        })?;

        starts.push(stream.position() as u32);
        stream.write_u8(instr.opcode().to_byte());
        stream.write_i32(count);
        for operand in instr.operands() {
            stream.append(operand);
        }
    }

    debug_assert_eq!(stream.len(), needed);
    Ok(EncodedProgram {
        bytes: stream.snapshot(),
        starts,
    })
}
