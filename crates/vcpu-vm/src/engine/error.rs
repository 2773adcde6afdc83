//! Errors that stop loading or execution.

use vcpu_bytecode::{DecodeError, EncodeError};

use super::memory::MemoryError;

/// Fatal execution errors. The run stops and no further cycles are counted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// `SP` was found past the stack region at the top of a cycle.
    #[error("register SP is out of bounds ({sp}); the stack holds {max} bytes")]
    StackPointerOutOfBounds { sp: u32, max: usize },

    /// An operand named a register outside the register file.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Configured cycle budget ran out.
    #[error("execution fuel exhausted after {0} cycles")]
    CycleFuelExhausted(u32),

    /// The cycle counter carried over so many runs that it cannot advance.
    #[error("cycle counter overflowed after {0} cycles")]
    CycleCountOverflow(u32),
}

/// Errors from placing a program into memory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("no free block for a {size}-byte program")]
    OutOfMemory { size: usize },

    #[error(transparent)]
    Memory(#[from] MemoryError),
}
