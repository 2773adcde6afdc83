//! Soft faults: problems that are logged and skipped while execution goes on.

use std::fmt;

use serde::Serialize;
use vcpu_bytecode::{Opcode, Register};

use super::stack::StackError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error(transparent)]
    Stack(#[from] StackError),

    #[error("unknown opcode {tag:#04x}")]
    UnknownOpcode { tag: u8 },

    #[error("opcode {0} is not implemented")]
    Unimplemented(Opcode),

    #[error("{opcode} takes {expected} operands, found {found}")]
    ArityMismatch {
        opcode: Opcode,
        expected: u32,
        found: u32,
    },

    #[error("jump target {target} lies outside the program (0..={limit})")]
    JumpOutOfRange { target: u32, limit: u32 },

    #[error("jump target {target} is not an instruction boundary")]
    JumpMisaligned { target: u32 },

    #[error("division by zero ({lhs} / {rhs})")]
    DivisionByZero { lhs: Register, rhs: Register },
}

/// A fault together with where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultEvent {
    pub cycle: u32,
    pub pc: u32,
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub fault: Fault,
}

impl fmt::Display for FaultEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle {} at {:#06x}: {}", self.cycle, self.pc, self.fault)
    }
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}
