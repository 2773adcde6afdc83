//! Runtime engine for executing vcpu programs.
//!
//! The CPU loads an encoded program into a block of its memory image and
//! replays it instruction by instruction, mutating the register file and the
//! stack until the program counter leaves the loaded window.

mod error;
mod fault;
mod memory;
mod registers;
mod report;
mod stack;
mod trace;
mod vm;

#[cfg(test)]
mod memory_tests;
#[cfg(test)]
mod report_tests;
#[cfg(test)]
mod trace_tests;

pub use error::{LoadError, RuntimeError};
pub use fault::{Fault, FaultEvent};
pub use memory::{
    BLOCK_ALLOCATED, BLOCK_HEADER_LEN, FREE_SENTINEL, MEMORY_SIZE, Memory, MemoryError,
    PADDING_SIZE, STACK_SIZE, slab_boundaries,
};
pub use registers::RegisterFile;
pub use report::{HaltReason, RunReport};
pub use stack::{Stack, StackError};
pub use trace::{NoopTracer, PrintTracer, PrintTracerBuilder, Tracer, Verbosity};
pub use vm::{Cpu, CpuBuilder, FuelLimits, RunInfo};
