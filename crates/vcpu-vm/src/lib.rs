//! Virtual CPU for executing vcpu bytecode.
//!
//! This crate provides the machine that loads a [`Program`](vcpu_bytecode::Program)
//! into its memory image and runs it: a 64 KiB memory with a slab allocator,
//! a 1 KiB upward-growing stack, fourteen registers, and the
//! fetch-decode-execute loop.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Cpu, CpuBuilder, Fault, FaultEvent, FuelLimits, HaltReason, LoadError, MEMORY_SIZE, Memory,
    MemoryError, NoopTracer, PADDING_SIZE, PrintTracer, RegisterFile, RunInfo, RunReport,
    RuntimeError, STACK_SIZE, Stack, StackError, Tracer, Verbosity,
};
