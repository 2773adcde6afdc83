//! The CPU: owns memory and registers, loads programs, runs them.

use tracing::{debug, error, info, warn};

use vcpu_bytecode::{ArithOp, ByteStream, Op, Program, Register, decode, encode_program};

use super::error::{LoadError, RuntimeError};
use super::fault::{Fault, FaultEvent};
use super::memory::{Memory, STACK_SIZE};
use super::registers::RegisterFile;
use super::report::{HaltReason, RunReport};
use super::stack::Stack;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for execution.
#[derive(Clone, Copy, Debug, Default)]
pub struct FuelLimits {
    /// Maximum dispatched instructions per run (default: unlimited).
    pub(crate) cycle_fuel: Option<u32>,
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cycle fuel limit.
    pub fn cycle_fuel(mut self, fuel: u32) -> Self {
        self.cycle_fuel = Some(fuel);
        self
    }

    pub fn get_cycle_fuel(&self) -> Option<u32> {
        self.cycle_fuel
    }
}

/// Bookkeeping for the loaded program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunInfo {
    pub cycle_count: u32,
    /// First byte of the loaded program.
    pub program_lower_bound: u32,
    /// One past the last byte of the loaded program.
    pub program_upper_bound: u32,
}

impl RunInfo {
    pub fn window_len(&self) -> u32 {
        self.program_upper_bound - self.program_lower_bound
    }
}

/// Virtual CPU.
pub struct Cpu {
    memory: Memory,
    registers: RegisterFile,
    pub(super) info: RunInfo,
    /// Window-relative offsets of instruction starts; valid jump targets.
    instruction_starts: Vec<u32>,
    limits: FuelLimits,
}

/// Builder for [`Cpu`] instances.
#[derive(Default)]
pub struct CpuBuilder {
    limits: FuelLimits,
}

impl CpuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fuel limits.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the cycle fuel limit.
    pub fn cycle_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.cycle_fuel(fuel);
        self
    }

    pub fn build(self) -> Cpu {
        Cpu {
            memory: Memory::new(),
            registers: RegisterFile::new(),
            info: RunInfo::default(),
            instruction_starts: Vec::new(),
            limits: self.limits,
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn builder() -> CpuBuilder {
        CpuBuilder::new()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Reset memory and registers, then load `program` into a fresh block.
    ///
    /// On success `PC` points at the first instruction and `PX` one past the
    /// last byte.
    pub fn initialize(&mut self, program: &Program) -> Result<(), LoadError> {
        self.initialize_memory();
        self.initialize_registers();
        self.initialize_bytecode(program)
    }

    fn initialize_memory(&mut self) {
        self.memory.reset();
        debug!("initialized memory");
    }

    fn initialize_registers(&mut self) {
        self.registers.reset();
        debug!("initialized registers");
    }

    fn initialize_bytecode(&mut self, program: &Program) -> Result<(), LoadError> {
        self.info = RunInfo::default();
        self.instruction_starts.clear();

        let encoded = encode_program(program)?;
        let size = encoded.len();
        let addr = self
            .memory
            .malloc(size)
            .ok_or(LoadError::OutOfMemory { size })?;
        self.memory.write(addr, encoded.bytes())?;

        let upper = addr + size as u32;
        self.registers.set(Register::Pc, addr);
        self.registers.set(Register::Px, upper);
        self.info.program_lower_bound = addr;
        self.info.program_upper_bound = upper;
        self.instruction_starts = encoded.into_parts().1;

        debug!(
            instructions = program.len(),
            bytes = size,
            pc = addr,
            px = upper,
            "initialized bytecode"
        );
        Ok(())
    }

    /// Execute the loaded program without tracing.
    pub fn execute(&mut self) -> Result<RunReport, RuntimeError> {
        self.execute_with(&mut NoopTracer)
    }

    /// Execute the loaded program from the start of its window.
    ///
    /// Each call replays the window from offset 0. Registers, memory and the
    /// cycle count carry over from the previous run until the next
    /// [`initialize`](Self::initialize).
    ///
    /// A [`RunReport`] is only produced for a run that reaches the end of its
    /// window. On `Err` the run was aborted: the machine is left as it was at
    /// the abort and can be inspected through [`registers`](Self::registers)
    /// and [`run_info`](Self::run_info). Soft faults raised before the abort
    /// reach the tracer and the log but are not returned.
    pub fn execute_with<T: Tracer>(&mut self, tracer: &mut T) -> Result<RunReport, RuntimeError> {
        let lower = self.info.program_lower_bound;
        let upper = self.info.program_upper_bound;
        let window = self
            .memory
            .slice(lower, self.info.window_len() as usize)
            .unwrap_or_default();
        let mut stream = ByteStream::reader(window);

        let mut faults = Vec::new();
        let mut fuel = self.limits.cycle_fuel;

        loop {
            if let Err(e) = self.check_stack_pointer() {
                return Err(self.abort(e, tracer));
            }

            let pc = lower + stream.position() as u32;
            self.registers.set(Register::Pc, pc);
            if pc >= self.registers.get(Register::Px).min(upper) {
                break;
            }

            if let Some(remaining) = fuel.as_mut() {
                if *remaining == 0 {
                    let e = RuntimeError::CycleFuelExhausted(self.info.cycle_count);
                    return Err(self.abort(e, tracer));
                }
                *remaining -= 1;
            }

            let Some(cycle) = self.info.cycle_count.checked_add(1) else {
                let e = RuntimeError::CycleCountOverflow(self.info.cycle_count);
                return Err(self.abort(e, tracer));
            };
            self.info.cycle_count = cycle;

            let decoded = match decode(&mut stream) {
                Ok(decoded) => decoded,
                Err(e) => return Err(self.abort(e.into(), tracer)),
            };
            tracer.trace_instruction(cycle, pc, &decoded.op);

            if let Err(fault) = self.dispatch(decoded.op, &mut stream, tracer) {
                warn!(cycle, pc, "{fault}");
                let event = FaultEvent { cycle, pc, fault };
                tracer.trace_fault(&event);
                faults.push(event);
            }
            tracer.trace_registers(&self.registers);
        }

        let cycles = self.info.cycle_count;
        info!(cycles, faults = faults.len(), "program execution complete");
        tracer.trace_halt(HaltReason::EndOfProgram, cycles);

        Ok(RunReport {
            cycles,
            halt: HaltReason::EndOfProgram,
            registers: self.registers,
            faults,
        })
    }

    fn check_stack_pointer(&self) -> Result<(), RuntimeError> {
        let sp = self.registers.get(Register::Sp);
        if sp as usize > STACK_SIZE {
            return Err(RuntimeError::StackPointerOutOfBounds {
                sp,
                max: STACK_SIZE,
            });
        }
        Ok(())
    }

    fn abort<T: Tracer>(&self, e: RuntimeError, tracer: &mut T) -> RuntimeError {
        error!(cycles = self.info.cycle_count, "{e}");
        tracer.trace_abort(&e);
        e
    }

    fn dispatch<T: Tracer>(
        &mut self,
        op: Op,
        stream: &mut ByteStream,
        tracer: &mut T,
    ) -> Result<(), Fault> {
        match op {
            Op::Push { value } => {
                let mut stack = self.stack();
                stack.push(value as u32)?;
                tracer.trace_push(value as u32, stack.pointer());
            }
            Op::Pop { dst } => {
                // Underflow still clears the destination.
                let popped = self.stack().pop();
                self.registers.set(dst, popped.as_ref().copied().unwrap_or(0));
                let value = popped?;
                tracer.trace_pop(dst, value, self.registers.get(Register::Sp));
            }
            Op::Arith { op, lhs, rhs } => {
                let a = self.registers.get(lhs) as i32;
                let b = self.registers.get(rhs) as i32;
                let result = match op {
                    ArithOp::Add => a.wrapping_add(b),
                    ArithOp::Sub => a.wrapping_sub(b),
                    ArithOp::Mul => a.wrapping_mul(b),
                    ArithOp::Div => {
                        if b == 0 {
                            return Err(Fault::DivisionByZero { lhs, rhs });
                        }
                        a.wrapping_div(b)
                    }
                    ArithOp::Or => a | b,
                    ArithOp::Xor => a ^ b,
                };
                self.registers.set(lhs, result as u32);
            }
            Op::Jmp { target } => {
                self.check_jump(target)?;
                stream.set_position(target as usize);
                tracer.trace_jump(target);
            }
            Op::Unimplemented { opcode, .. } => return Err(Fault::Unimplemented(opcode)),
            Op::Unknown { tag, .. } => return Err(Fault::UnknownOpcode { tag }),
            Op::ArityMismatch {
                opcode,
                expected,
                found,
            } => {
                return Err(Fault::ArityMismatch {
                    opcode,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// A target must name an instruction start or the end of the window.
    fn check_jump(&self, target: u32) -> Result<(), Fault> {
        let limit = self.info.window_len();
        if target > limit {
            return Err(Fault::JumpOutOfRange { target, limit });
        }
        if target != limit && self.instruction_starts.binary_search(&target).is_err() {
            return Err(Fault::JumpMisaligned { target });
        }
        Ok(())
    }

    fn stack(&mut self) -> Stack<'_> {
        Stack::new(&mut self.memory, &mut self.registers)
    }

    /// Push onto the stack. Overflow is logged and the value dropped.
    pub fn push(&mut self, value: u32) {
        if let Err(e) = self.stack().push(value) {
            warn!(value, "{e}");
        }
    }

    /// Pop from the stack. Underflow is logged and yields 0.
    pub fn pop(&mut self) -> u32 {
        self.stack().pop().unwrap_or_else(|e| {
            warn!("{e}");
            0
        })
    }

    /// Allocate a block in the heap region.
    pub fn malloc(&mut self, size: usize) -> Option<u32> {
        self.memory.malloc(size)
    }

    /// Release a block returned by [`malloc`](Self::malloc).
    pub fn free(&mut self, addr: u32) -> bool {
        self.memory.free(addr)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn run_info(&self) -> RunInfo {
        self.info
    }

    /// Window-relative offsets of the loaded instructions.
    pub fn instruction_starts(&self) -> &[u32] {
        &self.instruction_starts
    }

    pub fn limits(&self) -> FuelLimits {
        self.limits
    }
}
