//! Execution tracing for debugging programs.
//!
//! The executor is generic over [`Tracer`]. With [`NoopTracer`] every hook is
//! an empty `#[inline(always)]` function, so untraced runs pay nothing.
//! [`PrintTracer`] collects one line per dispatched instruction plus sub-lines
//! whose amount depends on [`Verbosity`].
//!
//! ```text
//! 0001  0x0403  PUSH 25
//!       push 25 (sp 4)
//! 0002  0x040c  POP r5
//!       pop 25 (sp 0)
//! ```

use vcpu_bytecode::{Op, Register, format_op};
use vcpu_core::Colors;

use super::error::RuntimeError;
use super::fault::FaultEvent;
use super::registers::RegisterFile;
use super::report::HaltReason;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Instructions, faults and the final outcome.
    #[default]
    Default,
    /// (-v) adds stack traffic and jumps.
    Verbose,
    /// (-vv) adds the register file after every cycle.
    VeryVerbose,
}

/// Hooks called by the executor.
///
/// - `trace_instruction` - after decoding, before dispatch
/// - `trace_push` / `trace_pop` - after a stack operation succeeds
/// - `trace_jump` - after the cursor moves
/// - `trace_registers` - at the end of every cycle
/// - `trace_fault` - when a soft fault is recorded
/// - `trace_halt` / `trace_abort` - once, when the run ends
pub trait Tracer {
    fn trace_instruction(&mut self, cycle: u32, pc: u32, op: &Op);

    fn trace_push(&mut self, value: u32, sp: u32);

    fn trace_pop(&mut self, dst: Register, value: u32, sp: u32);

    fn trace_jump(&mut self, target: u32);

    fn trace_registers(&mut self, registers: &RegisterFile);

    fn trace_fault(&mut self, event: &FaultEvent);

    fn trace_halt(&mut self, reason: HaltReason, cycles: u32);

    fn trace_abort(&mut self, error: &RuntimeError);
}

/// Tracer that compiles away.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _cycle: u32, _pc: u32, _op: &Op) {}

    #[inline(always)]
    fn trace_push(&mut self, _value: u32, _sp: u32) {}

    #[inline(always)]
    fn trace_pop(&mut self, _dst: Register, _value: u32, _sp: u32) {}

    #[inline(always)]
    fn trace_jump(&mut self, _target: u32) {}

    #[inline(always)]
    fn trace_registers(&mut self, _registers: &RegisterFile) {}

    #[inline(always)]
    fn trace_fault(&mut self, _event: &FaultEvent) {}

    #[inline(always)]
    fn trace_halt(&mut self, _reason: HaltReason, _cycles: u32) {}

    #[inline(always)]
    fn trace_abort(&mut self, _error: &RuntimeError) {}
}

/// Width of the `cycle  pc  ` prefix, used to indent sub-lines.
const SUBLINE_INDENT: usize = 6;

/// Tracer that collects formatted lines.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
}

/// Builder for [`PrintTracer`].
pub struct PrintTracerBuilder {
    verbosity: Verbosity,
    colored: bool,
}

impl PrintTracerBuilder {
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn colored(mut self, enabled: bool) -> Self {
        self.colored = enabled;
        self
    }

    pub fn build(self) -> PrintTracer {
        PrintTracer {
            verbosity: self.verbosity,
            colors: Colors::new(self.colored),
            lines: Vec::new(),
        }
    }
}

impl PrintTracer {
    pub fn builder() -> PrintTracerBuilder {
        PrintTracerBuilder {
            verbosity: Verbosity::Default,
            colored: false,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with trailing newlines.
    pub fn output(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn add_subline(&mut self, content: String) {
        self.lines
            .push(format!("{:indent$}{content}", "", indent = SUBLINE_INDENT));
    }
}

impl Tracer for PrintTracer {
    fn trace_instruction(&mut self, cycle: u32, pc: u32, op: &Op) {
        let c = self.colors;
        self.lines.push(format!(
            "{}{cycle:04}  {pc:#06x}{}  {}",
            c.muted,
            c.reset,
            format_op(op, c)
        ));
    }

    fn trace_push(&mut self, value: u32, sp: u32) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        self.add_subline(format!(
            "push {}{}{} {}(sp {sp}){}",
            c.value, value as i32, c.reset, c.muted, c.reset
        ));
    }

    fn trace_pop(&mut self, dst: Register, value: u32, sp: u32) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        self.add_subline(format!(
            "pop {}{}{} -> {dst} {}(sp {sp}){}",
            c.value, value as i32, c.reset, c.muted, c.reset
        ));
    }

    fn trace_jump(&mut self, target: u32) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        self.add_subline(format!("jump -> {target}"));
    }

    fn trace_registers(&mut self, registers: &RegisterFile) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        let regs: Vec<String> = registers
            .iter()
            .map(|(r, v)| format!("{}{}{}={}", c.muted, r, c.reset, v as i32))
            .collect();
        self.add_subline(regs.join(" "));
    }

    fn trace_fault(&mut self, event: &FaultEvent) {
        let c = self.colors;
        self.add_subline(format!("{}fault{}: {}", c.fault, c.reset, event.fault));
    }

    fn trace_halt(&mut self, reason: HaltReason, cycles: u32) {
        let c = self.colors;
        self.lines.push(format!(
            "{}halt{}: {reason} after {cycles} cycles",
            c.value, c.reset
        ));
    }

    fn trace_abort(&mut self, error: &RuntimeError) {
        let c = self.colors;
        self.lines
            .push(format!("{}abort{}: {error}", c.fault, c.reset));
    }
}
