//! Terminal palette for disassembly, traces and run reports.
//!
//! Colors are assigned by role rather than by hue, so every renderer marks
//! the same kind of token the same way:
//! - `mnemonic`: opcode names and register names
//! - `value`: immediates, jump targets, clean halts
//! - `fault`: soft faults, unknown opcodes, aborts
//! - `muted`: offsets, addresses, cycle numbers

/// Escape codes per role. Each field is empty when colors are off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub mnemonic: &'static str,
    pub value: &'static str,
    pub fault: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Standard 16-color ANSI codes.
    pub const ON: Self = Self {
        mnemonic: "\x1b[34m",
        value: "\x1b[32m",
        fault: "\x1b[31m",
        muted: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        mnemonic: "",
        value: "",
        fault: "",
        muted: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
