//! Outcome of a completed run.

use std::fmt::{self, Write as _};

use serde::Serialize;
use vcpu_core::Colors;

use super::fault::FaultEvent;
use super::registers::RegisterFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// `PC` reached the end of the loaded program window.
    EndOfProgram,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::EndOfProgram => f.write_str("end of program"),
        }
    }
}

/// Final machine state plus every soft fault raised along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub cycles: u32,
    pub halt: HaltReason,
    pub registers: RegisterFile,
    pub faults: Vec<FaultEvent>,
}

impl RunReport {
    /// Plain-text rendering for terminals.
    pub fn render(&self, colors: Colors) -> String {
        let c = colors;
        let mut out = String::new();

        writeln!(
            out,
            "{}halt{}: {} after {} cycles",
            c.value, c.reset, self.halt, self.cycles
        )
        .unwrap();

        for chunk in self.registers.iter().collect::<Vec<_>>().chunks(7) {
            let line: Vec<String> = chunk
                .iter()
                .map(|(r, v)| format!("{}{:>2}{} {:<6}", c.mnemonic, r.name(), c.reset, *v as i32))
                .collect();
            writeln!(out, "{}", line.join(" ").trim_end()).unwrap();
        }

        if !self.faults.is_empty() {
            writeln!(out, "{}faults{}: {}", c.fault, c.reset, self.faults.len()).unwrap();
            for event in &self.faults {
                writeln!(out, "  {event}").unwrap();
            }
        }

        out
    }
}
