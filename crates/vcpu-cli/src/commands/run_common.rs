//! Shared setup for commands that load a demo into a CPU.

use tracing::debug;
use vcpu_vm::{Cpu, LoadError, RuntimeError};

use super::demos::Demo;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown demo `{0}` (run `vcpu demos` for the list)")]
    UnknownDemo(String),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl CliError {
    /// Process exit code: 1 for usage errors, 2 for machine errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownDemo(_) => 1,
            CliError::Load(_) | CliError::Runtime(_) => 2,
        }
    }
}

pub fn load_demo(name: &str) -> Result<Demo, CliError> {
    Demo::from_name(name).ok_or_else(|| CliError::UnknownDemo(name.to_owned()))
}

/// Build a CPU with `fuel` and load the demo into it.
pub fn prepare_cpu(demo: Demo, fuel: u32) -> Result<Cpu, CliError> {
    let mut cpu = Cpu::builder().cycle_fuel(fuel).build();
    cpu.initialize(&demo.program())?;
    debug!(demo = demo.name(), fuel, "prepared cpu");
    Ok(cpu)
}

/// Print the error and exit with its code.
pub fn exit_with(err: CliError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(err.exit_code());
}
