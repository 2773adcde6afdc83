//! Command builders for the CLI.
//!
//! run/trace/dump accept each other's flags, with irrelevant ones hidden
//! from `--help`, so switching between them only means changing the verb.

use clap::Command;

use super::args::*;

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
}

/// Add hidden run output args (for commands that don't print a report).
fn with_hidden_run_args(cmd: Command) -> Command {
    cmd.arg(json_arg().hide(true))
        .arg(fuel_arg().hide(true))
}

/// Add hidden dump args (for commands that don't dump).
fn with_hidden_dump_args(cmd: Command) -> Command {
    cmd.arg(memory_arg().hide(true))
        .arg(at_arg().hide(true))
        .arg(rows_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("vcpu")
        .about("Minimal virtual CPU: run, trace and disassemble bytecode programs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(run_command())
        .subcommand(trace_command())
        .subcommand(dump_command())
        .subcommand(demos_command())
}

/// Run a demo and print the final report.
pub fn run_command() -> Command {
    let cmd = Command::new("run")
        .about("Run a built-in demo and print the final machine state")
        .override_usage("  vcpu run <DEMO> [--fuel N] [--json]")
        .after_help(
            r#"EXAMPLES:
  vcpu run push-pop              # registers, cycles and faults
  vcpu run arith --json          # machine-readable report
  vcpu run spin --fuel 100       # stop a runaway loop early"#,
        )
        .arg(demo_arg())
        .arg(fuel_arg())
        .arg(json_arg())
        .arg(color_arg());

    with_hidden_dump_args(with_hidden_trace_args(cmd))
}

/// Run a demo with the print tracer.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace execution of a built-in demo")
        .override_usage("  vcpu trace <DEMO> [-v|-vv] [--fuel N]")
        .after_help(
            r#"EXAMPLES:
  vcpu trace push-pop            # one line per instruction
  vcpu trace arith -v            # with stack traffic
  vcpu trace arith -vv           # with registers after every cycle"#,
        )
        .arg(demo_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    with_hidden_dump_args(cmd.arg(json_arg().hide(true)))
}

/// Disassemble a demo.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show encoded bytecode of a built-in demo")
        .override_usage("  vcpu dump <DEMO> [--memory [--at OFFSET] [--rows N]]")
        .after_help(
            r#"EXAMPLES:
  vcpu dump push-pop             # disassembly
  vcpu dump push-pop --memory    # hexdump of the loaded program block
  vcpu dump arith --memory --at 0 --rows 4"#,
        )
        .arg(demo_arg())
        .arg(memory_arg())
        .arg(at_arg())
        .arg(rows_arg())
        .arg(color_arg());

    with_hidden_run_args(with_hidden_trace_args(cmd))
}

/// List built-in demos.
pub fn demos_command() -> Command {
    Command::new("demos").about("List built-in demo programs")
}
