//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same arg definition is reused across commands with different
//! visibility settings (via `.hide(true)`).

use clap::{Arg, ArgAction, value_parser};

/// Built-in demo program (positional).
pub fn demo_arg() -> Arg {
    Arg::new("demo")
        .value_name("DEMO")
        .required(true)
        .help("Built-in demo program (see `vcpu demos`)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Cycle fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Maximum instructions to execute")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for stack traffic, -vv for registers)")
}

/// Report as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the run report as JSON")
}

/// Hexdump the loaded program (--memory).
pub fn memory_arg() -> Arg {
    Arg::new("memory")
        .long("memory")
        .action(ArgAction::SetTrue)
        .help("Hexdump the memory block holding the program")
}

/// Start offset for the hexdump (--at).
pub fn at_arg() -> Arg {
    Arg::new("at")
        .long("at")
        .value_name("OFFSET")
        .value_parser(value_parser!(i64))
        .allow_negative_numbers(true)
        .help("Hexdump from this memory offset instead of the program block")
}

/// Hexdump row count (--rows).
pub fn rows_arg() -> Arg {
    Arg::new("rows")
        .long("rows")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Hexdump rows (default: enough to cover the program)")
}
