//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls bridge dispatch to command handlers

use clap::ArgMatches;
use vcpu_vm::Verbosity;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::run::RunArgs;
use crate::commands::trace::TraceArgs;

pub struct RunParams {
    pub demo: String,
    pub fuel: u32,
    pub json: bool,
    pub color: ColorChoice,
    // Note: verbose, memory, at, rows are parsed but not extracted
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            demo: parse_demo(m),
            fuel: parse_fuel(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            demo: p.demo,
            fuel: p.fuel,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub demo: String,
    pub verbose: u8,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            demo: parse_demo(m),
            verbose: m.get_count("verbose"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            demo: p.demo,
            verbosity,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub demo: String,
    pub memory: bool,
    pub at: Option<i64>,
    pub rows: Option<usize>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            demo: parse_demo(m),
            memory: m.get_flag("memory"),
            at: m.get_one::<i64>("at").copied(),
            rows: m.get_one::<usize>("rows").copied(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            demo: p.demo,
            memory: p.memory,
            at: p.at,
            rows: p.rows,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DemosParams;

impl DemosParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

fn parse_demo(m: &ArgMatches) -> String {
    m.get_one::<String>("demo").cloned().unwrap_or_default()
}

fn parse_fuel(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000)
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    ColorChoice::from_arg(m.get_one::<String>("color").map(String::as_str))
}
