//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: run/trace/dump accept each other's flags without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use vcpu_vm::Verbosity;

use super::*;
use crate::cli::commands::{demos_command, dump_command, run_command, trace_command};
use crate::commands::dump::DumpArgs;
use crate::commands::trace::TraceArgs;

#[test]
fn run_extracts_params() {
    let m = run_command()
        .try_get_matches_from(["run", "arith", "--fuel", "50", "--json", "--color", "never"])
        .unwrap();
    let params = RunParams::from_matches(&m);

    assert_eq!(params.demo, "arith");
    assert_eq!(params.fuel, 50);
    assert!(params.json);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn run_defaults() {
    let m = run_command().try_get_matches_from(["run", "spin"]).unwrap();
    let params = RunParams::from_matches(&m);

    assert_eq!(params.fuel, 1_000_000);
    assert!(!params.json);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn run_requires_demo() {
    assert!(run_command().try_get_matches_from(["run"]).is_err());
}

#[test]
fn run_accepts_trace_and_dump_flags() {
    let result = run_command().try_get_matches_from([
        "run", "push-pop", "-vv", "--memory", "--rows", "3", "--at", "10",
    ]);
    assert!(
        result.is_ok(),
        "run should accept trace/dump flags: {:?}",
        result.err()
    );
}

#[test]
fn trace_counts_verbosity() {
    for (flags, expected) in [
        (vec![], Verbosity::Default),
        (vec!["-v"], Verbosity::Verbose),
        (vec!["-vv"], Verbosity::VeryVerbose),
        (vec!["-vvv"], Verbosity::VeryVerbose),
    ] {
        let mut argv = vec!["trace", "arith"];
        argv.extend(flags);
        let m = trace_command().try_get_matches_from(argv).unwrap();
        let args: TraceArgs = TraceParams::from_matches(&m).into();
        assert_eq!(args.verbosity, expected);
    }
}

#[test]
fn trace_accepts_run_and_dump_flags() {
    let result =
        trace_command().try_get_matches_from(["trace", "spin", "--json", "--memory", "--at", "0"]);
    assert!(
        result.is_ok(),
        "trace should accept run/dump flags: {:?}",
        result.err()
    );
}

#[test]
fn dump_extracts_memory_options() {
    let m = dump_command()
        .try_get_matches_from(["dump", "arith", "--memory", "--at", "-4", "--rows", "2"])
        .unwrap();
    let args: DumpArgs = DumpParams::from_matches(&m).into();

    assert_eq!(args.demo, "arith");
    assert!(args.memory);
    assert_eq!(args.at, Some(-4));
    assert_eq!(args.rows, Some(2));
}

#[test]
fn dump_accepts_run_flags() {
    let result =
        dump_command().try_get_matches_from(["dump", "spin", "--fuel", "10", "--json", "-v"]);
    assert!(
        result.is_ok(),
        "dump should accept run flags: {:?}",
        result.err()
    );
}

#[test]
fn dump_rejects_bad_rows() {
    assert!(
        dump_command()
            .try_get_matches_from(["dump", "arith", "--rows", "many"])
            .is_err()
    );
}

#[test]
fn color_values_are_validated() {
    assert!(
        run_command()
            .try_get_matches_from(["run", "arith", "--color", "sometimes"])
            .is_err()
    );
}

#[test]
fn color_choice_resolves_against_stdout() {
    assert_eq!(ColorChoice::from_arg(Some("always")), ColorChoice::Always);
    assert_eq!(ColorChoice::from_arg(Some("never")), ColorChoice::Never);
    assert_eq!(ColorChoice::from_arg(None), ColorChoice::Auto);

    assert!(ColorChoice::Auto.resolve(true));
    assert!(!ColorChoice::Auto.resolve(false));
    assert!(ColorChoice::Always.resolve(false));
    assert!(!ColorChoice::Never.resolve(true));
}

#[test]
fn hidden_flags_stay_out_of_help() {
    let help = dump_command().render_help().to_string();
    assert!(help.contains("--memory"));
    assert!(!help.contains("--fuel"));
    assert!(!help.contains("--json"));

    let help = run_command().render_help().to_string();
    assert!(help.contains("--fuel"));
    assert!(!help.contains("--rows"));
}

#[test]
fn demos_takes_no_arguments() {
    assert!(demos_command().try_get_matches_from(["demos"]).is_ok());
    assert!(
        demos_command()
            .try_get_matches_from(["demos", "extra"])
            .is_err()
    );
}

#[test]
fn cli_requires_subcommand() {
    assert!(build_cli().try_get_matches_from(["vcpu"]).is_err());
    assert!(
        build_cli()
            .try_get_matches_from(["vcpu", "run", "push-pop"])
            .is_ok()
    );
}
