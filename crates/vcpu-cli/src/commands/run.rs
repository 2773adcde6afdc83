//! Run a demo and print the report.

use vcpu_core::Colors;

use super::run_common::{self, CliError};

pub struct RunArgs {
    pub demo: String,
    pub fuel: u32,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: RunArgs) {
    let report = run_common::load_demo(&args.demo)
        .and_then(|demo| run_common::prepare_cpu(demo, args.fuel))
        .and_then(|mut cpu| cpu.execute().map_err(CliError::from))
        .unwrap_or_else(|e| run_common::exit_with(e));

    if args.json {
        let json = serde_json::to_string_pretty(&report).expect("json serialization failed");
        println!("{json}");
        return;
    }

    print!("{}", report.render(Colors::new(args.color)));
}
