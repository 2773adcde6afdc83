//! Trace demo execution for debugging.

use vcpu_core::Colors;
use vcpu_vm::{PrintTracer, Verbosity};

use super::run_common::{self, CliError};

pub struct TraceArgs {
    pub demo: String,
    pub verbosity: Verbosity,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let mut cpu = run_common::load_demo(&args.demo)
        .and_then(|demo| run_common::prepare_cpu(demo, args.fuel))
        .unwrap_or_else(|e| run_common::exit_with(e));

    let mut tracer = PrintTracer::builder()
        .verbosity(args.verbosity)
        .colored(args.color)
        .build();

    let result = cpu.execute_with(&mut tracer);
    tracer.print();

    match result {
        Ok(report) => {
            let colors = Colors::new(args.color);
            println!("{}---{}", colors.muted, colors.reset);
            print!("{}", report.render(colors));
        }
        Err(e) => run_common::exit_with(CliError::from(e)),
    }
}
