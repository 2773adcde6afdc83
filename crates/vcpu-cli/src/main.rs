mod cli;
mod commands;

use cli::{DemosParams, DumpParams, RunParams, TraceParams, build_cli};

fn main() {
    vcpu_core::init_logging(vcpu_core::DEFAULT_FILTER);

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("demos", m)) => {
            let _params = DemosParams::from_matches(m);
            commands::demos::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}
