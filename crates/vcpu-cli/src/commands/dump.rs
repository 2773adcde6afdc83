//! Disassemble a demo, or hexdump it as loaded in memory.

use vcpu_bytecode::dump;
use vcpu_core::Colors;
use vcpu_vm::engine::BLOCK_HEADER_LEN;

use super::run_common;

/// Bytes per hexdump row.
const ROW_WIDTH: usize = 15;

pub struct DumpArgs {
    pub demo: String,
    pub memory: bool,
    pub at: Option<i64>,
    pub rows: Option<usize>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let cpu = run_common::load_demo(&args.demo)
        .and_then(|demo| run_common::prepare_cpu(demo, 0))
        .unwrap_or_else(|e| run_common::exit_with(e));
    let info = cpu.run_info();
    let memory = cpu.memory();

    if !args.memory {
        let window = memory
            .slice(info.program_lower_bound, info.window_len() as usize)
            .unwrap_or_default();
        print!("{}", dump(window, Colors::new(args.color)));
        return;
    }

    // Default view starts at the block header in front of the program.
    let offset = args
        .at
        .unwrap_or(i64::from(info.program_lower_bound) - BLOCK_HEADER_LEN as i64);
    let rows = args.rows.unwrap_or_else(|| {
        (info.window_len() as usize + BLOCK_HEADER_LEN).div_ceil(ROW_WIDTH)
    });

    match memory
        .address_of(offset)
        .and_then(|addr| memory.hexdump(addr, rows))
    {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
