pub mod demos;
pub mod dump;
pub mod run;
pub mod run_common;
pub mod trace;
