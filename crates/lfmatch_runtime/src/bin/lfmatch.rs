//! lfmatch CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use lfmatch_runtime::report::render_error;
use lfmatch_runtime::{RuntimeConfig, init_logging, run};

fn main() -> ExitCode {
    let config = RuntimeConfig::parse();
    init_logging(config.log.as_deref());

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31m{}\x1b[0m", render_error(&e));
            ExitCode::FAILURE
        }
    }
}
