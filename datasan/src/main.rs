// datasan/src/main.rs
//! datasan entry point.

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use datasan::cli::Cli;
use datasan::logger;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match datasan::run(cli) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
