//! Binary entrypoint for the `t3po` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Record/replay is handled in commands::dispatch via T3PO_RECORD / T3PO_REPLAY.
    match t3po::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
