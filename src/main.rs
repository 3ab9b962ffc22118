//! Binary entrypoint for the `adbfs` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; everything it can set has a flag or default.
    let _ = dotenvy::dotenv();
    match adbfs::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
