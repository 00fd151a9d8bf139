use rlrun::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("rlrun: {error}");
            ExitCode::FAILURE
        }
    }
}
