//! Podcast Scheduler - episode scheduling from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = podcast_scheduler::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
