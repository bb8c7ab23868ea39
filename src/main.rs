//! obsidian-tasks CLI - list and add tasks in a markdown vault

use std::process::ExitCode;

fn main() -> ExitCode {
    match obsidian_tasks::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
