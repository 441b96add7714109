//! `studentdb` binary: the interactive menu on stdin/stdout.
//!
//! Diagnostics go to stderr through `tracing`; set `STUDENTDB_LOG` to a level
//! (`error`, `warn`, `info`, `debug`, `trace`) to see more.

use std::io;
use std::process::ExitCode;

use studentdb::common::config::LOG_ENV_VAR;
use studentdb::menu::{self, Console};
use tracing::Level;

fn main() -> ExitCode {
    init_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    match menu::run(&mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}
