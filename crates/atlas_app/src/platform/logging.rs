//! Platform logging initialization for atlas_app.
//!
//! Writes logs to `./atlas.log` in the current working directory.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

const LOG_PATH: &str = "./atlas.log";

/// Destination for log output.
#[derive(Clone, Copy)]
pub enum LogDestination {
    /// Write to ./atlas.log in current directory.
    File,
    /// Write to terminal (stderr, so log lines do not interleave with the
    /// rendered country list on stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Install the process-wide logger. When the log file cannot be created the
/// terminal half still comes up; a file-only destination falls back to no
/// logging at all.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        match File::create(LOG_PATH) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            // The logger is not installed yet, so this goes straight to
            // stderr.
            Err(err) => eprintln!("could not create log file {LOG_PATH}: {err}"),
        }
    }

    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}
