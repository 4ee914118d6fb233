//! Logger setup for the binary and the example runs.

use log::{LevelFilter, SetLoggerError};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Terminal logging at `level`.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    TermLogger::init(level, log_config(), TerminalMode::Mixed, ColorChoice::Auto)
}

/// Terminal logging at `level` plus a debug-level copy of everything written to `file`.
/// Falls back to terminal logging alone if the file cannot be created.
pub fn init_logger_with_file(level: LevelFilter, file: &str) -> Result<(), SetLoggerError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    match File::create(file) {
        Ok(f) => loggers.push(WriteLogger::new(LevelFilter::Debug, log_config(), f)),
        Err(e) => eprintln!("cannot open log file '{}': {}", file, e),
    }
    CombinedLogger::init(loggers)
}
