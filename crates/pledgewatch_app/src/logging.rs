//! Logger initialization for the pledgewatch binary.
//!
//! Both the terminal and the optional log file get info and up; `--verbose`
//! lowers them to debug. Log lines go to stderr, status lines to stdout.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub fn initialize(verbose: bool, log_file: Option<&Path>) {
    let level = level_for(verbose);
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(file_logger) = log_file.and_then(|path| create_file_logger(path, level, config)) {
        loggers.push(file_logger);
    }

    let _ = CombinedLogger::init(loggers);
}

fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
