use std::fs::File;
use std::path::PathBuf;
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config as LogConfig, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::constants::*;

/// Photo slideshow client for the gallery backend
#[derive(Debug, Parser)]
#[command(name = "photo-gallery", version)]
pub struct Config {
    /// Base URL of the gallery backend
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Terminal log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Also write an info-level log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.log_level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = &config.log_file {
        loggers.push(WriteLogger::new(LevelFilter::Info, LogConfig::default(), File::create(path)?));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
