use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "research-assistant")]
#[command(about = "Ask questions about your documents through a question-answering backend")]
pub struct Cli {
    /// Backend base address (falls back to $ASSISTANT_API_URL, then http://localhost:8000)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds between backend status checks
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub poll_secs: u64,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
