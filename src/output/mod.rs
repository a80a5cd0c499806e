//! Leveled, user-facing output for commands.
//!
//! Includes:
//! - `Output`: the sink trait commands write through.
//! - `StdOutput`: renders records as ANSI colored blocks on the terminal.
//! - `QuietOutput`: swallows everything, swapped in by `--quiet`.

mod std_output;

pub use std_output::*;

use serde_json::{Map, Value};
use std::fmt;

/// Structured key/value data attached to a record.
pub type LogContext = Map<String, Value>;

/// Severity of a record, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Alert => "alert",
            Level::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sink for leveled messages.
///
/// Implementors only provide [`Output::log`]; the per-level helpers forward to it
/// with an empty context.
pub trait Output {
    fn log(&self, level: Level, message: &str, context: &LogContext);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message, &LogContext::new());
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message, &LogContext::new());
    }

    fn notice(&self, message: &str) {
        self.log(Level::Notice, message, &LogContext::new());
    }

    fn warning(&self, message: &str) {
        self.log(Level::Warning, message, &LogContext::new());
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message, &LogContext::new());
    }

    fn critical(&self, message: &str) {
        self.log(Level::Critical, message, &LogContext::new());
    }

    fn alert(&self, message: &str) {
        self.log(Level::Alert, message, &LogContext::new());
    }

    fn emergency(&self, message: &str) {
        self.log(Level::Emergency, message, &LogContext::new());
    }
}

/// Drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuietOutput;

impl Output for QuietOutput {
    fn log(&self, _level: Level, _message: &str, _context: &LogContext) {}
}
