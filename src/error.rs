//! Defines the framework's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.
//!
//! Validation failures never terminate the process from inside the library. They
//! surface as [`AppError::Bail`] or [`AppError::Fatal`] after the user has already
//! been told what went wrong, and the binary's `main` turns them into an exit code.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all framework errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// The argv vector carried no command name.
    #[error("Command not specified")]
    CommandNotSpecified,

    /// Nothing is registered (or auto-resolvable) under the requested name.
    #[error("Command [{0}] does not exist")]
    CommandNotFound(String),

    /// The name resolved to a type identifier that lacks the command capability.
    #[error("Command [{name}] resolved to [{type_id}], which must extend Command")]
    InvalidCommandType { name: String, type_id: String },

    /// Malformed registration input, raised before anything is registered.
    #[error("Configuration Error: {0}")]
    Configuration(String),

    /// A shared command instance was dispatched again while it was still firing.
    #[error("Command [{0}] is already running")]
    AlreadyRunning(String),

    /// A critical message has already been written to the output sink.
    #[error("{message}")]
    Fatal { message: String, code: u8 },

    /// Usage or help has already been shown; terminate without further output.
    #[error("Terminated with exit code {code}")]
    Bail { code: u8 },

    /// The user aborted an interactive prompt.
    #[error("Aborted")]
    Aborted,

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Prompt Error: {0}")]
    Prompt(Arc<dialoguer::Error>),

    /// Error raised while installing a termination handler (`ctrlc`).
    #[error("Signal Error: {0}")]
    Signal(Arc<ctrlc::Error>),

    /// Any other error produced by a command's own logic.
    #[error("Command Error: {0}")]
    Command(Arc<anyhow::Error>),
}

/// A specialized `Result` type using the framework's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Exit code used by every framework-triggered fatal path.
pub const DEFAULT_EXIT_CODE: u8 = 1;

impl AppError {
    /// The process exit code this error should terminate with.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Fatal { code, .. } | AppError::Bail { code } => *code,
            _ => DEFAULT_EXIT_CODE,
        }
    }

    /// Whether the user has already been shown a diagnostic for this error.
    pub fn is_reported(&self) -> bool {
        matches!(self, AppError::Fatal { .. } | AppError::Bail { .. })
    }
}

// --- From implementations ---

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(Arc::new(err))
    }
}

impl From<ctrlc::Error> for AppError {
    fn from(err: ctrlc::Error) -> Self {
        AppError::Signal(Arc::new(err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Command(Arc::new(err))
    }
}
