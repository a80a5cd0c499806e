//! Reading user input through `dialoguer`.

use crate::error::{AppError, Result};
use dialoguer::{Input, Password};
use std::io;
use tracing::debug;

/// Reads answers from the user. The question itself is printed by the caller.
pub trait Prompter {
    /// Reads one visible line.
    fn read_line(&self) -> Result<String>;
    /// Reads one line without echoing it.
    fn read_secret(&self) -> Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn read_line(&self) -> Result<String> {
        let line: String = Input::new().allow_empty(true).interact_text()?;
        Ok(line.trim().to_string())
    }

    fn read_secret(&self) -> Result<String> {
        Password::new()
            .allow_empty_password(true)
            .interact()
            .map_err(|e| match e {
                dialoguer::Error::IO(ref io_err) if io_err.kind() == io::ErrorKind::Interrupted => {
                    debug!("Hidden input interrupted");
                    AppError::Aborted
                },
                other => AppError::from(other),
            })
    }
}
