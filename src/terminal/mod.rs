//! Narrow collaborators a command uses to talk to the host terminal.
//!
//! Includes:
//! - `prompt`: reading answers (plain and hidden) from the user.
//! - `signals`: installing a termination handler.
//!
//! [`Terminal`] bundles the factories so every freshly built command gets its own
//! output sink, prompter and signal hook.

mod prompt;
mod signals;

pub use prompt::*;
pub use signals::*;

use crate::output::{Output, StdOutput};

/// Supplies the collaborators handed to each command instance.
pub trait Terminal {
    fn output(&self) -> Box<dyn Output>;
    fn prompter(&self) -> Box<dyn Prompter>;
    fn signals(&self) -> Box<dyn SignalHook>;
}

/// The real terminal: colored stdout, dialoguer prompts and ctrlc signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTerminal;

impl Terminal for StdTerminal {
    fn output(&self) -> Box<dyn Output> {
        Box::new(StdOutput::stdout())
    }

    fn prompter(&self) -> Box<dyn Prompter> {
        Box::new(DialoguerPrompter)
    }

    fn signals(&self) -> Box<dyn SignalHook> {
        Box::new(CtrlcSignals)
    }
}
