//! Installing termination handlers through `ctrlc`.

use crate::error::Result;
use tracing::debug;

/// A callback run when the process receives SIGINT or SIGTERM.
pub type TerminationHandler = Box<dyn Fn() + Send + 'static>;

/// Registers termination handlers with the host platform.
pub trait SignalHook {
    fn on_terminate(&self, handler: TerminationHandler) -> Result<()>;
}

/// Backed by `ctrlc` with the `termination` feature, covering SIGINT and SIGTERM.
///
/// `ctrlc` accepts a single handler per process; a second registration fails
/// with [`AppError::Signal`](crate::AppError::Signal).
#[derive(Debug, Clone, Copy, Default)]
pub struct CtrlcSignals;

impl SignalHook for CtrlcSignals {
    fn on_terminate(&self, handler: TerminationHandler) -> Result<()> {
        ctrlc::set_handler(move || handler())?;
        debug!("Termination handler installed");
        Ok(())
    }
}
