//! A minimal framework for subcommand-driven command line applications.
//!
//! Includes:
//! - `input`: tokenizing argv into positional arguments and options.
//! - `command`: command schemas, validated instances and the `Command` trait.
//! - `app`: the registry, name resolution and dispatch.
//! - `output`: leveled, colored terminal output.
//! - `terminal`: prompts and termination signals.
//!
//! ```no_run
//! use cmdkit::{AppConfig, Application, Command, CommandContext, Requiredness, Result, Schema};
//! use std::rc::Rc;
//!
//! struct Hello;
//!
//! impl Command for Hello {
//!     fn configure(&self, schema: &mut Schema) {
//!         schema.argument("name", Requiredness::Required);
//!     }
//!
//!     fn fire(&mut self, ctx: &mut CommandContext) -> Result<()> {
//!         ctx.output().info(&format!("Hello {}", ctx.argument_or("name", "")));
//!         Ok(())
//!     }
//! }
//!
//! let mut app = Application::new(AppConfig::from_env());
//! app.types_mut().register_command("Hello", || Box::new(Hello));
//! app.register("hello", "Hello");
//! let app = Rc::new(app);
//! app.run_from_argv(std::env::args())?;
//! # Ok::<(), cmdkit::AppError>(())
//! ```

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod terminal;

#[cfg(test)]
mod testing;

pub use app::{Application, BulkEntry, CommandSource, Registration, TypeRegistry};
pub use command::{
    Command, CommandContext, CommandInstance, OptionFlags, Requiredness, Schema,
};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use input::{parse_args, OptionValue, ParsedInput};
pub use output::{Level, Output, QuietOutput, StdOutput};
