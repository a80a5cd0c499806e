//! The `Command` trait and the context handed to its `fire` entry point.

use super::schema::{OptionFlags, Schema};
use crate::app::Application;
use crate::error::{AppError, Result, DEFAULT_EXIT_CODE};
use crate::input::OptionValue;
use crate::output::Output;
use crate::terminal::{Prompter, SignalHook, TerminationHandler};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// A unit of CLI functionality.
///
/// `configure` declares the arguments and options; `fire` runs once the input
/// has been validated against them.
pub trait Command {
    /// Declares positional arguments and options. Declares nothing by default.
    fn configure(&self, _schema: &mut Schema) {}

    /// Runs the command.
    fn fire(&mut self, ctx: &mut CommandContext) -> Result<()>;
}

/// Validated input plus the collaborators a running command talks to.
pub struct CommandContext {
    name: String,
    schema: Schema,
    arguments: HashMap<String, String>,
    options: HashMap<String, OptionValue>,
    output: Box<dyn Output>,
    prompter: Box<dyn Prompter>,
    signals: Box<dyn SignalHook>,
    app: Weak<Application>,
}

impl CommandContext {
    pub(crate) fn new(
        name: String,
        schema: Schema,
        output: Box<dyn Output>,
        prompter: Box<dyn Prompter>,
        signals: Box<dyn SignalHook>,
    ) -> Self {
        Self {
            name,
            schema,
            arguments: HashMap::new(),
            options: HashMap::new(),
            output,
            prompter,
            signals,
            app: Weak::new(),
        }
    }

    pub(crate) fn bind_argument(&mut self, name: &str, value: String) {
        self.arguments.insert(name.to_string(), value);
    }

    pub(crate) fn bind_option(&mut self, long: &str, value: OptionValue) {
        self.options.insert(long.to_string(), value);
    }

    pub(crate) fn set_application(&mut self, app: Weak<Application>) {
        self.app = app;
    }

    /// The name the command was invoked under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The owning application, once the dispatcher has injected it.
    pub fn application(&self) -> Option<Rc<Application>> {
        self.app.upgrade()
    }

    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }

    pub fn argument_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.argument(name).unwrap_or(default)
    }

    pub fn arguments(&self) -> &HashMap<String, String> {
        &self.arguments
    }

    /// The bound value of an option, keyed by its long name.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// The option's explicit value, or `default` when unset or a bare flag.
    pub fn option_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.option(name)
            .and_then(OptionValue::as_str)
            .unwrap_or(default)
    }

    /// Whether the option is set to something truthy.
    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some_and(OptionValue::is_truthy)
    }

    pub fn options(&self) -> &HashMap<String, OptionValue> {
        &self.options
    }

    /// Values of an option; array options are split on `,`.
    pub fn option_values(&self, name: &str) -> Vec<&str> {
        let Some(value) = self.option(name).and_then(OptionValue::as_str) else {
            return Vec::new();
        };

        let is_array = self
            .schema
            .options()
            .iter()
            .any(|o| o.long == name && o.flags.contains(OptionFlags::VALUE_IS_ARRAY));

        if !is_array {
            return vec![value];
        }

        value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn output(&self) -> &dyn Output {
        self.output.as_ref()
    }

    pub fn set_output(&mut self, output: Box<dyn Output>) {
        self.output = output;
    }

    /// Prints the usage line and the option table.
    pub fn show_usage(&self) {
        self.output.info(&self.schema.usage_line(&self.name));
        self.output.info(&self.schema.options_table());
    }

    /// Prints `question` and reads one line of input.
    pub fn ask(&self, question: &str) -> Result<String> {
        self.output.info(question);
        self.prompter.read_line()
    }

    /// Prints `question` and reads one line of input without echoing it.
    pub fn secret(&self, question: &str) -> Result<String> {
        self.output.info(question);
        let value = self.prompter.read_secret()?;
        self.output.info("");
        Ok(value)
    }

    /// Prints `question Y/n`; only `y` and `yes` (any case) count as yes.
    pub fn confirm(&self, question: &str) -> Result<bool> {
        self.output.info(&format!("{} Y/n", question));
        let line = self.prompter.read_line()?.trim().to_lowercase();
        Ok(line == "y" || line == "yes")
    }

    /// Reports `message` as critical and returns the error that ends the run.
    ///
    /// ```ignore
    /// return Err(ctx.fatal("Database unreachable", 2));
    /// ```
    pub fn fatal(&self, message: &str, code: u8) -> AppError {
        self.output.critical(message);
        AppError::Fatal {
            message: message.to_string(),
            code,
        }
    }

    /// [`fatal`](Self::fatal) with the default exit code.
    pub fn fatal_default(&self, message: &str) -> AppError {
        self.fatal(message, DEFAULT_EXIT_CODE)
    }

    /// Returns the error that ends the run without any further output.
    pub fn bail(&self, code: u8) -> AppError {
        AppError::Bail { code }
    }

    /// Runs `handler` when the process receives SIGINT or SIGTERM.
    pub fn on_terminate<F>(&self, handler: F) -> Result<()>
    where
        F: Fn() + Send + 'static,
    {
        let handler: TerminationHandler = Box::new(handler);
        self.signals.on_terminate(handler)
    }
}
