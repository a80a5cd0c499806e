//! Binding parsed input to a command's schema.
//!
//! Construction is where validation happens. Any failure has already been shown
//! to the user (usage text or a critical message) by the time the error comes
//! back, so callers only need to turn it into an exit code.

use super::context::{Command, CommandContext};
use super::schema::{OptionFlags, Schema};
use crate::app::Application;
use crate::error::{Result, DEFAULT_EXIT_CODE};
use crate::input::ParsedInput;
use crate::output::QuietOutput;
use crate::terminal::Terminal;
use std::fmt;
use std::rc::Weak;
use tracing::debug;

/// A command bound to validated input, ready to fire.
pub struct CommandInstance {
    command: Box<dyn Command>,
    ctx: CommandContext,
}

impl CommandInstance {
    /// Validates `input` against the command's schema and binds it.
    pub fn new(
        name: impl Into<String>,
        command: Box<dyn Command>,
        input: ParsedInput,
        terminal: &dyn Terminal,
    ) -> Result<Self> {
        let name = name.into();
        let mut schema = Schema::new();
        command.configure(&mut schema);

        let mut ctx = CommandContext::new(
            name,
            schema,
            terminal.output(),
            terminal.prompter(),
            terminal.signals(),
        );

        if input.has_option("help") || input.has_option("h") {
            ctx.show_usage();
            return Err(ctx.bail(DEFAULT_EXIT_CODE));
        }

        bind_arguments(&mut ctx, &input)?;
        bind_options(&mut ctx, &input)?;

        if ctx.has_option("quiet") {
            ctx.set_output(Box::new(QuietOutput));
        }

        debug!(
            command = ctx.name(),
            input = %serde_json::to_string(&input).unwrap_or_default(),
            "Command input bound"
        );

        Ok(Self { command, ctx })
    }

    pub fn name(&self) -> &str {
        self.ctx.name()
    }

    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }

    pub(crate) fn set_application(&mut self, app: Weak<Application>) {
        self.ctx.set_application(app);
    }

    /// Runs the command's entry point.
    pub fn fire(&mut self) -> Result<()> {
        self.command.fire(&mut self.ctx)
    }
}

impl fmt::Debug for CommandInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInstance")
            .field("name", &self.ctx.name())
            .field("arguments", self.ctx.arguments())
            .field("options", self.ctx.options())
            .finish()
    }
}

fn bind_arguments(ctx: &mut CommandContext, input: &ParsedInput) -> Result<()> {
    let descriptors = ctx.schema().arguments().to_vec();

    for (index, descriptor) in descriptors.iter().enumerate() {
        match input.arguments.get(index) {
            Some(value) => ctx.bind_argument(&descriptor.name, value.clone()),
            None if descriptor.is_required() => {
                ctx.show_usage();
                return Err(ctx.bail(DEFAULT_EXIT_CODE));
            },
            None => {},
        }
    }

    Ok(())
}

fn bind_options(ctx: &mut CommandContext, input: &ParsedInput) -> Result<()> {
    let merged = ctx.schema().merged_options();

    for descriptor in merged {
        if descriptor.flags.is_required_array() {
            ctx.show_usage();
            return Err(ctx.bail(DEFAULT_EXIT_CODE));
        }

        let value = input.options.get(&descriptor.long).or_else(|| {
            if descriptor.short.is_empty() {
                None
            } else {
                input.options.get(&descriptor.short)
            }
        });

        let Some(value) = value else {
            continue;
        };

        if descriptor.flags.contains(OptionFlags::REQUIRED)
            && (!value.has_value() || value.is_falsy())
        {
            return Err(ctx.fatal_default(&format!(
                "Value for option \"{}\" is required",
                descriptor.display_name()
            )));
        }

        if descriptor.flags.contains(OptionFlags::VALUE_NONE) && value.has_value() {
            return Err(ctx.fatal_default(&format!(
                "Cannot set a value for option \"{}\"",
                descriptor.display_name()
            )));
        }

        ctx.bind_option(&descriptor.long, value.clone());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Requiredness;
    use crate::error::AppError;
    use crate::input::{parse_args, OptionValue};
    use crate::output::Level;
    use crate::testing::TestTerminal;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Declares `name` (required), `title` (optional), `--greeting/-g` (required
    /// value), `--shout/-s` (switch) and `--tags/-t` (array).
    struct Greet {
        fired: Rc<Cell<u32>>,
    }

    impl Command for Greet {
        fn configure(&self, schema: &mut Schema) {
            schema
                .argument("name", Requiredness::Required)
                .argument("title", Requiredness::Optional)
                .option("greeting", "g", OptionFlags::REQUIRED, "Greeting to use")
                .option("shout", "s", OptionFlags::VALUE_NONE, "Upper-case the output")
                .option("tags", "t", OptionFlags::VALUE_IS_ARRAY, "Tags");
        }

        fn fire(&mut self, ctx: &mut CommandContext) -> Result<()> {
            self.fired.set(self.fired.get() + 1);
            let line = format!("{} {}", ctx.option_or("greeting", "Hello"), ctx.argument_or("name", ""));
            ctx.output().info(&line);
            Ok(())
        }
    }

    struct BrokenShape;

    impl Command for BrokenShape {
        fn configure(&self, schema: &mut Schema) {
            schema.option(
                "ids",
                "i",
                OptionFlags::REQUIRED | OptionFlags::VALUE_IS_ARRAY,
                "Unsupported",
            );
        }

        fn fire(&mut self, _ctx: &mut CommandContext) -> Result<()> {
            Ok(())
        }
    }

    fn greet() -> (Box<dyn Command>, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        (Box::new(Greet { fired: fired.clone() }), fired)
    }

    fn build(tokens: &[&str], terminal: &TestTerminal) -> Result<CommandInstance> {
        let (command, _) = greet();
        CommandInstance::new("greet", command, parse_args(tokens), terminal)
    }

    #[test]
    fn test_binds_arguments_and_options() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada", "dr", "extra", "--greeting=Hi", "-s"], &terminal).unwrap();
        let ctx = instance.context();

        assert_eq!(ctx.argument("name"), Some("ada"));
        assert_eq!(ctx.argument("title"), Some("dr"));
        assert_eq!(ctx.arguments().len(), 2);
        assert_eq!(ctx.option("greeting"), Some(&OptionValue::from("Hi")));
        assert_eq!(ctx.option("shout"), Some(&OptionValue::Flag));
        assert!(ctx.option("tags").is_none());
        assert!(terminal.output.records().is_empty());
    }

    #[test]
    fn test_optional_argument_may_be_missing() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada"], &terminal).unwrap();
        assert_eq!(instance.context().argument("title"), None);
        assert_eq!(instance.context().argument_or("title", "none"), "none");
    }

    #[test]
    fn test_missing_required_argument_shows_usage() {
        let terminal = TestTerminal::new();
        let fired = Rc::new(Cell::new(0));
        let command = Box::new(Greet { fired: fired.clone() });

        let err = CommandInstance::new("greet", command, parse_args(["--greeting=Hi"]), &terminal)
            .unwrap_err();

        assert!(matches!(err, AppError::Bail { code: 1 }));
        let info = terminal.output.messages(Level::Info);
        assert_eq!(info[0], "Usage: greet name [title]");
        assert!(info[1].contains("--greeting"));
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_help_short_circuits_validation() {
        for flag in ["--help", "-h"] {
            let terminal = TestTerminal::new();
            // No positional arguments and a value on a switch: help still wins.
            let err = build(&[flag, "--shout=loud"], &terminal).unwrap_err();
            assert!(matches!(err, AppError::Bail { code: 1 }));
            assert!(terminal.output.messages(Level::Critical).is_empty());
            assert_eq!(terminal.output.messages(Level::Info).len(), 2);
        }
    }

    #[test]
    fn test_long_name_takes_precedence() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada", "--greeting=Long", "-g=Short"], &terminal).unwrap();
        assert_eq!(instance.context().option_or("greeting", ""), "Long");
    }

    #[test]
    fn test_short_alias_binds_under_long_name() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada", "-g=Yo"], &terminal).unwrap();
        assert_eq!(instance.context().option_or("greeting", ""), "Yo");
        assert!(instance.context().option("g").is_none());
    }

    #[test]
    fn test_required_option_without_value() {
        for token in ["--greeting", "--greeting=", "--greeting=0", "-g=0"] {
            let terminal = TestTerminal::new();
            let err = build(&["ada", token], &terminal).unwrap_err();
            assert_eq!(err.exit_code(), 1);
            assert!(matches!(err, AppError::Fatal { .. }));
            assert_eq!(
                terminal.output.messages(Level::Critical),
                vec!["Value for option \"--greeting (-g)\" is required"]
            );
        }
    }

    #[test]
    fn test_required_option_accepts_non_zero_values() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada", "--greeting=00"], &terminal).unwrap();
        assert_eq!(instance.context().option_or("greeting", ""), "00");
    }

    #[test]
    fn test_double_dash_ignored_without_short_alias() {
        struct NoShort;

        impl Command for NoShort {
            fn configure(&self, schema: &mut Schema) {
                schema.option("nos", "", OptionFlags::REQUIRED, "No short alias");
            }

            fn fire(&mut self, _ctx: &mut CommandContext) -> Result<()> {
                Ok(())
            }
        }

        let terminal = TestTerminal::new();
        let instance =
            CommandInstance::new("nos", Box::new(NoShort), parse_args(["--", "-=x"]), &terminal)
                .unwrap();

        assert!(instance.context().option("nos").is_none());
        assert!(terminal.output.messages(Level::Critical).is_empty());
    }

    #[test]
    fn test_value_on_switch_is_rejected() {
        let terminal = TestTerminal::new();
        let err = build(&["ada", "-s=yes"], &terminal).unwrap_err();
        assert!(matches!(err, AppError::Fatal { code: 1, .. }));
        assert_eq!(
            terminal.output.messages(Level::Critical),
            vec!["Cannot set a value for option \"--shout (-s)\""]
        );
    }

    #[test]
    fn test_empty_value_on_switch_is_allowed() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada", "--shout="], &terminal).unwrap();
        assert!(!instance.context().has_option("shout"));
        assert!(instance.context().option("shout").is_some());
    }

    #[test]
    fn test_required_array_rejected_even_when_absent() {
        let terminal = TestTerminal::new();
        let err = CommandInstance::new("broken", Box::new(BrokenShape), parse_args(["x"]), &terminal)
            .unwrap_err();
        assert!(matches!(err, AppError::Bail { code: 1 }));
        assert_eq!(terminal.output.messages(Level::Info)[0], "Usage: broken");
    }

    #[test]
    fn test_array_option_values() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada", "--tags=a, b,,c", "--greeting=Hi"], &terminal).unwrap();
        assert_eq!(instance.context().option_values("tags"), vec!["a", "b", "c"]);
        assert_eq!(instance.context().option_values("greeting"), vec!["Hi"]);
        assert!(instance.context().option_values("shout").is_empty());
    }

    #[test]
    fn test_verbose_accepts_optional_value() {
        let terminal = TestTerminal::new();
        let instance = build(&["ada", "-v=3"], &terminal).unwrap();
        assert_eq!(instance.context().option_or("verbose", "0"), "3");

        let instance = build(&["ada", "--verbose"], &terminal).unwrap();
        assert_eq!(instance.context().option("verbose"), Some(&OptionValue::Flag));
    }

    #[test]
    fn test_quiet_silences_output() {
        let terminal = TestTerminal::new();
        let (command, fired) = greet();
        let mut instance =
            CommandInstance::new("greet", command, parse_args(["ada", "-q"]), &terminal).unwrap();

        instance.fire().unwrap();
        instance.context().output().critical("still silent");

        assert_eq!(fired.get(), 1);
        assert!(terminal.output.records().is_empty());
    }

    #[test]
    fn test_fire_writes_through_sink() {
        let terminal = TestTerminal::new();
        let (command, fired) = greet();
        let mut instance =
            CommandInstance::new("greet", command, parse_args(["ada", "-g=Hey"]), &terminal).unwrap();

        instance.fire().unwrap();
        assert_eq!(fired.get(), 1);
        assert_eq!(terminal.output.messages(Level::Info), vec!["Hey ada"]);
        assert!(instance.context().application().is_none());
    }
}
