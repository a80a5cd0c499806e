//! Sample commands wired into the `cmdkit` binary.

use cmdkit::command::{Command, CommandContext, OptionFlags, Requiredness, Schema};
use cmdkit::{AppConfig, Application, BulkEntry, ParsedInput, Result};
use tracing::info;

/// `greet <name> [title] [--greeting=..] [--shout]`
struct Greet;

impl Command for Greet {
    fn configure(&self, schema: &mut Schema) {
        schema
            .argument("name", Requiredness::Required)
            .argument("title", Requiredness::Optional)
            .option("greeting", "g", OptionFlags::REQUIRED, "Greeting to use (default: Hello)")
            .option("shout", "s", OptionFlags::VALUE_NONE, "Print the greeting in upper case");
    }

    fn fire(&mut self, ctx: &mut CommandContext) -> Result<()> {
        let name = match ctx.argument("title") {
            Some(title) => format!("{} {}", title, ctx.argument_or("name", "")),
            None => ctx.argument_or("name", "").to_string(),
        };

        let mut line = format!("{}, {}!", ctx.option_or("greeting", "Hello"), name);
        if ctx.has_option("shout") {
            line = line.to_uppercase();
        }

        ctx.output().info(&line);
        Ok(())
    }
}

/// Prints every registered command with its description.
struct List;

impl Command for List {
    fn fire(&mut self, ctx: &mut CommandContext) -> Result<()> {
        let Some(app) = ctx.application() else {
            return Err(ctx.fatal_default("No application to list commands from"));
        };

        for (name, description) in app.commands() {
            ctx.output().info(&format!("{:<16}{}", name, description));
        }
        Ok(())
    }
}

/// `user:create <username> [--roles=a,b] [--admin] [--interactive]`
struct CreateUser;

impl Command for CreateUser {
    fn configure(&self, schema: &mut Schema) {
        schema
            .argument("username", Requiredness::Required)
            .option("roles", "r", OptionFlags::VALUE_IS_ARRAY, "Comma separated roles")
            .option("admin", "a", OptionFlags::VALUE_NONE, "Grant administrator rights")
            .option("interactive", "i", OptionFlags::VALUE_NONE, "Prompt for a password");
    }

    fn fire(&mut self, ctx: &mut CommandContext) -> Result<()> {
        ctx.on_terminate(|| {
            eprintln!("\nUser creation interrupted");
            std::process::exit(130);
        })?;

        let username = ctx.argument_or("username", "").to_string();

        if ctx.has_option("interactive") {
            let password = ctx.secret("Password:")?;
            if password.is_empty() {
                return Err(ctx.fatal("Password must not be empty", 2));
            }
            if !ctx.confirm(&format!("Create user {}?", username))? {
                ctx.output().warning("Cancelled");
                return Ok(());
            }
        }

        let mut roles: Vec<&str> = ctx.option_values("roles");
        if ctx.has_option("admin") {
            roles.push("admin");
        }

        info!(user = %username, ?roles, "Creating user");
        ctx.output().notice(&format!(
            "Created user {} with roles [{}]",
            username,
            roles.join(", ")
        ));
        Ok(())
    }
}

/// Builds the demo application: `greet`, a shared `list`, and auto-resolved
/// `user:*` commands.
pub fn application(config: AppConfig) -> Result<Application> {
    let mut app = Application::new(config.with_auto_resolve(true));

    app.types_mut()
        .register_command("Greet", || Box::new(Greet))
        .register_command("User::Create", || Box::new(CreateUser))
        .register_plain("User::Record");

    let list = app.instance("list", Box::new(List), ParsedInput::default())?;

    app.register_many(vec![
        ("greet", BulkEntry::described("Greet", "Greet someone")),
        ("list", BulkEntry::described(list, "List registered commands")),
    ])?;

    Ok(app)
}
