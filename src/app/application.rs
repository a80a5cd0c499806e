//! Command registry, name resolution and dispatch.

use super::types::{type_id_for, TypeEntry, TypeRegistry};
use crate::command::{Command, CommandInstance};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::input::{parse_args, ParsedInput};
use crate::terminal::{StdTerminal, Terminal};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// What a caller hands to [`Application::register`].
pub enum CommandSource {
    /// A type identifier, instantiated on every dispatch.
    Type(String),
    /// A ready-built instance, shared by every dispatch.
    Instance(CommandInstance),
}

impl From<&str> for CommandSource {
    fn from(type_id: &str) -> Self {
        CommandSource::Type(type_id.to_string())
    }
}

impl From<String> for CommandSource {
    fn from(type_id: String) -> Self {
        CommandSource::Type(type_id)
    }
}

impl From<CommandInstance> for CommandSource {
    fn from(instance: CommandInstance) -> Self {
        CommandSource::Instance(instance)
    }
}

/// How a registered name is turned into something runnable.
#[derive(Clone)]
pub enum Registration {
    /// One instance owned by the registry and reused on every resolution.
    Shared(Rc<RefCell<CommandInstance>>),
    /// A type identifier built anew for each dispatch.
    Deferred(String),
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registration::Shared(instance) => match instance.try_borrow() {
                Ok(instance) => write!(f, "Shared({})", instance.name()),
                Err(_) => f.write_str("Shared(<running>)"),
            },
            Registration::Deferred(type_id) => write!(f, "Deferred({})", type_id),
        }
    }
}

impl From<CommandSource> for Registration {
    fn from(source: CommandSource) -> Self {
        match source {
            CommandSource::Type(type_id) => Registration::Deferred(type_id),
            CommandSource::Instance(instance) => {
                Registration::Shared(Rc::new(RefCell::new(instance)))
            },
        }
    }
}

/// One value of a bulk registration.
pub enum BulkEntry {
    /// A command without a description.
    Bare(CommandSource),
    /// A `(command, description)` pair. A missing command is a configuration error.
    Described(Option<CommandSource>, String),
}

impl BulkEntry {
    pub fn bare(command: impl Into<CommandSource>) -> Self {
        BulkEntry::Bare(command.into())
    }

    pub fn described(command: impl Into<CommandSource>, description: impl Into<String>) -> Self {
        BulkEntry::Described(Some(command.into()), description.into())
    }
}

struct Registered {
    registration: Registration,
    description: String,
}

/// Owns the registered commands and dispatches invocations to them.
pub struct Application {
    config: AppConfig,
    commands: HashMap<String, Registered>,
    types: TypeRegistry,
    terminal: Box<dyn Terminal>,
}

impl Application {
    /// An empty application writing to the real terminal.
    pub fn new(config: AppConfig) -> Self {
        Self::with_terminal(config, StdTerminal)
    }

    /// An empty application whose commands get their collaborators from `terminal`.
    pub fn with_terminal(config: AppConfig, terminal: impl Terminal + 'static) -> Self {
        Self {
            config,
            commands: HashMap::new(),
            types: TypeRegistry::new(),
            terminal: Box::new(terminal),
        }
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    /// Builds an instance wired to this application's terminal, ready to be
    /// registered as a shared command.
    pub fn instance(
        &self,
        name: impl Into<String>,
        command: Box<dyn Command>,
        input: ParsedInput,
    ) -> Result<CommandInstance> {
        CommandInstance::new(name, command, input, self.terminal.as_ref())
    }

    /// Registers `command` under `name` with an empty description.
    pub fn register(&mut self, name: impl Into<String>, command: impl Into<CommandSource>) -> &mut Self {
        self.register_described(name, command, "")
    }

    /// Registers `command` under `name`. A later registration of the same name wins.
    pub fn register_described(
        &mut self,
        name: impl Into<String>,
        command: impl Into<CommandSource>,
        description: impl Into<String>,
    ) -> &mut Self {
        let name = name.into();
        let registration = Registration::from(command.into());
        debug!(command = %name, ?registration, "Registering command");

        let previous = self.commands.insert(
            name.clone(),
            Registered {
                registration,
                description: description.into(),
            },
        );
        if previous.is_some() {
            warn!(command = %name, "Command registration overwritten");
        }

        self
    }

    /// Registers several commands at once.
    ///
    /// Every entry is checked before anything is registered, so a malformed entry
    /// leaves the registry untouched.
    pub fn register_many<I, K>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, BulkEntry)>,
        K: Into<String>,
    {
        let mut ready = Vec::new();

        for (name, entry) in entries {
            let name = name.into();
            match entry {
                BulkEntry::Bare(command) => ready.push((name, command, String::new())),
                BulkEntry::Described(Some(command), description) => {
                    ready.push((name, command, description))
                },
                BulkEntry::Described(None, _) => {
                    return Err(AppError::Configuration(format!(
                        "A described command must be given as (command, description) for command: [{}]",
                        name
                    )));
                },
            }
        }

        for (name, command, description) in ready {
            self.register_described(name, command, description);
        }

        Ok(self)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(|r| r.description.as_str())
    }

    /// Registered `(name, description)` pairs, sorted by name.
    pub fn commands(&self) -> Vec<(&str, &str)> {
        let mut commands: Vec<(&str, &str)> = self
            .commands
            .iter()
            .map(|(name, r)| (name.as_str(), r.description.as_str()))
            .collect();
        commands.sort_unstable();
        commands
    }

    /// Resolves `name` to a registration.
    ///
    /// An exact registration always wins. Otherwise, with auto-resolution on, the
    /// name is mapped to a type identifier (see [`type_id_for`]): a command type
    /// resolves as [`Registration::Deferred`], a plain type fails with
    /// [`AppError::InvalidCommandType`], and anything else with
    /// [`AppError::CommandNotFound`].
    pub fn resolve(&self, name: &str) -> Result<Registration> {
        if let Some(registered) = self.commands.get(name) {
            return Ok(registered.registration.clone());
        }

        if !self.config.auto_resolve {
            return Err(AppError::CommandNotFound(name.to_string()));
        }

        let type_id = type_id_for(name, &self.config.namespace_separator);
        debug!(command = %name, type_id = %type_id, "Auto-resolving command");

        match self.types.get(&type_id) {
            None => Err(AppError::CommandNotFound(name.to_string())),
            Some(TypeEntry::Plain) => Err(AppError::InvalidCommandType {
                name: name.to_string(),
                type_id,
            }),
            Some(TypeEntry::Command(_)) => Ok(Registration::Deferred(type_id)),
        }
    }

    /// Resolves `name`, builds the command if needed, and fires it once.
    ///
    /// Resolution errors are returned unchanged. Validation errors come back after
    /// the user has been shown usage or a critical message.
    pub fn run(self: &Rc<Self>, name: &str, input: ParsedInput) -> Result<()> {
        match self.resolve(name)? {
            Registration::Deferred(type_id) => {
                let mut instance = self.instantiate(name, &type_id, input)?;
                instance.set_application(Rc::downgrade(self));
                debug!(command = %name, type_id = %type_id, "Dispatching command");
                instance.fire()
            },
            Registration::Shared(shared) => {
                let mut instance = shared
                    .try_borrow_mut()
                    .map_err(|_| AppError::AlreadyRunning(name.to_string()))?;
                instance.set_application(Rc::downgrade(self));
                debug!(command = %name, "Dispatching shared command");
                instance.fire()
            },
        }
    }

    /// Runs the command named by `argv[1]` with the remaining tokens as input.
    /// `argv[0]` is the program name.
    pub fn run_from_argv<I, S>(self: &Rc<Self>, argv: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut argv = argv.into_iter();
        let _program = argv.next();
        let Some(name) = argv.next() else {
            return Err(AppError::CommandNotSpecified);
        };
        let name = name.as_ref().to_string();

        self.run(&name, parse_args(argv))
    }

    fn instantiate(&self, name: &str, type_id: &str, input: ParsedInput) -> Result<CommandInstance> {
        match self.types.get(type_id) {
            Some(TypeEntry::Command(factory)) => {
                CommandInstance::new(name, factory(), input, self.terminal.as_ref())
            },
            Some(TypeEntry::Plain) => Err(AppError::InvalidCommandType {
                name: name.to_string(),
                type_id: type_id.to_string(),
            }),
            None => Err(AppError::CommandNotFound(name.to_string())),
        }
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("config", &self.config)
            .field("commands", &self.commands().len())
            .field("types", &self.types)
            .finish()
    }
}
