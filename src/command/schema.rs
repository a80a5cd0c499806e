//! Declared shape of a command: positional arguments and options.

use bitflags::bitflags;
use comfy_table::{presets, Table};

bitflags! {
    /// Shape of an option: whether it is required and what kind of value it takes.
    ///
    /// `REQUIRED | VALUE_IS_ARRAY` is not a supported shape and is rejected when a
    /// command is built.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OptionFlags: u8 {
        /// The value may be omitted.
        const OPTIONAL       = 0b0001;
        /// A non-empty value must be supplied when the option is used.
        const REQUIRED       = 0b0010;
        /// The option is a switch and must not carry a value.
        const VALUE_NONE     = 0b0100;
        /// The value is a comma separated list.
        const VALUE_IS_ARRAY = 0b1000;
    }
}

impl OptionFlags {
    /// Whether the flags describe the unsupported required-array shape.
    pub fn is_required_array(self) -> bool {
        self.contains(OptionFlags::REQUIRED | OptionFlags::VALUE_IS_ARRAY)
    }
}

/// Whether a positional argument must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requiredness {
    Optional,
    Required,
}

/// A positional argument. Its position in [`Schema::arguments`] is its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub name: String,
    pub requiredness: Requiredness,
}

impl ArgumentDescriptor {
    pub fn new(name: impl Into<String>, requiredness: Requiredness) -> Self {
        Self {
            name: name.into(),
            requiredness,
        }
    }

    pub fn is_required(&self) -> bool {
        self.requiredness == Requiredness::Required
    }
}

/// An option with a long name, a short alias, its flags and help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub long: String,
    pub short: String,
    pub flags: OptionFlags,
    pub description: String,
}

impl OptionDescriptor {
    pub fn new(
        long: impl Into<String>,
        short: impl Into<String>,
        flags: OptionFlags,
        description: impl Into<String>,
    ) -> Self {
        Self {
            long: long.into(),
            short: short.into(),
            flags,
            description: description.into(),
        }
    }

    /// `--long (-s)`, as used in diagnostics.
    pub fn display_name(&self) -> String {
        format!("--{} (-{})", self.long, self.short)
    }
}

/// Options every command understands, listed ahead of the declared ones.
pub fn builtin_options() -> Vec<OptionDescriptor> {
    vec![
        OptionDescriptor::new("help", "h", OptionFlags::VALUE_NONE, "Display help"),
        OptionDescriptor::new("quiet", "q", OptionFlags::VALUE_NONE, "Suppress all output"),
        OptionDescriptor::new("verbose", "v", OptionFlags::OPTIONAL, "Set the verbosity level"),
    ]
}

/// Arguments and options declared by a command's `configure` hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    arguments: Vec<ArgumentDescriptor>,
    options: Vec<OptionDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn argument(&mut self, name: impl Into<String>, requiredness: Requiredness) -> &mut Self {
        self.arguments.push(ArgumentDescriptor::new(name, requiredness));
        self
    }

    /// Appends an option.
    pub fn option(
        &mut self,
        long: impl Into<String>,
        short: impl Into<String>,
        flags: OptionFlags,
        description: impl Into<String>,
    ) -> &mut Self {
        self.options
            .push(OptionDescriptor::new(long, short, flags, description));
        self
    }

    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    /// Options declared by the command itself.
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    /// Built-in options followed by the declared ones.
    pub fn merged_options(&self) -> Vec<OptionDescriptor> {
        let mut merged = builtin_options();
        merged.extend(self.options.iter().cloned());
        merged
    }

    /// `Usage: <name> required [optional]`.
    pub fn usage_line(&self, name: &str) -> String {
        let mut line = format!("Usage: {}", name);
        for argument in &self.arguments {
            match argument.requiredness {
                Requiredness::Required => line.push_str(&format!(" {}", argument.name)),
                Requiredness::Optional => line.push_str(&format!(" [{}]", argument.name)),
            }
        }
        line
    }

    /// One row per merged option: long name, short alias with value hint, description.
    pub fn options_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(presets::NOTHING);

        for option in self.merged_options() {
            let hint = if option.flags.contains(OptionFlags::REQUIRED) {
                "=\"\""
            } else if option.flags.contains(OptionFlags::OPTIONAL) {
                "[=\"\"]"
            } else {
                ""
            };
            table.add_row(vec![
                format!("--{}", option.long),
                format!("(-{}{})", option.short, hint),
                option.description.clone(),
            ]);
        }

        table.to_string()
    }
}
