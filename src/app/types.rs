//! Explicit registry of type identifiers.
//!
//! A type identifier such as `User::Create` names a command type that is only
//! constructed when dispatched. Each identifier is registered either with a
//! command factory (it has the command capability) or as a plain type that exists
//! but cannot be run.

use crate::command::Command;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Builds a fresh command for every dispatch.
pub type CommandFactory = Rc<dyn Fn() -> Box<dyn Command>>;

/// What is known about a registered type identifier.
#[derive(Clone)]
pub enum TypeEntry {
    /// A runnable command type.
    Command(CommandFactory),
    /// A known type without the command capability.
    Plain,
}

impl TypeEntry {
    pub fn is_command(&self) -> bool {
        matches!(self, TypeEntry::Command(_))
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeEntry::Command(_) => f.write_str("Command(..)"),
            TypeEntry::Plain => f.write_str("Plain"),
        }
    }
}

/// Type identifiers mapped to their entries.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, TypeEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command type under `type_id`.
    pub fn register_command<F>(&mut self, type_id: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Command> + 'static,
    {
        let type_id = type_id.into();
        debug!(type_id = %type_id, "Registered command type");
        self.entries.insert(type_id, TypeEntry::Command(Rc::new(factory)));
        self
    }

    /// Registers a type that exists but is not a command.
    pub fn register_plain(&mut self, type_id: impl Into<String>) -> &mut Self {
        let type_id = type_id.into();
        debug!(type_id = %type_id, "Registered plain type");
        self.entries.insert(type_id, TypeEntry::Plain);
        self
    }

    pub fn get(&self, type_id: &str) -> Option<&TypeEntry> {
        self.entries.get(type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.entries.contains_key(type_id)
    }
}

/// Maps a namespaced command name onto a type identifier.
///
/// Segments are split on `separator`; inside a segment, words separated by
/// whitespace, `-` or `_` are title-cased and joined; segments are joined with
/// `::`. `user:create` becomes `User::Create` and `db:run-migrations` becomes
/// `Db::RunMigrations`.
pub fn type_id_for(name: &str, separator: &str) -> String {
    name.split(separator)
        .map(title_case_segment)
        .collect::<Vec<_>>()
        .join("::")
}

fn title_case_segment(segment: &str) -> String {
    segment
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandContext;
    use crate::error::Result;
    use rstest::rstest;

    struct Noop;

    impl Command for Noop {
        fn fire(&mut self, _ctx: &mut CommandContext) -> Result<()> {
            Ok(())
        }
    }

    #[rstest]
    #[case("user:create", ":", "User::Create")]
    #[case("user", ":", "User")]
    #[case("db:run-migrations", ":", "Db::RunMigrations")]
    #[case("cache_clear", ":", "CacheClear")]
    #[case("admin.user.delete", ".", "Admin::User::Delete")]
    #[case("user:create", ".", "User:create")]
    #[case("already:Upper", ":", "Already::Upper")]
    fn test_type_id_for(#[case] name: &str, #[case] separator: &str, #[case] expected: &str) {
        assert_eq!(type_id_for(name, separator), expected);
    }

    #[test]
    fn test_registry_entries() {
        let mut types = TypeRegistry::new();
        types
            .register_command("User::Create", || Box::new(Noop))
            .register_plain("User::Record");

        assert!(types.get("User::Create").unwrap().is_command());
        assert!(!types.get("User::Record").unwrap().is_command());
        assert!(types.contains("User::Record"));
        assert!(types.get("User::Delete").is_none());
    }
}
