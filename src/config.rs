//! Environment driven configuration for an [`Application`](crate::Application).
//!
//! Values are read from the process environment after loading an optional `.env`
//! file through `dotenv`, the same way the CLI bootstraps its settings.

use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Default separator between namespace segments of a command name.
pub const DEFAULT_NAMESPACE_SEPARATOR: &str = ":";

const SEPARATOR_VAR: &str = "CMDKIT_NAMESPACE_SEPARATOR";
const AUTO_RESOLVE_VAR: &str = "CMDKIT_AUTO_RESOLVE";
const LOG_FILE_VAR: &str = "CMDKIT_LOG_FILE";

/// Settings controlling command resolution and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Separator between namespace segments, `:` in `user:create`.
    pub namespace_separator: String,
    /// Whether unregistered names are mapped onto type identifiers.
    pub auto_resolve: bool,
    /// Write diagnostics to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace_separator: DEFAULT_NAMESPACE_SEPARATOR.to_string(),
            auto_resolve: false,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and builds the configuration from the environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(separator) = lookup(SEPARATOR_VAR).filter(|s| !s.is_empty()) {
            config.namespace_separator = separator;
        }

        if let Some(flag) = lookup(AUTO_RESOLVE_VAR) {
            config.auto_resolve = parse_bool(&flag);
        }

        config.log_file = lookup(LOG_FILE_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        debug!(?config, "Loaded configuration");
        config
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.namespace_separator = separator;
        }
        self
    }

    pub fn with_auto_resolve(mut self, enabled: bool) -> Self {
        self.auto_resolve = enabled;
        self
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
