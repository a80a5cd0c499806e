//! Permissive tokenizer for the part of argv that follows the command name.
//!
//! A token is an option if and only if it starts with `-`. All leading dashes are
//! stripped and the rest is split on the first `=`: the left side is the key and
//! the right side, if any, the value. A key without `=` becomes a bare flag.
//! Nothing is rejected here; `--`, `-=x` or `---name` all produce some key, and
//! schema validation later decides whether the result means anything.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// The value attached to an option key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// The option appeared without `=`, as in `--force`.
    Flag,
    /// The option appeared as `--key=value` (the value may be empty).
    Value(String),
}

impl OptionValue {
    /// Returns the explicit value, if one was given.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Flag => None,
            OptionValue::Value(value) => Some(value),
        }
    }

    /// Flags are truthy; values are truthy unless falsy.
    pub fn is_truthy(&self) -> bool {
        !self.is_falsy()
    }

    /// An explicit value of `""` or `"0"`. A bare flag is never falsy.
    pub fn is_falsy(&self) -> bool {
        matches!(self.as_str(), Some("" | "0"))
    }

    /// Whether an explicit, non-empty value was given.
    pub fn has_value(&self) -> bool {
        self.as_str().is_some_and(|value| !value.is_empty())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag => write!(f, "true"),
            OptionValue::Value(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OptionValue::Flag => serializer.serialize_bool(true),
            OptionValue::Value(value) => serializer.serialize_str(value),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Value(value.to_string())
    }
}

/// Option keys (long or short, dashes stripped) mapped to their values.
pub type OptionMap = HashMap<String, OptionValue>;

/// Result of tokenizing the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedInput {
    /// Non-option tokens, in the order they appeared.
    pub arguments: Vec<String>,
    /// Option tokens; a repeated key keeps its last value.
    pub options: OptionMap,
}

impl ParsedInput {
    pub fn new(arguments: Vec<String>, options: OptionMap) -> Self {
        Self { arguments, options }
    }

    /// Whether `key` appeared in the input, in any form.
    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }
}

/// Tokenizes `tokens` into positional arguments and options.
pub fn parse_args<I, S>(tokens: I) -> ParsedInput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut input = ParsedInput::default();

    for token in tokens {
        let token = token.as_ref();

        if token.starts_with('-') {
            let (key, value) = split_option(token);
            input.options.insert(key, value);
        } else {
            input.arguments.push(token.to_string());
        }
    }

    input
}

fn split_option(token: &str) -> (String, OptionValue) {
    let body = token.trim_start_matches('-');
    match body.split_once('=') {
        Some((key, value)) => (key.to_string(), OptionValue::Value(value.to_string())),
        None => (body.to_string(), OptionValue::Flag),
    }
}
