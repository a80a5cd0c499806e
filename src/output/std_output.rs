//! Terminal renderer for [`Output`] records.
//!
//! Every record becomes a block of `key : value` lines, indented and padded to a
//! common width, then colored by level. The three most severe levels also get a
//! background color and blank padding rows so they stand out as a solid box.

use super::{Level, LogContext, Output};
use colored::{Color, Colorize};
use serde_json::Value;
use std::cell::RefCell;
use std::io::{self, Write};

const TAB: &str = "    ";
const EXTRA_WIDTH: usize = 5;

/// Foreground and optional background color for a level.
fn colors(level: Level) -> (Color, Option<Color>) {
    match level {
        Level::Debug => (Color::Cyan, None),
        Level::Info => (Color::Green, None),
        Level::Notice => (Color::BrightYellow, None),
        Level::Warning => (Color::Magenta, None),
        Level::Error => (Color::Red, None),
        Level::Critical => (Color::Black, Some(Color::Yellow)),
        Level::Alert => (Color::BrightWhite, Some(Color::Magenta)),
        Level::Emergency => (Color::BrightWhite, Some(Color::Red)),
    }
}

/// Writes colored records to stdout (or any other writer).
pub struct StdOutput {
    writer: RefCell<Box<dyn Write>>,
}

impl StdOutput {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer: RefCell::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }
}

impl Default for StdOutput {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Output for StdOutput {
    fn log(&self, level: Level, message: &str, context: &LogContext) {
        let rendered = render(level, message, context);
        let mut writer = self.writer.borrow_mut();
        // A broken terminal leaves nowhere to report the failure.
        let _ = writeln!(writer, "{}", rendered);
        let _ = writer.flush();
    }
}

/// Builds the uncolored lines of a record.
pub fn record_lines(level: Level, message: &str, context: &LogContext) -> Vec<String> {
    let mut lines = vec![format!("Message : {}", message), format!("Level : {}", level)];

    if let Some(Value::Object(exception)) = context.get("exception") {
        let file = exception.get("file").map(scalar_or_json).unwrap_or_default();
        lines.push(format!("File : {}", file));
        lines.push("Trace : ".to_string());

        if let Some(Value::Array(trace)) = exception.get("trace") {
            for frame in trace {
                lines.push(format!("{}{}", TAB, scalar_or_json(frame)));
            }
        }
    }

    for (key, value) in context {
        if key == "exception" && value.is_object() {
            continue;
        }
        lines.push(format!("{} : {}", key, scalar_or_json(value)));
    }

    lines
}

/// Renders a record as a padded, ANSI colored block.
pub fn render(level: Level, message: &str, context: &LogContext) -> String {
    let lines = record_lines(level, message, context);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + EXTRA_WIDTH;

    let body = lines
        .iter()
        .map(|line| format!("{}{:<width$}", TAB, line, width = width))
        .collect::<Vec<_>>()
        .join("\n");

    match colors(level) {
        (foreground, Some(background)) => {
            let blank_row = format!("{}{}\n", TAB, " ".repeat(width));
            let pad = format!("\n{}", blank_row.repeat(2));
            let framed = format!("{}{}{}", pad, body, pad);
            format!("\n{}\n", framed.color(foreground).on_color(background))
        },
        (foreground, None) => body.color(foreground).to_string(),
    }
}

fn scalar_or_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
