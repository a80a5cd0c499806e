//! Test doubles shared by the unit tests.

use crate::error::{AppError, Result};
use crate::output::{Level, LogContext, Output};
use crate::terminal::{Prompter, SignalHook, Terminal, TerminationHandler};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Records every call; clones share the same record list.
#[derive(Clone, Default)]
pub struct RecordingOutput {
    records: Rc<RefCell<Vec<(Level, String)>>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.borrow().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Output for RecordingOutput {
    fn log(&self, level: Level, message: &str, _context: &LogContext) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

/// Answers prompts from a fixed script; an exhausted script aborts.
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    answers: Rc<RefCell<VecDeque<String>>>,
}

impl ScriptedPrompter {
    fn next(&self) -> Result<String> {
        self.answers.borrow_mut().pop_front().ok_or(AppError::Aborted)
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self) -> Result<String> {
        self.next()
    }

    fn read_secret(&self) -> Result<String> {
        self.next()
    }
}

/// Keeps installed handlers so tests can trigger them.
#[derive(Clone, Default)]
pub struct RecordingSignals {
    handlers: Rc<RefCell<Vec<TerminationHandler>>>,
}

impl RecordingSignals {
    pub fn count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn trigger(&self) {
        for handler in self.handlers.borrow().iter() {
            handler();
        }
    }
}

impl SignalHook for RecordingSignals {
    fn on_terminate(&self, handler: TerminationHandler) -> Result<()> {
        self.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

/// A terminal whose collaborators are all observable from the test.
#[derive(Clone, Default)]
pub struct TestTerminal {
    pub output: RecordingOutput,
    pub prompter: ScriptedPrompter,
    pub signals: RecordingSignals,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: &[&str]) -> Self {
        let terminal = Self::default();
        terminal
            .prompter
            .answers
            .borrow_mut()
            .extend(answers.iter().map(|a| a.to_string()));
        terminal
    }
}

impl Terminal for TestTerminal {
    fn output(&self) -> Box<dyn Output> {
        Box::new(self.output.clone())
    }

    fn prompter(&self) -> Box<dyn Prompter> {
        Box::new(self.prompter.clone())
    }

    fn signals(&self) -> Box<dyn SignalHook> {
        Box::new(self.signals.clone())
    }
}
