//! The application: a registry of named commands, resolution of names (exact or
//! auto-resolved from namespaced names), and dispatch of a single invocation.

mod application;
mod types;


pub use application::*;
pub use types::*;
