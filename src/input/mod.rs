//! Splits raw command line tokens into positional arguments and options.

mod parser;

pub use parser::*;
