//! Commands: their declared schema, the validated instance built from parsed
//! input, and the context handed to `fire`.

mod context;
mod instance;
mod schema;

pub use context::*;
pub use instance::*;
pub use schema::*;
