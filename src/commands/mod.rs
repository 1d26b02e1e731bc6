//! Command handlers
//!
//! Each handler builds options from CLI arguments, runs the matching use
//! case, and renders the result as text or NDJSON.

pub mod bindings;
pub mod check;
pub mod deploy;

pub use bindings::cmd_bindings;
pub use check::cmd_check;
pub use deploy::cmd_deploy;
