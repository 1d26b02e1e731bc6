//! Terminal output for the CLI
//!
//! Views render to `String` so they can be tested without a terminal.

pub mod blocks;
pub mod console;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
