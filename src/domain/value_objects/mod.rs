//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod binding_kind;
mod hash;

pub use binding_kind::BindingKind;
pub use hash::ContentHash;
