//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod binding_collector;
mod binding_conflicts;

pub use binding_collector::{collect_bindings_by_name, BindingsByName};
pub use binding_conflicts::{
    conflict_diagnostics, english_list, find_binding_conflicts, validate_unique_binding_names,
    BindingConflict, UNIQUE_NAMES_RESOLUTION,
};
