//! Edgeship - deploy Workers to edge-compute platforms
//!
//! Edgeship reads a Worker manifest (`edgeship.toml`), checks that every
//! binding name is unique across all binding kinds, builds the upload
//! payload, and drives the platform API through the deploy sequence:
//! upload, schedules, preview subdomain, routes, queue consumers.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{CheckUseCase, DeployOptions, DeployResult, DeployUseCase};
pub use config::{Bindings, ResolvedWorker, WorkerConfig};
pub use domain::services::{
    collect_bindings_by_name, find_binding_conflicts, validate_unique_binding_names,
    BindingConflict, BindingsByName,
};
pub use domain::value_objects::BindingKind;
pub use error::{ConfigValidationError, EdgeshipError, EdgeshipResult};
