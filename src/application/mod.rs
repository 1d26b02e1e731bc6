//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Validate, bundle, upload, then configure triggers
//! - `CheckUseCase` - Validate a manifest and stop
//! - `list_bindings` - Priority-ordered binding table
//!
//! ## Services
//!
//! - `prepare_worker` - Locate, load and resolve the manifest
//! - `build_payload` - Turn a resolved Worker and its bundle into an upload payload

pub mod bindings;
pub mod check;
pub mod deploy;
pub mod payload;
pub mod prepare;

pub use bindings::{list_bindings, BindingRow};
pub use check::{CheckResult, CheckUseCase};
pub use deploy::{DeployOptions, DeployResult, DeployUseCase};
pub use payload::build_payload;
pub use prepare::{prepare_worker, ManifestOptions, PreparedWorker};
