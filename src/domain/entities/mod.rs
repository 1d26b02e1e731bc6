//! Domain Entities
//!
//! - `BindingDeclaration` - One named binding flattened out of the manifest
//! - `WorkerBundle` - Entry module plus any additional modules to upload
//! - `UploadPayload` - Script metadata and bindings sent to the control plane

mod binding;
mod bundle;
mod payload;

pub use binding::BindingDeclaration;
pub use bundle::{Module, ModuleKind, ModuleRule, ScriptFormat, WorkerBundle};
pub use payload::{PayloadBinding, TypedBinding, UploadPayload};
