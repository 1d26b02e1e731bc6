//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod bundler;
pub mod control_plane;
pub mod deploy_events;

pub use bundler::{BundleError, BundleRequest, Bundler};
pub use control_plane::{ControlPlane, ControlPlaneError, QueueInfo, ScriptUploaded};
pub use deploy_events::{DeployEvent, DeployEventSink, DeployStep, NoopEventSink};
