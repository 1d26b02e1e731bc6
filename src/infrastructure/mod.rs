//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `bundler/` - Passthrough bundler (entry module plus rule-matched modules)
//! - `control_plane/` - Platform REST API client and an in-memory recorder
//! - `events/` - NDJSON deploy event sink
//! - `fs/` - Atomic writes and `--outdir` output

pub mod bundler;
pub mod control_plane;
pub mod events;
pub mod fs;

// Re-export for convenience
pub use bundler::PassthroughBundler;
pub use control_plane::{HttpControlPlane, RecordedCall, RecordingControlPlane};
pub use events::JsonEventSink;
pub use fs::{write_outdir, LocalFs};
