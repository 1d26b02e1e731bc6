//! Domain Layer
//!
//! Pure deploy logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Binding declarations, Worker bundles, upload payloads
//! - `value_objects/` - Immutable value types (BindingKind, ContentHash)
//! - `services/` - Binding collection and conflict reporting
//! - `ports/` - Interface definitions for infrastructure (Bundler, ControlPlane, events)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
