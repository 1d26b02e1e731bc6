//! Control plane implementations
//!
//! - `HttpControlPlane` - the platform REST API
//! - `RecordingControlPlane` - in-memory, records calls

mod http;
mod recording;

pub use http::HttpControlPlane;
pub use recording::{RecordedCall, RecordingControlPlane};
