//! Control plane port - the platform API a deploy talks to
//!
//! One method per deploy step. The deploy use case calls them in a fixed
//! order and stops at the first failure.

use thiserror::Error;

use crate::config::{QueueConsumer, Route};
use crate::domain::entities::UploadPayload;

/// Result of a script upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptUploaded {
    pub id: Option<String>,
    pub etag: Option<String>,
}

/// A queue as known to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueInfo {
    pub id: String,
    pub name: String,
}

/// Errors returned by control plane calls
#[derive(Error, Debug)]
pub enum ControlPlaneError {
    /// The API answered with an error envelope or a non-success status
    #[error("API error (status {status}){}: {message}", code_suffix(.code))]
    Api {
        status: u16,
        code: Option<u64>,
        message: String,
    },

    /// A named resource does not exist
    #[error("{what} not found")]
    NotFound { what: String },

    /// The request never got an answer
    #[error("request failed: {0}")]
    Transport(String),

    /// The answer could not be understood
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

fn code_suffix(code: &Option<u64>) -> String {
    code.map(|c| format!(" [code {}]", c)).unwrap_or_default()
}

/// Platform operations used by `deploy`
pub trait ControlPlane {
    /// Upload a new script version with its bindings
    fn upload_script(
        &self,
        script_name: &str,
        payload: &UploadPayload,
    ) -> Result<ScriptUploaded, ControlPlaneError>;

    /// Replace the script's cron schedules (an empty list clears them)
    fn update_schedules(&self, script_name: &str, crons: &[String])
        -> Result<(), ControlPlaneError>;

    /// Enable or disable the preview subdomain for the script
    fn set_subdomain(&self, script_name: &str, enabled: bool) -> Result<(), ControlPlaneError>;

    /// The account's subdomain, used to print the preview URL
    fn account_subdomain(&self) -> Result<String, ControlPlaneError>;

    /// Attach routes to the script
    fn publish_routes(&self, script_name: &str, routes: &[Route])
        -> Result<(), ControlPlaneError>;

    /// Look up a queue by name
    fn get_queue(&self, queue_name: &str) -> Result<QueueInfo, ControlPlaneError>;

    /// Make the script a consumer of the queue
    fn put_queue_consumer(
        &self,
        queue: &QueueInfo,
        script_name: &str,
        consumer: &QueueConsumer,
    ) -> Result<(), ControlPlaneError>;
}
