//! Deploy Result
//!
//! Result types for deploy operations.

use std::path::PathBuf;

use crate::domain::entities::UploadPayload;
use crate::domain::ports::{DeployStep, ScriptUploaded};

/// Result of a deploy operation
#[derive(Debug, Clone)]
pub struct DeployResult {
    pub script_name: String,
    pub environment: Option<String>,
    pub dry_run: bool,
    /// What was (or, in a dry run, would have been) uploaded
    pub payload: UploadPayload,
    /// Control plane answer to the upload
    pub upload: Option<ScriptUploaded>,
    /// Steps that succeeded, in order
    pub completed_steps: Vec<DeployStep>,
    /// Where the Worker is reachable
    pub urls: Vec<String>,
    /// Files written to `--outdir`
    pub outdir_files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl DeployResult {
    pub fn binding_count(&self) -> usize {
        self.payload.bindings.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
