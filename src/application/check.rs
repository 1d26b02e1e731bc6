//! Check Use Case
//!
//! Validates a manifest without bundling or talking to the control plane.

use crate::error::EdgeshipResult;

use super::prepare::{prepare_worker, ManifestOptions};

/// Result of a successful check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Manifest label (`edgeship.toml`)
    pub file: String,
    pub script_name: String,
    pub environment: Option<String>,
    pub binding_count: usize,
    /// Non-fatal warnings (unknown keys, non-inherited sections)
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// No warnings either
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Check Use Case
///
/// Runs the same load, resolve and validate steps as `deploy`, then stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckUseCase;

impl CheckUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Validation failures come back as `EdgeshipError::ConfigValidation`.
    pub fn execute(&self, options: &ManifestOptions) -> EdgeshipResult<CheckResult> {
        let prepared = prepare_worker(options)?;
        prepared.validate()?;
        Ok(CheckResult {
            file: prepared.file_label(),
            script_name: prepared.worker.name.clone(),
            environment: prepared.worker.environment.clone(),
            binding_count: prepared.worker.bindings.len(),
            warnings: prepared.warnings,
        })
    }
}
