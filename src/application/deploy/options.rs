//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::PathBuf;

use crate::application::prepare::ManifestOptions;

/// Options for the deploy use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Where to find the manifest and which environment to apply
    pub manifest: ManifestOptions,
    /// Build and validate everything, skip the control plane
    pub dry_run: bool,
    /// Write the upload metadata and modules here
    pub outdir: Option<PathBuf>,
}

impl DeployOptions {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            manifest: ManifestOptions::new(cwd),
            dry_run: false,
            outdir: None,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.manifest.config_path = path;
        self
    }

    pub fn with_env(mut self, env: Option<String>) -> Self {
        self.manifest.env = env;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_outdir(mut self, outdir: Option<PathBuf>) -> Self {
        self.outdir = outdir;
        self
    }
}
