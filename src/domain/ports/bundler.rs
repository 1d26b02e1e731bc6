//! Bundler port - turns an entry point into uploadable modules
//!
//! Real JavaScript bundling (module resolution, transpiling, minification)
//! is done by an external tool. Implementations of this trait either shell
//! out to one or, like `PassthroughBundler`, upload sources as they are.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::{ModuleRule, WorkerBundle};

/// Everything a bundler needs to know about the Worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    /// Absolute path of the entry module
    pub entry: PathBuf,
    /// Directory module names are made relative to
    pub base_dir: PathBuf,
    /// Upload sources without bundling; enables the default JS rules
    pub no_bundle: bool,
    /// User `[[rules]]`, highest priority first
    pub rules: Vec<ModuleRule>,
}

/// Errors raised while collecting modules
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("entry point not found: {path}")]
    EntryNotFound { path: PathBuf },

    #[error("entry point {entry} is outside base_dir {base_dir}")]
    EntryOutsideBaseDir { entry: PathBuf, base_dir: PathBuf },

    #[error("invalid module rule glob '{glob}': {message}")]
    InvalidGlob { glob: String, message: String },

    #[error("failed to read module {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

/// Produce a [`WorkerBundle`] for a Worker
pub trait Bundler {
    fn bundle(&self, request: &BundleRequest) -> Result<WorkerBundle, BundleError>;
}
