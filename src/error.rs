//! Error types for Edgeship
//!
//! Library errors use `thiserror`; the CLI wraps them in `anyhow`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::{BundleError, ControlPlaneError};

/// Result type alias for Edgeship operations
pub type EdgeshipResult<T> = Result<T, EdgeshipError>;

/// Exit code for configuration problems (parse or validation)
pub const EXIT_CONFIG: i32 = 10;
/// Exit code for local I/O failures
pub const EXIT_IO: i32 = 30;
/// Exit code for control plane / network failures
pub const EXIT_NETWORK: i32 = 40;

/// Aggregated configuration diagnostics.
///
/// Every problem found in one validation pass is reported together, so the
/// user can fix the whole manifest in one go.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Label of the file being processed (usually `edgeship.toml`)
    pub file: String,
    /// One entry per bullet; entries may span several lines
    pub diagnostics: Vec<String>,
}

impl ConfigValidationError {
    pub fn new(file: impl Into<String>, diagnostics: Vec<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics,
        }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Processing {} configuration:", self.file)?;
        for diagnostic in &self.diagnostics {
            let mut lines = diagnostic.lines();
            if let Some(first) = lines.next() {
                write!(f, "\n  - {}", first)?;
            }
            for line in lines {
                write!(f, "\n    {}", line)?;
            }
        }
        Ok(())
    }
}

/// Main error type for Edgeship operations
#[derive(Error, Debug)]
pub enum EdgeshipError {
    /// Manifest failed validation
    #[error(transparent)]
    ConfigValidation(#[from] ConfigValidationError),

    /// Manifest could not be parsed as TOML
    #[error("failed to parse {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// No manifest found walking up from the start directory
    #[error("could not find edgeship.toml in {start} or any parent directory")]
    ConfigNotFound { start: PathBuf },

    /// `--env` names an environment the manifest does not declare
    #[error("no environment named \"{name}\" in {file}{}", available_suffix(.available))]
    UnknownEnvironment {
        name: String,
        file: String,
        available: Vec<String>,
    },

    /// Deploy requires an entry point
    #[error("missing entry point: set `main` in {file} to the path of your Worker script")]
    MissingEntryPoint { file: String },

    /// Account id or API token is missing
    #[error("missing {what}: set {hint}")]
    MissingCredentials {
        what: &'static str,
        hint: &'static str,
    },

    /// Entry point or module collection failed
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// A deploy step failed against the control plane
    #[error("{step} failed: {source}")]
    DeployStep {
        step: String,
        #[source]
        source: ControlPlaneError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn available_suffix(available: &[String]) -> String {
    if available.is_empty() {
        " (no [env.*] sections are declared)".to_string()
    } else {
        format!(" (available: {})", available.join(", "))
    }
}

impl EdgeshipError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigValidation(_)
            | Self::ConfigParse { .. }
            | Self::ConfigNotFound { .. }
            | Self::UnknownEnvironment { .. }
            | Self::MissingEntryPoint { .. }
            | Self::MissingCredentials { .. } => EXIT_CONFIG,
            Self::Bundle(_) | Self::Io(_) | Self::Json(_) => EXIT_IO,
            Self::DeployStep { .. } => EXIT_NETWORK,
        }
    }
}
