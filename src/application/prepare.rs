//! Manifest loading shared by every command
//!
//! Find the manifest, parse it, and apply the selected environment.
//! Validation is left to the caller so `bindings` can still list a manifest
//! that would fail `check`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{find_manifest, resolve_environment, validate_worker, Manifest, ResolvedWorker};
use crate::error::{ConfigValidationError, EdgeshipResult};

/// Where to find the manifest and which environment to apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOptions {
    /// Explicit manifest path (`--config`)
    pub config_path: Option<PathBuf>,
    /// Directory to search from when no path is given
    pub cwd: PathBuf,
    /// Environment name (`--env`)
    pub env: Option<String>,
}

impl ManifestOptions {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            config_path: None,
            cwd: cwd.into(),
            env: None,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_env(mut self, env: Option<String>) -> Self {
        self.env = env;
        self
    }
}

/// A manifest with its environment applied
#[derive(Debug, Clone)]
pub struct PreparedWorker {
    pub manifest: Manifest,
    pub worker: ResolvedWorker,
    /// Unknown keys and environment warnings, in that order
    pub warnings: Vec<String>,
}

impl PreparedWorker {
    /// Directory relative manifest paths resolve against
    pub fn project_root(&self) -> PathBuf {
        self.manifest.project_root()
    }

    pub fn file_label(&self) -> String {
        self.manifest.file_label()
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validate_worker(&self.worker, &self.file_label())
    }
}

/// Load the manifest and resolve the environment.
pub fn prepare_worker(options: &ManifestOptions) -> EdgeshipResult<PreparedWorker> {
    let path = match &options.config_path {
        Some(path) => absolutize(&options.cwd, path),
        None => find_manifest(&options.cwd)?,
    };
    let manifest = Manifest::load(&path)?;
    let (worker, env_warnings) = resolve_environment(
        &manifest.config,
        options.env.as_deref(),
        &manifest.file_label(),
    )?;

    let warnings: Vec<String> = manifest
        .warnings
        .iter()
        .map(ToString::to_string)
        .chain(env_warnings)
        .collect();
    debug!(
        manifest = %path.display(),
        script = %worker.name,
        warnings = warnings.len(),
        "worker.prepared"
    );

    Ok(PreparedWorker {
        manifest,
        worker,
        warnings,
    })
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgeshipError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn prepares_from_explicit_relative_path() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("deploy")).unwrap();
        fs::write(
            dir.path().join("deploy/prod.toml"),
            "name = \"api\"\nbogus = 1\n[env.prod]\n",
        )
        .unwrap();

        let prepared = prepare_worker(
            &ManifestOptions::new(dir.path())
                .with_config_path(Some(PathBuf::from("deploy/prod.toml")))
                .with_env(Some("prod".to_string())),
        )
        .unwrap();

        assert_eq!(prepared.worker.name, "api-prod");
        assert_eq!(prepared.file_label(), "prod.toml");
        assert_eq!(prepared.project_root(), dir.path().join("deploy"));
        assert_eq!(prepared.warnings.len(), 1);
        assert!(prepared.warnings[0].contains("'bogus'"));
    }

    #[test]
    fn missing_explicit_manifest_is_io_error() {
        let dir = tempdir().unwrap();
        let err = prepare_worker(
            &ManifestOptions::new(dir.path())
                .with_config_path(Some(PathBuf::from("nope.toml"))),
        )
        .unwrap_err();
        assert!(matches!(err, EdgeshipError::Io(_)));
    }

    #[test]
    fn validate_uses_manifest_label() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("edgeship.toml"),
            "name = \"api\"\n[vars]\nX = \"1\"\n[[kv_namespaces]]\nbinding = \"X\"\nid = \"a\"\n",
        )
        .unwrap();
        let prepared = prepare_worker(&ManifestOptions::new(dir.path())).unwrap();
        let err = prepared.validate().unwrap_err();
        assert_eq!(err.file, "edgeship.toml");
        assert_eq!(
            err.diagnostics[0],
            "X assigned to KV Namespace and Environment Variable bindings."
        );
    }
}
