//! Manifest discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EdgeshipError, EdgeshipResult};

use super::env_validator::levenshtein;
use super::types::{WorkerConfig, MANIFEST_FILE};

/// Keys accepted at the top level of a manifest (and inside `[env.*]`)
pub const KNOWN_KEYS: &[&str] = &[
    "name",
    "account_id",
    "main",
    "base_dir",
    "compatibility_date",
    "compatibility_flags",
    "workers_dev",
    "route",
    "routes",
    "triggers",
    "no_bundle",
    "rules",
    "durable_objects",
    "kv_namespaces",
    "r2_buckets",
    "analytics_engine_datasets",
    "text_blobs",
    "unsafe",
    "vars",
    "wasm_modules",
    "data_blobs",
    "services",
    "queues",
    "logfwdr",
    "env",
];

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, ". Did you mean '{}'?", suggestion)?;
        }
        Ok(())
    }
}

/// A manifest read from disk
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub config: WorkerConfig,
    pub warnings: Vec<ConfigWarning>,
}

impl Manifest {
    /// Load a manifest, collecting unknown keys as warnings
    pub fn load(path: &Path) -> EdgeshipResult<Self> {
        let (config, warnings) = load_with_warnings(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            config,
            warnings,
        })
    }

    /// Directory relative paths in the manifest are resolved against
    pub fn project_root(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Short label used in diagnostics (`edgeship.toml`)
    pub fn file_label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| MANIFEST_FILE.to_string())
    }
}

/// Parse manifest text and collect non-fatal warnings (e.g. unknown keys).
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> EdgeshipResult<(WorkerConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: WorkerConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| EdgeshipError::ConfigParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load manifest from disk and collect non-fatal warnings.
pub fn load_with_warnings(path: &Path) -> EdgeshipResult<(WorkerConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "manifest.read");
    parse_with_warnings(&content, path)
}

/// Walk up from `start` until a directory containing `edgeship.toml` is found.
pub fn find_manifest(start: &Path) -> EdgeshipResult<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(MANIFEST_FILE);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "manifest.found");
            return Ok(candidate);
        }
        dir = current.parent();
    }
    Err(EdgeshipError::ConfigNotFound {
        start: start.to_path_buf(),
    })
}

fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content.lines().enumerate().find_map(|(idx, line)| {
        let trimmed = line.trim_start().trim_start_matches('[');
        let rest = trimmed.strip_prefix(key)?;
        let next = rest.chars().next();
        matches!(next, None | Some(' ') | Some('=') | Some(']') | Some('.')).then_some(idx + 1)
    })
}

fn suggest_key(key: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|known| (*known, levenshtein(key, known)))
        .filter(|(_, dist)| *dist > 0 && *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(known, _)| known.to_string())
}
