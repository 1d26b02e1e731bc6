//! Per-user settings (`~/.config/edgeship/config.toml`)
//!
//! Holds control plane credentials that do not belong in a checked-in
//! manifest. Environment variables override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{EdgeshipError, EdgeshipResult};

/// Default control plane API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.edgeship.dev/client/v4";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub account_id: Option<String>,
    pub api_token: Option<String>,
    pub api_base_url: Option<String>,
    /// `EDGESHIP_ACCOUNT_ID`, which outranks the manifest
    #[serde(skip)]
    pub account_id_override: Option<String>,
}

impl UserSettings {
    /// Load from an explicit path
    pub fn load(path: &Path) -> EdgeshipResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| EdgeshipError::ConfigParse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the user settings file if present, then apply `EDGESHIP_*` overrides.
    ///
    /// A broken settings file is reported and skipped.
    pub fn load_or_default() -> Self {
        let from_file = settings_path()
            .filter(|path| path.is_file())
            .and_then(|path| match Self::load(&path) {
                Ok(settings) => {
                    debug!(path = %path.display(), "user_settings.loaded");
                    Some(settings)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable user settings");
                    None
                }
            })
            .unwrap_or_default();
        from_file.with_env_overrides()
    }

    /// Apply `EDGESHIP_ACCOUNT_ID`, `EDGESHIP_API_TOKEN`, `EDGESHIP_API_BASE_URL`
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(account_id) = non_empty("EDGESHIP_ACCOUNT_ID") {
            self.account_id_override = Some(account_id);
        }
        if let Some(token) = non_empty("EDGESHIP_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(base_url) = non_empty("EDGESHIP_API_BASE_URL") {
            self.api_base_url = Some(base_url);
        }
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Account to deploy into.
    ///
    /// `EDGESHIP_ACCOUNT_ID` wins over the manifest, which wins over the
    /// settings file.
    pub fn resolve_account_id(&self, manifest_account: Option<&str>) -> Option<String> {
        self.account_id_override
            .clone()
            .or_else(|| manifest_account.map(str::to_string))
            .or_else(|| self.account_id.clone())
    }
}

/// `$XDG_CONFIG_HOME/edgeship/config.toml`, falling back to the platform config dir
pub fn settings_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("edgeship").join("config.toml"))
}
