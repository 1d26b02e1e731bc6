//! Configuration module for Edgeship
//!
//! Sources, highest priority first:
//! 1. CLI flags (`--config`, `--env`)
//! 2. Environment variables (`EDGESHIP_*`)
//! 3. Project manifest (`edgeship.toml`, found by walking up from the cwd)
//! 4. User settings (`~/.config/edgeship/config.toml`)
//! 5. Built-in defaults

mod env_validator;
mod environment;
mod loader;
mod types;
mod user_settings;
mod validation;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use environment::resolve_environment;
pub use loader::{
    find_manifest, load_with_warnings, parse_with_warnings, ConfigWarning, Manifest, KNOWN_KEYS,
};
pub use types::{
    AnalyticsEngineDataset, Bindings, DurableObjectBinding, DurableObjectsConfig, KvNamespace,
    LogfwdrBinding, LogfwdrConfig, QueueConsumer, QueueProducer, QueuesConfig, R2Bucket,
    ResolvedWorker, Route, ServiceBinding, TriggersConfig, UnsafeBinding, UnsafeConfig,
    WorkerConfig, MANIFEST_FILE,
};
pub use user_settings::{settings_path, UserSettings, DEFAULT_API_BASE_URL};
pub use validation::{collect_diagnostics, validate_worker};
