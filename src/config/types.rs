//! Manifest type definitions
//!
//! `WorkerConfig` mirrors `edgeship.toml` one-to-one. Every field is optional
//! so that environment resolution can tell "not declared" from "declared
//! empty"; `ResolvedWorker` is the flattened result a command works with.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{BindingDeclaration, ModuleRule};
use crate::domain::value_objects::BindingKind;

/// Default manifest file name
pub const MANIFEST_FILE: &str = "edgeship.toml";

/// A route, either a bare pattern or a table with a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Route {
    Pattern(String),
    Zoned {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        zone_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        zone_id: Option<String>,
    },
}

impl Route {
    pub fn pattern(&self) -> &str {
        match self {
            Route::Pattern(pattern) | Route::Zoned { pattern, .. } => pattern,
        }
    }

    pub fn zone_name(&self) -> Option<&str> {
        match self {
            Route::Pattern(_) => None,
            Route::Zoned { zone_name, .. } => zone_name.as_deref(),
        }
    }
}

/// `[triggers]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggersConfig {
    #[serde(default)]
    pub crons: Vec<String>,
}

/// `[[kv_namespaces]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvNamespace {
    #[serde(default)]
    pub binding: String,
    pub id: Option<String>,
    pub preview_id: Option<String>,
}

/// `[[r2_buckets]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct R2Bucket {
    #[serde(default)]
    pub binding: String,
    pub bucket_name: Option<String>,
    pub preview_bucket_name: Option<String>,
}

/// `[[durable_objects.bindings]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableObjectBinding {
    #[serde(default)]
    pub name: String,
    pub class_name: Option<String>,
    pub script_name: Option<String>,
    pub environment: Option<String>,
}

/// `[durable_objects]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableObjectsConfig {
    #[serde(default)]
    pub bindings: Vec<DurableObjectBinding>,
}

/// `[[queues.producers]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueProducer {
    #[serde(default)]
    pub binding: String,
    pub queue: Option<String>,
}

/// `[[queues.consumers]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConsumer {
    #[serde(default)]
    pub queue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_batch_size: Option<u32>,
    /// Seconds to wait for a full batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_batch_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_letter_queue: Option<String>,
}

/// `[queues]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuesConfig {
    #[serde(default)]
    pub producers: Vec<QueueProducer>,
    #[serde(default)]
    pub consumers: Vec<QueueConsumer>,
}

/// `[[analytics_engine_datasets]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEngineDataset {
    #[serde(default)]
    pub binding: String,
    pub dataset: Option<String>,
}

/// `[[services]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    #[serde(default)]
    pub binding: String,
    pub service: Option<String>,
    pub environment: Option<String>,
}

/// `[[unsafe.bindings]]` - forwarded to the platform without checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnsafeBinding {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `[unsafe]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnsafeConfig {
    #[serde(default)]
    pub bindings: Vec<UnsafeBinding>,
}

/// `[[logfwdr.bindings]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogfwdrBinding {
    #[serde(default)]
    pub name: String,
    pub destination: Option<String>,
}

/// `[logfwdr]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogfwdrConfig {
    #[serde(default)]
    pub bindings: Vec<LogfwdrBinding>,
}

/// One level of `edgeship.toml` (the top level or an `[env.<name>]` table)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkerConfig {
    pub name: Option<String>,
    pub account_id: Option<String>,
    pub main: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub compatibility_date: Option<String>,
    pub compatibility_flags: Option<Vec<String>>,
    pub workers_dev: Option<bool>,
    pub route: Option<Route>,
    pub routes: Option<Vec<Route>>,
    pub triggers: Option<TriggersConfig>,
    pub no_bundle: Option<bool>,
    pub rules: Option<Vec<ModuleRule>>,

    // Binding sections. Not inherited by environments.
    pub durable_objects: Option<DurableObjectsConfig>,
    pub kv_namespaces: Option<Vec<KvNamespace>>,
    pub r2_buckets: Option<Vec<R2Bucket>>,
    pub analytics_engine_datasets: Option<Vec<AnalyticsEngineDataset>>,
    pub text_blobs: Option<IndexMap<String, PathBuf>>,
    #[serde(rename = "unsafe")]
    pub unsafe_bindings: Option<UnsafeConfig>,
    pub vars: Option<IndexMap<String, serde_json::Value>>,
    pub wasm_modules: Option<IndexMap<String, PathBuf>>,
    pub data_blobs: Option<IndexMap<String, PathBuf>>,
    pub services: Option<Vec<ServiceBinding>>,
    pub queues: Option<QueuesConfig>,
    pub logfwdr: Option<LogfwdrConfig>,

    #[serde(default)]
    pub env: IndexMap<String, WorkerConfig>,
}

impl WorkerConfig {
    /// Binding sections this level declares, by manifest key
    pub fn declared_binding_sections(&self) -> Vec<&'static str> {
        BindingKind::PRIORITY
            .iter()
            .filter(|kind| self.declares(**kind))
            .map(BindingKind::config_section)
            .collect()
    }

    fn declares(&self, kind: BindingKind) -> bool {
        match kind {
            BindingKind::DurableObject => self.durable_objects.is_some(),
            BindingKind::KvNamespace => self.kv_namespaces.is_some(),
            BindingKind::R2Bucket => self.r2_buckets.is_some(),
            BindingKind::AnalyticsEngineDataset => self.analytics_engine_datasets.is_some(),
            BindingKind::TextBlob => self.text_blobs.is_some(),
            BindingKind::Unsafe => self.unsafe_bindings.is_some(),
            BindingKind::EnvironmentVariable => self.vars.is_some(),
            BindingKind::WasmModule => self.wasm_modules.is_some(),
            BindingKind::DataBlob => self.data_blobs.is_some(),
            BindingKind::Service => self.services.is_some(),
            // Producers and consumers share one section
            BindingKind::Queue => self.queues.is_some(),
            BindingKind::Logfwdr => self.logfwdr.is_some(),
        }
    }
}

/// All bindings of one resolved Worker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    pub durable_objects: Vec<DurableObjectBinding>,
    pub kv_namespaces: Vec<KvNamespace>,
    pub r2_buckets: Vec<R2Bucket>,
    pub analytics_engine_datasets: Vec<AnalyticsEngineDataset>,
    pub text_blobs: IndexMap<String, PathBuf>,
    pub unsafe_bindings: Vec<UnsafeBinding>,
    pub vars: IndexMap<String, serde_json::Value>,
    pub wasm_modules: IndexMap<String, PathBuf>,
    pub data_blobs: IndexMap<String, PathBuf>,
    pub services: Vec<ServiceBinding>,
    pub queue_producers: Vec<QueueProducer>,
    pub logfwdr: Vec<LogfwdrBinding>,
}

impl Bindings {
    /// Take the binding sections of one manifest level
    pub fn from_section(section: &WorkerConfig) -> Self {
        Self {
            durable_objects: section
                .durable_objects
                .as_ref()
                .map(|d| d.bindings.clone())
                .unwrap_or_default(),
            kv_namespaces: section.kv_namespaces.clone().unwrap_or_default(),
            r2_buckets: section.r2_buckets.clone().unwrap_or_default(),
            analytics_engine_datasets: section
                .analytics_engine_datasets
                .clone()
                .unwrap_or_default(),
            text_blobs: section.text_blobs.clone().unwrap_or_default(),
            unsafe_bindings: section
                .unsafe_bindings
                .as_ref()
                .map(|u| u.bindings.clone())
                .unwrap_or_default(),
            vars: section.vars.clone().unwrap_or_default(),
            wasm_modules: section.wasm_modules.clone().unwrap_or_default(),
            data_blobs: section.data_blobs.clone().unwrap_or_default(),
            services: section.services.clone().unwrap_or_default(),
            queue_producers: section
                .queues
                .as_ref()
                .map(|q| q.producers.clone())
                .unwrap_or_default(),
            logfwdr: section
                .logfwdr
                .as_ref()
                .map(|l| l.bindings.clone())
                .unwrap_or_default(),
        }
    }

    /// Flatten into one declaration per binding, in collection priority order
    pub fn declarations(&self) -> Vec<BindingDeclaration> {
        let mut out = Vec::with_capacity(self.len());
        for kind in BindingKind::PRIORITY {
            match kind {
                BindingKind::DurableObject => out.extend(
                    self.durable_objects
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.name, kind)),
                ),
                BindingKind::KvNamespace => out.extend(
                    self.kv_namespaces
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.binding, kind)),
                ),
                BindingKind::R2Bucket => out.extend(
                    self.r2_buckets
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.binding, kind)),
                ),
                BindingKind::AnalyticsEngineDataset => out.extend(
                    self.analytics_engine_datasets
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.binding, kind)),
                ),
                BindingKind::TextBlob => out.extend(
                    self.text_blobs
                        .keys()
                        .map(|name| BindingDeclaration::new(name, kind)),
                ),
                BindingKind::Unsafe => out.extend(
                    self.unsafe_bindings
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.name, kind)),
                ),
                BindingKind::EnvironmentVariable => out.extend(
                    self.vars
                        .keys()
                        .map(|name| BindingDeclaration::new(name, kind)),
                ),
                BindingKind::WasmModule => out.extend(
                    self.wasm_modules
                        .keys()
                        .map(|name| BindingDeclaration::new(name, kind)),
                ),
                BindingKind::DataBlob => out.extend(
                    self.data_blobs
                        .keys()
                        .map(|name| BindingDeclaration::new(name, kind)),
                ),
                BindingKind::Service => out.extend(
                    self.services
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.binding, kind)),
                ),
                BindingKind::Queue => out.extend(
                    self.queue_producers
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.binding, kind)),
                ),
                BindingKind::Logfwdr => out.extend(
                    self.logfwdr
                        .iter()
                        .map(|b| BindingDeclaration::new(&b.name, kind)),
                ),
            }
        }
        out
    }

    /// Total number of bindings
    pub fn len(&self) -> usize {
        self.durable_objects.len()
            + self.kv_namespaces.len()
            + self.r2_buckets.len()
            + self.analytics_engine_datasets.len()
            + self.text_blobs.len()
            + self.unsafe_bindings.len()
            + self.vars.len()
            + self.wasm_modules.len()
            + self.data_blobs.len()
            + self.services.len()
            + self.queue_producers.len()
            + self.logfwdr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A Worker with its environment applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedWorker {
    /// Script name (`<name>-<env>` for environments without their own name)
    pub name: String,
    pub environment: Option<String>,
    pub account_id: Option<String>,
    pub main: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub compatibility_date: Option<String>,
    pub compatibility_flags: Vec<String>,
    pub workers_dev: bool,
    pub route: Option<Route>,
    pub routes: Vec<Route>,
    pub crons: Vec<String>,
    pub no_bundle: bool,
    pub rules: Vec<ModuleRule>,
    pub bindings: Bindings,
    pub queue_consumers: Vec<QueueConsumer>,
}

impl ResolvedWorker {
    /// `route` and `routes` merged
    pub fn all_routes(&self) -> Vec<Route> {
        self.route
            .iter()
            .chain(self.routes.iter())
            .cloned()
            .collect()
    }
}
