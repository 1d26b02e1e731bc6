//! Binding kind value object - the resource category a binding refers to

use serde::{Deserialize, Serialize};

/// Resource category of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// Durable Object namespace
    DurableObject,
    /// Key-value namespace
    KvNamespace,
    /// Object-storage bucket
    R2Bucket,
    /// Analytics Engine dataset
    AnalyticsEngineDataset,
    /// Text blob (service-worker format only)
    TextBlob,
    /// Raw metadata passed through unchecked
    Unsafe,
    /// Plain-text or JSON environment variable
    EnvironmentVariable,
    /// WebAssembly module (service-worker format only)
    WasmModule,
    /// Binary data blob (service-worker format only)
    DataBlob,
    /// Service-to-service binding
    Service,
    /// Queue producer
    Queue,
    /// Log forwarder
    Logfwdr,
}

impl BindingKind {
    /// Collection order. Conflict messages list kinds in the order they are
    /// first met while walking this list.
    pub const PRIORITY: [BindingKind; 12] = [
        BindingKind::DurableObject,
        BindingKind::KvNamespace,
        BindingKind::R2Bucket,
        BindingKind::AnalyticsEngineDataset,
        BindingKind::TextBlob,
        BindingKind::Unsafe,
        BindingKind::EnvironmentVariable,
        BindingKind::WasmModule,
        BindingKind::DataBlob,
        BindingKind::Service,
        BindingKind::Queue,
        BindingKind::Logfwdr,
    ];

    /// Position in [`BindingKind::PRIORITY`]
    pub fn priority(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|kind| kind == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// Human-readable label used in diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            BindingKind::DurableObject => "Durable Object",
            BindingKind::KvNamespace => "KV Namespace",
            BindingKind::R2Bucket => "R2 Bucket",
            BindingKind::AnalyticsEngineDataset => "Analytics Engine Dataset",
            BindingKind::TextBlob => "Text Blob",
            BindingKind::Unsafe => "Unsafe Metadata",
            BindingKind::EnvironmentVariable => "Environment Variable",
            BindingKind::WasmModule => "Wasm Module",
            BindingKind::DataBlob => "Data Blob",
            BindingKind::Service => "Service",
            BindingKind::Queue => "Queue",
            BindingKind::Logfwdr => "logfwdr",
        }
    }

    /// Manifest section that declares bindings of this kind
    pub fn config_section(&self) -> &'static str {
        match self {
            BindingKind::DurableObject => "durable_objects",
            BindingKind::KvNamespace => "kv_namespaces",
            BindingKind::R2Bucket => "r2_buckets",
            BindingKind::AnalyticsEngineDataset => "analytics_engine_datasets",
            BindingKind::TextBlob => "text_blobs",
            BindingKind::Unsafe => "unsafe",
            BindingKind::EnvironmentVariable => "vars",
            BindingKind::WasmModule => "wasm_modules",
            BindingKind::DataBlob => "data_blobs",
            BindingKind::Service => "services",
            BindingKind::Queue => "queues",
            BindingKind::Logfwdr => "logfwdr",
        }
    }
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
