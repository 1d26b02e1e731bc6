//! Upload payload entity
//!
//! The metadata document and the module parts that make up a script upload.
//! Serializing an `UploadPayload` yields the metadata JSON; the parts travel
//! separately (one multipart part each).

use serde::Serialize;

use crate::domain::value_objects::BindingKind;

use super::bundle::Module;

/// A binding with a known shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedBinding {
    DurableObjectNamespace {
        name: String,
        class_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        script_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        environment: Option<String>,
    },
    KvNamespace {
        name: String,
        namespace_id: String,
    },
    R2Bucket {
        name: String,
        bucket_name: String,
    },
    AnalyticsEngine {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        dataset: Option<String>,
    },
    TextBlob {
        name: String,
        part: String,
    },
    PlainText {
        name: String,
        text: String,
    },
    Json {
        name: String,
        json: serde_json::Value,
    },
    WasmModule {
        name: String,
        part: String,
    },
    DataBlob {
        name: String,
        part: String,
    },
    Service {
        name: String,
        service: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        environment: Option<String>,
    },
    Queue {
        name: String,
        queue_name: String,
    },
    Logfwdr {
        name: String,
        destination: String,
    },
}

impl TypedBinding {
    pub fn name(&self) -> &str {
        match self {
            TypedBinding::DurableObjectNamespace { name, .. }
            | TypedBinding::KvNamespace { name, .. }
            | TypedBinding::R2Bucket { name, .. }
            | TypedBinding::AnalyticsEngine { name, .. }
            | TypedBinding::TextBlob { name, .. }
            | TypedBinding::PlainText { name, .. }
            | TypedBinding::Json { name, .. }
            | TypedBinding::WasmModule { name, .. }
            | TypedBinding::DataBlob { name, .. }
            | TypedBinding::Service { name, .. }
            | TypedBinding::Queue { name, .. }
            | TypedBinding::Logfwdr { name, .. } => name,
        }
    }

    pub fn kind(&self) -> BindingKind {
        match self {
            TypedBinding::DurableObjectNamespace { .. } => BindingKind::DurableObject,
            TypedBinding::KvNamespace { .. } => BindingKind::KvNamespace,
            TypedBinding::R2Bucket { .. } => BindingKind::R2Bucket,
            TypedBinding::AnalyticsEngine { .. } => BindingKind::AnalyticsEngineDataset,
            TypedBinding::TextBlob { .. } => BindingKind::TextBlob,
            TypedBinding::PlainText { .. } | TypedBinding::Json { .. } => {
                BindingKind::EnvironmentVariable
            }
            TypedBinding::WasmModule { .. } => BindingKind::WasmModule,
            TypedBinding::DataBlob { .. } => BindingKind::DataBlob,
            TypedBinding::Service { .. } => BindingKind::Service,
            TypedBinding::Queue { .. } => BindingKind::Queue,
            TypedBinding::Logfwdr { .. } => BindingKind::Logfwdr,
        }
    }
}

/// A binding in the upload metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadBinding {
    Typed(TypedBinding),
    /// `[[unsafe.bindings]]` entries, forwarded verbatim
    Raw(serde_json::Map<String, serde_json::Value>),
}

impl PayloadBinding {
    pub fn name(&self) -> &str {
        match self {
            PayloadBinding::Typed(binding) => binding.name(),
            PayloadBinding::Raw(map) => map.get("name").and_then(|v| v.as_str()).unwrap_or(""),
        }
    }

    pub fn kind(&self) -> BindingKind {
        match self {
            PayloadBinding::Typed(binding) => binding.kind(),
            PayloadBinding::Raw(_) => BindingKind::Unsafe,
        }
    }
}

impl From<TypedBinding> for PayloadBinding {
    fn from(binding: TypedBinding) -> Self {
        PayloadBinding::Typed(binding)
    }
}

/// Everything needed to upload one script version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadPayload {
    /// Entry module name (modules format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_module: Option<String>,
    /// Entry part name (service-worker format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_part: Option<String>,
    pub compatibility_date: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compatibility_flags: Vec<String>,
    pub bindings: Vec<PayloadBinding>,
    /// Module and blob parts, entry first
    #[serde(skip)]
    pub parts: Vec<Module>,
}

impl UploadPayload {
    /// Metadata document as pretty JSON
    pub fn metadata_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Total bytes across all parts
    pub fn total_size(&self) -> usize {
        self.parts.iter().map(Module::size).sum()
    }
}
