//! Upload payload builder
//!
//! Turns a validated Worker and its bundle into the metadata document and
//! module parts of a script upload. Bindings are emitted in collection
//! priority order; blob bindings are read from disk and attached as parts.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::config::ResolvedWorker;
use crate::domain::entities::{
    Module, ModuleKind, PayloadBinding, ScriptFormat, TypedBinding, UploadPayload, WorkerBundle,
};
use crate::domain::ports::BundleError;
use crate::domain::value_objects::BindingKind;
use crate::error::EdgeshipResult;

/// Build the upload payload.
///
/// `worker` must already have passed validation: required fields that are
/// still missing are sent as empty strings.
pub fn build_payload(
    worker: &ResolvedWorker,
    bundle: &WorkerBundle,
    project_root: &Path,
    compatibility_date: &str,
) -> EdgeshipResult<UploadPayload> {
    let (main_module, body_part) = match bundle.format {
        ScriptFormat::Modules => (Some(bundle.entry.name.clone()), None),
        ScriptFormat::ServiceWorker => (None, Some(bundle.entry.name.clone())),
    };

    let mut parts: Vec<Module> = bundle.all_modules().cloned().collect();
    let mut bindings: Vec<PayloadBinding> = Vec::with_capacity(worker.bindings.len());
    let b = &worker.bindings;

    for kind in BindingKind::PRIORITY {
        match kind {
            BindingKind::DurableObject => {
                bindings.extend(b.durable_objects.iter().map(|d| {
                    TypedBinding::DurableObjectNamespace {
                        name: d.name.clone(),
                        class_name: d.class_name.clone().unwrap_or_default(),
                        script_name: d.script_name.clone(),
                        environment: d.environment.clone(),
                    }
                    .into()
                }))
            }
            BindingKind::KvNamespace => bindings.extend(b.kv_namespaces.iter().map(|kv| {
                TypedBinding::KvNamespace {
                    name: kv.binding.clone(),
                    namespace_id: kv.id.clone().unwrap_or_default(),
                }
                .into()
            })),
            BindingKind::R2Bucket => bindings.extend(b.r2_buckets.iter().map(|r2| {
                TypedBinding::R2Bucket {
                    name: r2.binding.clone(),
                    bucket_name: r2.bucket_name.clone().unwrap_or_default(),
                }
                .into()
            })),
            BindingKind::AnalyticsEngineDataset => {
                bindings.extend(b.analytics_engine_datasets.iter().map(|ae| {
                    TypedBinding::AnalyticsEngine {
                        name: ae.binding.clone(),
                        dataset: ae.dataset.clone(),
                    }
                    .into()
                }))
            }
            BindingKind::TextBlob => {
                for (name, path) in &b.text_blobs {
                    parts.push(read_part(project_root, name, path, ModuleKind::Text)?);
                    bindings.push(
                        TypedBinding::TextBlob {
                            name: name.clone(),
                            part: name.clone(),
                        }
                        .into(),
                    );
                }
            }
            BindingKind::Unsafe => bindings.extend(b.unsafe_bindings.iter().map(|u| {
                let mut raw = serde_json::Map::new();
                raw.insert("name".to_string(), u.name.clone().into());
                raw.insert("type".to_string(), u.kind.clone().into());
                raw.extend(u.extra.clone());
                PayloadBinding::Raw(raw)
            })),
            BindingKind::EnvironmentVariable => bindings.extend(var_bindings(&b.vars)),
            BindingKind::WasmModule => {
                for (name, path) in &b.wasm_modules {
                    parts.push(read_part(project_root, name, path, ModuleKind::CompiledWasm)?);
                    bindings.push(
                        TypedBinding::WasmModule {
                            name: name.clone(),
                            part: name.clone(),
                        }
                        .into(),
                    );
                }
            }
            BindingKind::DataBlob => {
                for (name, path) in &b.data_blobs {
                    parts.push(read_part(project_root, name, path, ModuleKind::Data)?);
                    bindings.push(
                        TypedBinding::DataBlob {
                            name: name.clone(),
                            part: name.clone(),
                        }
                        .into(),
                    );
                }
            }
            BindingKind::Service => bindings.extend(b.services.iter().map(|s| {
                TypedBinding::Service {
                    name: s.binding.clone(),
                    service: s.service.clone().unwrap_or_default(),
                    environment: s.environment.clone(),
                }
                .into()
            })),
            BindingKind::Queue => bindings.extend(b.queue_producers.iter().map(|q| {
                TypedBinding::Queue {
                    name: q.binding.clone(),
                    queue_name: q.queue.clone().unwrap_or_default(),
                }
                .into()
            })),
            BindingKind::Logfwdr => bindings.extend(b.logfwdr.iter().map(|l| {
                TypedBinding::Logfwdr {
                    name: l.name.clone(),
                    destination: l.destination.clone().unwrap_or_default(),
                }
                .into()
            })),
        }
    }

    debug!(
        bindings = bindings.len(),
        parts = parts.len(),
        "payload.built"
    );

    Ok(UploadPayload {
        main_module,
        body_part,
        compatibility_date: compatibility_date.to_string(),
        compatibility_flags: worker.compatibility_flags.clone(),
        bindings,
        parts,
    })
}

/// Strings become plain text; anything else is sent as JSON.
fn var_bindings(
    vars: &IndexMap<String, serde_json::Value>,
) -> impl Iterator<Item = PayloadBinding> + '_ {
    vars.iter().map(|(name, value)| {
        let binding = match value {
            serde_json::Value::String(text) => TypedBinding::PlainText {
                name: name.clone(),
                text: text.clone(),
            },
            other => TypedBinding::Json {
                name: name.clone(),
                json: other.clone(),
            },
        };
        binding.into()
    })
}

fn read_part(root: &Path, name: &str, path: &Path, kind: ModuleKind) -> EdgeshipResult<Module> {
    let full: PathBuf = root.join(path);
    let content = fs::read(&full).map_err(|source| BundleError::Read {
        path: full.clone(),
        source,
    })?;
    Ok(Module::new(name, kind, content))
}
