//! Binding listing
//!
//! A flat, priority-ordered view of every binding a Worker declares, with
//! conflicting names flagged instead of rejected.

use serde::Serialize;

use crate::config::Bindings;
use crate::domain::services::{collect_bindings_by_name, find_binding_conflicts};
use crate::domain::value_objects::BindingKind;

/// One row of `edgeship bindings`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingRow {
    pub name: String,
    pub kind: BindingKind,
    /// Display label of the kind
    pub label: &'static str,
    /// What the binding points at (namespace id, bucket, value, path...)
    pub resource: String,
    /// Name is shared with another binding
    pub conflict: bool,
}

/// List `bindings` in collection priority order.
pub fn list_bindings(bindings: &Bindings) -> Vec<BindingRow> {
    let conflicting: Vec<String> = find_binding_conflicts(&collect_bindings_by_name(
        &bindings.declarations(),
    ))
    .into_iter()
    .map(|c| c.name)
    .collect();

    let mut rows = Vec::with_capacity(bindings.len());
    let mut push = |name: &str, kind: BindingKind, resource: String| {
        rows.push(BindingRow {
            name: name.to_string(),
            kind,
            label: kind.display_name(),
            resource,
            conflict: conflicting.iter().any(|c| c == name),
        });
    };
    let opt = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    for d in &bindings.durable_objects {
        let mut resource = opt(&d.class_name);
        if let Some(script) = &d.script_name {
            resource = format!("{resource} ({script})");
        }
        push(&d.name, BindingKind::DurableObject, resource);
    }
    for kv in &bindings.kv_namespaces {
        push(&kv.binding, BindingKind::KvNamespace, opt(&kv.id));
    }
    for r2 in &bindings.r2_buckets {
        push(&r2.binding, BindingKind::R2Bucket, opt(&r2.bucket_name));
    }
    for ae in &bindings.analytics_engine_datasets {
        push(&ae.binding, BindingKind::AnalyticsEngineDataset, opt(&ae.dataset));
    }
    for (name, path) in &bindings.text_blobs {
        push(name, BindingKind::TextBlob, path.display().to_string());
    }
    for u in &bindings.unsafe_bindings {
        push(&u.name, BindingKind::Unsafe, u.kind.clone());
    }
    for (name, value) in &bindings.vars {
        let resource = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        push(name, BindingKind::EnvironmentVariable, resource);
    }
    for (name, path) in &bindings.wasm_modules {
        push(name, BindingKind::WasmModule, path.display().to_string());
    }
    for (name, path) in &bindings.data_blobs {
        push(name, BindingKind::DataBlob, path.display().to_string());
    }
    for s in &bindings.services {
        let mut resource = opt(&s.service);
        if let Some(env) = &s.environment {
            resource = format!("{resource}@{env}");
        }
        push(&s.binding, BindingKind::Service, resource);
    }
    for q in &bindings.queue_producers {
        push(&q.binding, BindingKind::Queue, opt(&q.queue));
    }
    for l in &bindings.logfwdr {
        push(&l.name, BindingKind::Logfwdr, opt(&l.destination));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KvNamespace, ServiceBinding};
    use serde_json::json;

    #[test]
    fn rows_are_priority_ordered_and_flag_conflicts() {
        let mut bindings = Bindings::default();
        bindings.vars.insert("SHARED".to_string(), json!("v"));
        bindings.vars.insert("DEBUG".to_string(), json!(true));
        bindings.kv_namespaces = vec![KvNamespace {
            binding: "SHARED".to_string(),
            id: Some("ns-1".to_string()),
            preview_id: None,
        }];
        bindings.services = vec![ServiceBinding {
            binding: "AUTH".to_string(),
            service: Some("auth".to_string()),
            environment: Some("prod".to_string()),
        }];

        let rows = list_bindings(&bindings);
        let summary: Vec<(&str, &str, &str, bool)> = rows
            .iter()
            .map(|r| (r.name.as_str(), r.label, r.resource.as_str(), r.conflict))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("SHARED", "KV Namespace", "ns-1", true),
                ("SHARED", "Environment Variable", "v", true),
                ("DEBUG", "Environment Variable", "true", false),
                ("AUTH", "Service", "auth@prod", false),
            ]
        );
    }

    #[test]
    fn empty_bindings_list_nothing() {
        assert!(list_bindings(&Bindings::default()).is_empty());
    }
}
