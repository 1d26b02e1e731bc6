//! Structural validation of a resolved Worker
//!
//! Every check runs; the problems are returned together as one
//! [`ConfigValidationError`]. Binding-name conflicts are reported last.

use chrono::{NaiveDate, Utc};

use crate::domain::services::{
    collect_bindings_by_name, conflict_diagnostics, find_binding_conflicts,
};
use crate::error::ConfigValidationError;

use super::types::{Bindings, ResolvedWorker};

const MAX_WORKER_NAME_LEN: usize = 63;
const CRON_FIELDS: usize = 5;
const MAX_BATCH_SIZE: std::ops::RangeInclusive<u32> = 1..=100;

/// Validate `worker`, labelling diagnostics with `file`.
pub fn validate_worker(worker: &ResolvedWorker, file: &str) -> Result<(), ConfigValidationError> {
    let diagnostics = collect_diagnostics(worker);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(ConfigValidationError::new(file, diagnostics))
    }
}

/// All diagnostics for `worker`, in report order
pub fn collect_diagnostics(worker: &ResolvedWorker) -> Vec<String> {
    let mut out = Vec::new();

    check_name(&worker.name, &mut out);
    if let Some(date) = &worker.compatibility_date {
        check_compatibility_date(date, &mut out);
    }
    if worker.route.is_some() && !worker.routes.is_empty() {
        out.push(
            "Expected exactly one of \"route\" or \"routes\", but both are set.".to_string(),
        );
    }
    for cron in &worker.crons {
        if cron.split_whitespace().count() != CRON_FIELDS {
            out.push(format!(
                "Invalid cron expression \"{cron}\": expected {CRON_FIELDS} space-separated fields."
            ));
        }
    }
    check_bindings(&worker.bindings, &mut out);
    for (i, consumer) in worker.queue_consumers.iter().enumerate() {
        if consumer.queue.is_empty() {
            out.push(format!(
                "\"queues.consumers[{i}]\" is missing required field \"queue\"."
            ));
        }
        if let Some(size) = consumer.max_batch_size {
            if !MAX_BATCH_SIZE.contains(&size) {
                out.push(format!(
                    "\"queues.consumers[{i}].max_batch_size\" must be between {} and {}, got {size}.",
                    MAX_BATCH_SIZE.start(),
                    MAX_BATCH_SIZE.end()
                ));
            }
        }
    }

    // Unnamed bindings were reported above.
    let named: Vec<_> = worker
        .bindings
        .declarations()
        .into_iter()
        .filter(|d| !d.name.is_empty())
        .collect();
    let conflicts = find_binding_conflicts(&collect_bindings_by_name(&named));
    out.extend(conflict_diagnostics(&conflicts));
    out
}

fn check_name(name: &str, out: &mut Vec<String>) {
    if name.is_empty() {
        out.push("\"name\" is required.".to_string());
        return;
    }
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || name.starts_with('-') || name.ends_with('-') {
        out.push(format!(
            "Invalid worker name \"{name}\": use lowercase letters, digits and dashes, \
             without a leading or trailing dash."
        ));
    }
    if name.len() > MAX_WORKER_NAME_LEN {
        out.push(format!(
            "Worker name \"{name}\" is {} characters long; the limit is {MAX_WORKER_NAME_LEN}.",
            name.len()
        ));
    }
}

fn check_compatibility_date(date: &str, out: &mut Vec<String>) {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) if date.len() == 10 => {
            // One day of slack for clocks ahead of UTC.
            let latest = Utc::now().date_naive().succ_opt().unwrap_or(NaiveDate::MAX);
            if parsed > latest {
                out.push(format!(
                    "\"compatibility_date\" {date} is in the future."
                ));
            }
        }
        _ => out.push(format!(
            "\"compatibility_date\" must be a date in the form YYYY-MM-DD, got \"{date}\"."
        )),
    }
}

fn missing_name(section: &str, index: usize, field: &str) -> String {
    format!("\"{section}[{index}]\" bindings should have a string \"{field}\" field.")
}

fn missing_field(section: &str, name: &str, field: &str) -> String {
    format!("\"{section}\" binding \"{name}\" is missing required field \"{field}\".")
}

fn check_bindings(bindings: &Bindings, out: &mut Vec<String>) {
    for (i, b) in bindings.durable_objects.iter().enumerate() {
        if b.name.is_empty() {
            out.push(missing_name("durable_objects.bindings", i, "name"));
        }
        if b.class_name.as_deref().is_none_or(str::is_empty) {
            out.push(missing_field("durable_objects.bindings", &b.name, "class_name"));
        }
    }
    for (i, b) in bindings.kv_namespaces.iter().enumerate() {
        if b.binding.is_empty() {
            out.push(missing_name("kv_namespaces", i, "binding"));
        }
        if b.id.as_deref().is_none_or(str::is_empty) {
            out.push(missing_field("kv_namespaces", &b.binding, "id"));
        }
    }
    for (i, b) in bindings.r2_buckets.iter().enumerate() {
        if b.binding.is_empty() {
            out.push(missing_name("r2_buckets", i, "binding"));
        }
        if b.bucket_name.as_deref().is_none_or(str::is_empty) {
            out.push(missing_field("r2_buckets", &b.binding, "bucket_name"));
        }
    }
    for (i, b) in bindings.analytics_engine_datasets.iter().enumerate() {
        if b.binding.is_empty() {
            out.push(missing_name("analytics_engine_datasets", i, "binding"));
        }
    }
    for (i, b) in bindings.unsafe_bindings.iter().enumerate() {
        if b.name.is_empty() {
            out.push(missing_name("unsafe.bindings", i, "name"));
        }
        if b.kind.is_empty() {
            out.push(missing_field("unsafe.bindings", &b.name, "type"));
        }
    }
    for (i, b) in bindings.services.iter().enumerate() {
        if b.binding.is_empty() {
            out.push(missing_name("services", i, "binding"));
        }
        if b.service.as_deref().is_none_or(str::is_empty) {
            out.push(missing_field("services", &b.binding, "service"));
        }
    }
    for (i, b) in bindings.queue_producers.iter().enumerate() {
        if b.binding.is_empty() {
            out.push(missing_name("queues.producers", i, "binding"));
        }
        if b.queue.as_deref().is_none_or(str::is_empty) {
            out.push(missing_field("queues.producers", &b.binding, "queue"));
        }
    }
    for (i, b) in bindings.logfwdr.iter().enumerate() {
        if b.name.is_empty() {
            out.push(missing_name("logfwdr.bindings", i, "name"));
        }
        if b.destination.as_deref().is_none_or(str::is_empty) {
            out.push(missing_field("logfwdr.bindings", &b.name, "destination"));
        }
    }
    for (section, table) in [
        ("text_blobs", &bindings.text_blobs),
        ("wasm_modules", &bindings.wasm_modules),
        ("data_blobs", &bindings.data_blobs),
    ] {
        for (name, path) in table {
            if path.as_os_str().is_empty() {
                out.push(format!("\"{section}.{name}\" must be a file path."));
            }
        }
    }
}
