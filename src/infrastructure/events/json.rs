//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// NDJSON line for `event`
pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            script_name,
            environment,
            dry_run,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "script": script_name,
            "environment": environment,
            "dry_run": dry_run,
        }),

        DeployEvent::Warning { message } => serde_json::json!({
            "event": "warning",
            "command": "deploy",
            "message": message,
        }),

        DeployEvent::Validated { binding_count } => serde_json::json!({
            "event": "validated",
            "command": "deploy",
            "bindings": binding_count,
        }),

        DeployEvent::Bundled {
            entry,
            module_count,
            total_bytes,
        } => serde_json::json!({
            "event": "bundled",
            "command": "deploy",
            "entry": entry,
            "modules": module_count,
            "bytes": total_bytes,
        }),

        DeployEvent::StepStarted { step } => serde_json::json!({
            "event": "step_start",
            "command": "deploy",
            "step": step.id(),
            "description": step.to_string(),
        }),

        DeployEvent::StepCompleted { step, detail } => serde_json::json!({
            "event": "step_complete",
            "command": "deploy",
            "step": step.id(),
            "detail": detail,
        }),

        DeployEvent::StepFailed { step, error } => serde_json::json!({
            "event": "step_failed",
            "command": "deploy",
            "step": step.id(),
            "error": error,
        }),

        DeployEvent::Completed {
            script_name,
            dry_run,
            urls,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "script": script_name,
            "dry_run": dry_run,
            "urls": urls,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }
}
