//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::fmt;

/// A control plane step of the deploy sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStep {
    Upload,
    Schedules,
    Subdomain,
    Routes,
    QueueConsumer { queue: String },
}

impl DeployStep {
    /// Stable identifier for machine-readable output
    pub fn id(&self) -> &'static str {
        match self {
            DeployStep::Upload => "upload",
            DeployStep::Schedules => "schedules",
            DeployStep::Subdomain => "subdomain",
            DeployStep::Routes => "routes",
            DeployStep::QueueConsumer { .. } => "queue_consumer",
        }
    }
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStep::Upload => write!(f, "Script upload"),
            DeployStep::Schedules => write!(f, "Cron schedule update"),
            DeployStep::Subdomain => write!(f, "Subdomain update"),
            DeployStep::Routes => write!(f, "Route publishing"),
            DeployStep::QueueConsumer { queue } => write!(f, "Queue consumer for '{}'", queue),
        }
    }
}

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        script_name: String,
        environment: Option<String>,
        dry_run: bool,
    },

    /// Non-fatal configuration warning
    Warning { message: String },

    /// Configuration passed validation
    Validated { binding_count: usize },

    /// Modules collected
    Bundled {
        entry: String,
        module_count: usize,
        total_bytes: usize,
    },

    /// Control plane step started
    StepStarted { step: DeployStep },

    /// Control plane step succeeded
    StepCompleted {
        step: DeployStep,
        detail: Option<String>,
    },

    /// Control plane step failed; no further steps run
    StepFailed { step: DeployStep, error: String },

    /// Deploy completed
    Completed {
        script_name: String,
        dry_run: bool,
        urls: Vec<String>,
    },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `NoopEventSink`: Silent operation
/// - the CLI's console sink: progress lines in the terminal
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
