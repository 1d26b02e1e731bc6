//! In-memory control plane
//!
//! Records every call instead of reaching the network. Used by tests and by
//! anything that wants to see what a deploy would send.

use std::sync::Mutex;

use crate::config::{QueueConsumer, Route};
use crate::domain::entities::UploadPayload;
use crate::domain::ports::{ControlPlane, ControlPlaneError, QueueInfo, ScriptUploaded};

/// One recorded control plane call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Upload {
        script_name: String,
        binding_names: Vec<String>,
        part_names: Vec<String>,
    },
    Schedules {
        script_name: String,
        crons: Vec<String>,
    },
    Subdomain {
        script_name: String,
        enabled: bool,
    },
    AccountSubdomain,
    Routes {
        script_name: String,
        patterns: Vec<String>,
    },
    GetQueue {
        name: String,
    },
    QueueConsumer {
        queue_id: String,
        script_name: String,
    },
}

impl RecordedCall {
    /// Short identifier matching the `fail_on` names
    pub fn id(&self) -> &'static str {
        match self {
            RecordedCall::Upload { .. } => "upload",
            RecordedCall::Schedules { .. } => "schedules",
            RecordedCall::Subdomain { .. } => "subdomain",
            RecordedCall::AccountSubdomain => "account_subdomain",
            RecordedCall::Routes { .. } => "routes",
            RecordedCall::GetQueue { .. } => "get_queue",
            RecordedCall::QueueConsumer { .. } => "queue_consumer",
        }
    }
}

/// Control plane that records calls and answers from memory
#[derive(Debug)]
pub struct RecordingControlPlane {
    calls: Mutex<Vec<RecordedCall>>,
    subdomain: String,
    fail_on: Option<&'static str>,
}

impl Default for RecordingControlPlane {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingControlPlane {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            subdomain: "example".to_string(),
            fail_on: None,
        }
    }

    /// Account subdomain returned by `account_subdomain`
    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = subdomain.into();
        self
    }

    /// Make the call with this id fail with a 500 API error (see `RecordedCall::id`)
    pub fn fail_on(mut self, call_id: &'static str) -> Self {
        self.fail_on = Some(call_id);
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Call ids made so far, in order
    pub fn call_ids(&self) -> Vec<&'static str> {
        self.calls().iter().map(RecordedCall::id).collect()
    }

    fn record(&self, call: RecordedCall) -> Result<(), ControlPlaneError> {
        let id = call.id();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.fail_on == Some(id) {
            return Err(ControlPlaneError::Api {
                status: 500,
                code: None,
                message: format!("injected failure on {id}"),
            });
        }
        Ok(())
    }
}

impl ControlPlane for RecordingControlPlane {
    fn upload_script(
        &self,
        script_name: &str,
        payload: &UploadPayload,
    ) -> Result<ScriptUploaded, ControlPlaneError> {
        self.record(RecordedCall::Upload {
            script_name: script_name.to_string(),
            binding_names: payload.bindings.iter().map(|b| b.name().to_string()).collect(),
            part_names: payload.parts.iter().map(|p| p.name.clone()).collect(),
        })?;
        Ok(ScriptUploaded {
            id: Some(script_name.to_string()),
            etag: Some(format!("etag-{script_name}")),
        })
    }

    fn update_schedules(
        &self,
        script_name: &str,
        crons: &[String],
    ) -> Result<(), ControlPlaneError> {
        self.record(RecordedCall::Schedules {
            script_name: script_name.to_string(),
            crons: crons.to_vec(),
        })
    }

    fn set_subdomain(&self, script_name: &str, enabled: bool) -> Result<(), ControlPlaneError> {
        self.record(RecordedCall::Subdomain {
            script_name: script_name.to_string(),
            enabled,
        })
    }

    fn account_subdomain(&self) -> Result<String, ControlPlaneError> {
        self.record(RecordedCall::AccountSubdomain)?;
        Ok(self.subdomain.clone())
    }

    fn publish_routes(&self, script_name: &str, routes: &[Route]) -> Result<(), ControlPlaneError> {
        self.record(RecordedCall::Routes {
            script_name: script_name.to_string(),
            patterns: routes.iter().map(|r| r.pattern().to_string()).collect(),
        })
    }

    fn get_queue(&self, queue_name: &str) -> Result<QueueInfo, ControlPlaneError> {
        self.record(RecordedCall::GetQueue {
            name: queue_name.to_string(),
        })?;
        Ok(QueueInfo {
            id: format!("q-{queue_name}"),
            name: queue_name.to_string(),
        })
    }

    fn put_queue_consumer(
        &self,
        queue: &QueueInfo,
        script_name: &str,
        _consumer: &QueueConsumer,
    ) -> Result<(), ControlPlaneError> {
        self.record(RecordedCall::QueueConsumer {
            queue_id: queue.id.clone(),
            script_name: script_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let cp = RecordingControlPlane::new().with_subdomain("acme");
        cp.set_subdomain("api", true).unwrap();
        assert_eq!(cp.account_subdomain().unwrap(), "acme");
        let queue = cp.get_queue("jobs").unwrap();
        assert_eq!(queue.id, "q-jobs");

        assert_eq!(cp.call_ids(), vec!["subdomain", "account_subdomain", "get_queue"]);
    }

    #[test]
    fn injected_failure_is_still_recorded() {
        let cp = RecordingControlPlane::new().fail_on("schedules");
        let err = cp.update_schedules("api", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (status 500): injected failure on schedules"
        );
        assert_eq!(cp.call_ids(), vec!["schedules"]);
    }
}
