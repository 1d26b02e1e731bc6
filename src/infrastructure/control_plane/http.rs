//! HTTP control plane
//!
//! Talks to the platform REST API with a blocking `reqwest` client. Every
//! response uses the envelope `{ "success", "errors": [{code, message}],
//! "result" }`.

use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::{QueueConsumer, Route};
use crate::domain::entities::UploadPayload;
use crate::domain::ports::{ControlPlane, ControlPlaneError, QueueInfo, ScriptUploaded};

const USER_AGENT: &str = concat!("edgeship/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    code: Option<u64>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadResult {
    id: Option<String>,
    etag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubdomainResult {
    subdomain: String,
}

#[derive(Debug, Deserialize)]
struct QueueResult {
    queue_id: String,
    queue_name: String,
}

/// Control plane backed by the platform REST API
pub struct HttpControlPlane {
    client: Client,
    base_url: String,
    account_id: String,
    api_token: String,
}

impl HttpControlPlane {
    pub fn new(
        base_url: impl Into<String>,
        account_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ControlPlaneError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ControlPlaneError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_id: account_id.into(),
            api_token: api_token.into(),
        })
    }

    fn account_url(&self, path: &str) -> String {
        format!("{}/accounts/{}{}", self.base_url, self.account_id, path)
    }

    fn script_url(&self, script_name: &str, suffix: &str) -> String {
        self.account_url(&format!("/workers/scripts/{script_name}{suffix}"))
    }

    fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, ControlPlaneError> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .map_err(|e| ControlPlaneError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ControlPlaneError::Transport(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "control_plane.response");
        parse_envelope(status, &body)
    }
}

/// Decode an API response, turning error envelopes into `ControlPlaneError::Api`.
fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, ControlPlaneError> {
    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(ControlPlaneError::InvalidResponse(e.to_string()));
        }
        Err(_) => {
            return Err(ControlPlaneError::Api {
                status: status.as_u16(),
                code: None,
                message: truncate(body.trim(), 200),
            });
        }
    };

    if status.is_success() && envelope.success {
        return Ok(envelope.result);
    }
    let message = if envelope.errors.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    };
    Err(ControlPlaneError::Api {
        status: status.as_u16(),
        code: envelope.errors.first().and_then(|e| e.code),
        message,
    })
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn route_body(routes: &[Route]) -> serde_json::Value {
    routes
        .iter()
        .map(|route| match route {
            Route::Pattern(pattern) => json!({ "pattern": pattern }),
            Route::Zoned {
                pattern,
                zone_name,
                zone_id,
            } => json!({ "pattern": pattern, "zone_name": zone_name, "zone_id": zone_id }),
        })
        .collect()
}

fn consumer_body(script_name: &str, consumer: &QueueConsumer) -> serde_json::Value {
    json!({
        "script_name": script_name,
        "dead_letter_queue": consumer.dead_letter_queue,
        "settings": {
            "batch_size": consumer.max_batch_size,
            "max_retries": consumer.max_retries,
            "max_wait_time_ms": consumer.max_batch_timeout.map(|s| u64::from(s) * 1000),
        },
    })
}

impl ControlPlane for HttpControlPlane {
    fn upload_script(
        &self,
        script_name: &str,
        payload: &UploadPayload,
    ) -> Result<ScriptUploaded, ControlPlaneError> {
        let metadata = payload
            .metadata_json()
            .map_err(|e| ControlPlaneError::InvalidResponse(e.to_string()))?;
        let metadata = multipart::Part::text(metadata)
            .mime_str("application/json")
            .map_err(|e| ControlPlaneError::Transport(e.to_string()))?;
        let mut form = multipart::Form::new().part("metadata", metadata);
        for module in &payload.parts {
            let part = multipart::Part::bytes(module.content.clone())
                .file_name(module.name.clone())
                .mime_str(module.kind.content_type())
                .map_err(|e| ControlPlaneError::Transport(e.to_string()))?;
            form = form.part(module.name.clone(), part);
        }

        let request = self
            .client
            .put(self.script_url(script_name, ""))
            .multipart(form);
        let uploaded: Option<UploadResult> = self.send(request)?;
        Ok(uploaded
            .map(|u| ScriptUploaded {
                id: u.id,
                etag: u.etag,
            })
            .unwrap_or_default())
    }

    fn update_schedules(
        &self,
        script_name: &str,
        crons: &[String],
    ) -> Result<(), ControlPlaneError> {
        let body: Vec<serde_json::Value> = crons.iter().map(|c| json!({ "cron": c })).collect();
        let request = self
            .client
            .put(self.script_url(script_name, "/schedules"))
            .json(&body);
        self.send::<serde_json::Value>(request).map(|_| ())
    }

    fn set_subdomain(&self, script_name: &str, enabled: bool) -> Result<(), ControlPlaneError> {
        let request = self
            .client
            .post(self.script_url(script_name, "/subdomain"))
            .json(&json!({ "enabled": enabled }));
        self.send::<serde_json::Value>(request).map(|_| ())
    }

    fn account_subdomain(&self) -> Result<String, ControlPlaneError> {
        let request = self.client.get(self.account_url("/workers/subdomain"));
        self.send::<SubdomainResult>(request)?
            .map(|r| r.subdomain)
            .ok_or_else(|| ControlPlaneError::NotFound {
                what: "account subdomain".to_string(),
            })
    }

    fn publish_routes(&self, script_name: &str, routes: &[Route]) -> Result<(), ControlPlaneError> {
        let request = self
            .client
            .put(self.script_url(script_name, "/routes"))
            .json(&route_body(routes));
        self.send::<serde_json::Value>(request).map(|_| ())
    }

    fn get_queue(&self, queue_name: &str) -> Result<QueueInfo, ControlPlaneError> {
        let request = self
            .client
            .get(self.account_url("/queues"))
            .query(&[("name", queue_name)]);
        let queues: Vec<QueueResult> = self.send(request)?.unwrap_or_default();
        queues
            .into_iter()
            .find(|q| q.queue_name == queue_name)
            .map(|q| QueueInfo {
                id: q.queue_id,
                name: q.queue_name,
            })
            .ok_or_else(|| ControlPlaneError::NotFound {
                what: format!("queue \"{queue_name}\""),
            })
    }

    fn put_queue_consumer(
        &self,
        queue: &QueueInfo,
        script_name: &str,
        consumer: &QueueConsumer,
    ) -> Result<(), ControlPlaneError> {
        let request = self
            .client
            .post(self.account_url(&format!("/queues/{}/consumers", queue.id)))
            .json(&consumer_body(script_name, consumer));
        self.send::<serde_json::Value>(request).map(|_| ())
    }
}
