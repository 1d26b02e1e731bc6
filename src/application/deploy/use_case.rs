//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. Load the manifest, apply the environment, validate
//! 2. Bundle and build the upload payload
//! 3. Stop here for a dry run
//! 4. Upload the script
//! 5. Replace cron schedules
//! 6. Enable or disable the preview subdomain
//! 7. Publish routes
//! 8. Attach queue consumers
//!
//! Nothing reaches the control plane unless validation passed. The first
//! failing step ends the deploy.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::payload::build_payload;
use crate::application::prepare::{prepare_worker, PreparedWorker};
use crate::domain::ports::{
    BundleRequest, Bundler, ControlPlane, ControlPlaneError, DeployEvent, DeployEventSink,
    DeployStep, NoopEventSink,
};
use crate::error::{EdgeshipError, EdgeshipResult};
use crate::infrastructure::fs::write_outdir;

use super::options::DeployOptions;
use super::result::DeployResult;

/// Deploy use case - orchestrates the deployment flow
///
/// `control_plane` may be `None` for dry runs; a real deploy without one
/// fails with `MissingCredentials`.
pub struct DeployUseCase<B>
where
    B: Bundler,
{
    bundler: B,
    control_plane: Option<Arc<dyn ControlPlane>>,
}

impl<B> DeployUseCase<B>
where
    B: Bundler,
{
    pub fn new(bundler: B, control_plane: Option<Arc<dyn ControlPlane>>) -> Self {
        Self {
            bundler,
            control_plane,
        }
    }

    /// Execute the deploy use case
    pub fn execute(&self, options: &DeployOptions) -> EdgeshipResult<DeployResult> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        events: Arc<dyn DeployEventSink>,
    ) -> EdgeshipResult<DeployResult> {
        let prepared = prepare_worker(&options.manifest)?;
        self.execute_prepared(prepared, options, events)
    }

    /// Deploy an already loaded manifest
    ///
    /// The CLI loads the manifest first so the control plane can use the
    /// manifest's `account_id`.
    pub fn execute_prepared(
        &self,
        prepared: PreparedWorker,
        options: &DeployOptions,
        events: Arc<dyn DeployEventSink>,
    ) -> EdgeshipResult<DeployResult> {
        let worker = &prepared.worker;
        let file = prepared.file_label();
        let project_root = prepared.project_root();
        let mut warnings = prepared.warnings.clone();

        events.on_event(DeployEvent::Started {
            script_name: worker.name.clone(),
            environment: worker.environment.clone(),
            dry_run: options.dry_run,
        });
        for message in &prepared.warnings {
            events.on_event(DeployEvent::Warning {
                message: message.clone(),
            });
        }

        // Step 1: validate
        prepared.validate()?;
        events.on_event(DeployEvent::Validated {
            binding_count: worker.bindings.len(),
        });

        let main = worker
            .main
            .as_ref()
            .ok_or_else(|| EdgeshipError::MissingEntryPoint { file: file.clone() })?;
        let compatibility_date = match &worker.compatibility_date {
            Some(date) => date.clone(),
            None => {
                let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
                let message = format!(
                    "No compatibility_date was specified. Using today's date: {today}.\n\
                     Add `compatibility_date = \"{today}\"` to {file} to silence this warning."
                );
                warn!("{}", message);
                events.on_event(DeployEvent::Warning {
                    message: message.clone(),
                });
                warnings.push(message);
                today
            }
        };

        // Step 2: bundle + payload
        let entry = project_root.join(main);
        let base_dir = match &worker.base_dir {
            Some(dir) => project_root.join(dir),
            None => entry
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| project_root.clone()),
        };
        let bundle = self.bundler.bundle(&BundleRequest {
            entry,
            base_dir,
            no_bundle: worker.no_bundle,
            rules: worker.rules.clone(),
        })?;
        events.on_event(DeployEvent::Bundled {
            entry: bundle.entry.name.clone(),
            module_count: bundle.modules.len() + 1,
            total_bytes: bundle.total_size(),
        });
        let payload = build_payload(worker, &bundle, &project_root, &compatibility_date)?;

        let outdir_files = match &options.outdir {
            Some(outdir) => write_outdir(outdir, &payload)?,
            None => Vec::new(),
        };

        let mut result = DeployResult {
            script_name: worker.name.clone(),
            environment: worker.environment.clone(),
            dry_run: options.dry_run,
            payload,
            upload: None,
            completed_steps: Vec::new(),
            urls: Vec::new(),
            outdir_files,
            warnings,
        };

        // Step 3: dry run stops before the control plane
        if options.dry_run {
            info!(script = %result.script_name, "dry run: skipping upload");
            events.on_event(DeployEvent::Completed {
                script_name: result.script_name.clone(),
                dry_run: true,
                urls: Vec::new(),
            });
            return Ok(result);
        }

        let control_plane = self
            .control_plane
            .as_deref()
            .ok_or(EdgeshipError::MissingCredentials {
                what: "API token",
                hint: "EDGESHIP_API_TOKEN or api_token in ~/.config/edgeship/config.toml",
            })?;
        let script = result.script_name.clone();

        // Step 4: upload
        let done = &mut result.completed_steps;
        let uploaded = run_step(&events, done, DeployStep::Upload, || {
            let uploaded = control_plane.upload_script(&script, &result.payload)?;
            let detail = uploaded.etag.clone();
            Ok((uploaded, detail))
        })?;
        result.upload = Some(uploaded);

        // Step 5: schedules, always (an empty list clears old triggers)
        let done = &mut result.completed_steps;
        run_step(&events, done, DeployStep::Schedules, || {
            control_plane.update_schedules(&script, &worker.crons)?;
            Ok(((), Some(format!("{} schedule(s)", worker.crons.len()))))
        })?;

        // Step 6: preview subdomain
        let preview_url = run_step(&events, done, DeployStep::Subdomain, || {
            control_plane.set_subdomain(&script, worker.workers_dev)?;
            if !worker.workers_dev {
                return Ok((None, Some("disabled".to_string())));
            }
            let subdomain = control_plane.account_subdomain()?;
            let url = format!("https://{script}.{subdomain}.workers.dev");
            Ok((Some(url.clone()), Some(url)))
        })?;

        // Step 7: routes
        let routes = worker.all_routes();
        if !routes.is_empty() {
            run_step(&events, done, DeployStep::Routes, || {
                control_plane.publish_routes(&script, &routes)?;
                Ok(((), Some(format!("{} route(s)", routes.len()))))
            })?;
        }

        // Step 8: queue consumers
        for consumer in &worker.queue_consumers {
            let step = DeployStep::QueueConsumer {
                queue: consumer.queue.clone(),
            };
            run_step(&events, done, step, || {
                let queue = control_plane.get_queue(&consumer.queue)?;
                control_plane.put_queue_consumer(&queue, &script, consumer)?;
                Ok(((), Some(queue.id)))
            })?;
        }

        result.urls.extend(preview_url);
        result
            .urls
            .extend(routes.iter().map(|r| r.pattern().to_string()));

        info!(
            script = %result.script_name,
            steps = result.completed_steps.len(),
            "deploy complete"
        );
        events.on_event(DeployEvent::Completed {
            script_name: result.script_name.clone(),
            dry_run: false,
            urls: result.urls.clone(),
        });
        Ok(result)
    }
}

/// Run one control plane step, reporting it to `events`.
///
/// Failures are wrapped in `EdgeshipError::DeployStep` naming the step.
fn run_step<T, F>(
    events: &Arc<dyn DeployEventSink>,
    completed: &mut Vec<DeployStep>,
    step: DeployStep,
    call: F,
) -> EdgeshipResult<T>
where
    F: FnOnce() -> Result<(T, Option<String>), ControlPlaneError>,
{
    info!(step = step.id(), "{}", step);
    events.on_event(DeployEvent::StepStarted { step: step.clone() });
    match call() {
        Ok((value, detail)) => {
            events.on_event(DeployEvent::StepCompleted {
                step: step.clone(),
                detail,
            });
            completed.push(step);
            Ok(value)
        }
        Err(source) => {
            warn!(step = step.id(), error = %source, "deploy step failed");
            events.on_event(DeployEvent::StepFailed {
                step: step.clone(),
                error: source.to_string(),
            });
            Err(EdgeshipError::DeployStep {
                step: step.to_string(),
                source,
            })
        }
    }
}
