//! `edgeship deploy`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use edgeship::application::{prepare_worker, DeployOptions};
use edgeship::config::UserSettings;
use edgeship::domain::ports::DeployEventSink;
use edgeship::infrastructure::JsonEventSink;
use edgeship::presentation::factory::{create_control_plane, create_deploy_use_case};

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;
use crate::ui::views::deploy::{render_deploy_header, render_deploy_summary};

pub fn cmd_deploy(
    cwd: &Path,
    config: Option<PathBuf>,
    env: Option<String>,
    dry_run: bool,
    outdir: Option<PathBuf>,
    ui: &UiContext,
) -> Result<()> {
    let options = DeployOptions::new(cwd)
        .with_config_path(config)
        .with_env(env)
        .with_dry_run(dry_run)
        .with_outdir(outdir.map(|dir| cwd.join(dir)));

    let prepared = prepare_worker(&options.manifest)?;
    // Configuration problems outrank missing credentials.
    prepared.validate()?;
    if !ui.json {
        print!(
            "{}",
            render_deploy_header(
                &prepared.file_label(),
                prepared.worker.environment.as_deref(),
                dry_run,
                ui.color,
                ui.unicode,
            )
        );
    }

    let control_plane = if dry_run {
        None
    } else {
        let settings = UserSettings::load_or_default();
        create_control_plane(&settings, prepared.worker.account_id.as_deref())?
    };
    let events: Arc<dyn DeployEventSink> = if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::new(ui))
    };

    let result = create_deploy_use_case(control_plane).execute_prepared(prepared, &options, events)?;

    if dry_run {
        if ui.json {
            let metadata = serde_json::to_value(&result.payload)
                .context("failed to serialize upload metadata")?;
            crate::ui::json::emit(serde_json::json!({
                "event": "payload",
                "command": "deploy",
                "metadata": metadata,
            }))?;
        } else {
            println!("\nUpload metadata:");
            println!(
                "{}",
                result
                    .payload
                    .metadata_json()
                    .context("failed to serialize upload metadata")?
            );
            println!();
        }
    }

    if !ui.json {
        print!("{}", render_deploy_summary(&result, ui.color, ui.unicode));
    }
    Ok(())
}
