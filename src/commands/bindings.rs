//! `edgeship bindings`

use std::path::{Path, PathBuf};

use anyhow::Result;
use edgeship::application::{list_bindings, prepare_worker, ManifestOptions};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::bindings::{render_bindings_header, render_bindings_table};

pub fn cmd_bindings(
    cwd: &Path,
    config: Option<PathBuf>,
    env: Option<String>,
    ui: &UiContext,
) -> Result<()> {
    let options = ManifestOptions::new(cwd)
        .with_config_path(config)
        .with_env(env);
    let prepared = prepare_worker(&options)?;
    let rows = list_bindings(&prepared.worker.bindings);

    if ui.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "bindings",
            "script": prepared.worker.name,
            "environment": prepared.worker.environment,
            "bindings": rows,
            "warnings": prepared.warnings,
        }))?;
        return Ok(());
    }

    for warning in &prepared.warnings {
        eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), warning);
    }
    print!(
        "{}",
        render_bindings_header(
            &prepared.worker.name,
            prepared.worker.environment.as_deref(),
            ui.color,
            ui.unicode
        )
    );
    print!("{}", render_bindings_table(&rows, ui.color, ui.unicode));
    Ok(())
}
