//! `edgeship check`

use std::path::{Path, PathBuf};

use anyhow::Result;
use edgeship::application::{CheckUseCase, ManifestOptions};

use crate::ui::context::UiContext;
use crate::ui::views::check::{render_check_header, render_check_summary};

pub fn cmd_check(
    cwd: &Path,
    config: Option<PathBuf>,
    env: Option<String>,
    ui: &UiContext,
) -> Result<()> {
    let options = ManifestOptions::new(cwd)
        .with_config_path(config)
        .with_env(env);
    let result = CheckUseCase::new().execute(&options)?;

    if ui.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "check",
            "status": "valid",
            "file": result.file,
            "script": result.script_name,
            "environment": result.environment,
            "bindings": result.binding_count,
            "warnings": result.warnings,
        }))?;
        return Ok(());
    }

    print!(
        "{}",
        render_check_header(
            &result.file,
            result.environment.as_deref(),
            ui.color,
            ui.unicode
        )
    );
    print!("{}", render_check_summary(&result, ui.color, ui.unicode));
    Ok(())
}
