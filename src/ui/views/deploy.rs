use edgeship::application::DeployResult;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_deploy_header(
    file: &str,
    env: Option<&str>,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Deploy, "Edgeship Deploy");
    header.add("Config", file);
    if let Some(env) = env {
        header.add("Environment", env);
    }
    if dry_run {
        header.add("Mode", "Dry run");
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_deploy_summary(
    result: &DeployResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if result.dry_run {
        ResultSummary::success(format!("Dry run complete: {}", result.script_name))
    } else {
        ResultSummary::success(format!("Deployed {}", result.script_name))
    };

    summary.add_stat("bindings", result.binding_count());
    summary.add_stat("parts", result.payload.parts.len());
    for url in &result.urls {
        summary.add_info(url.as_str());
    }
    if !result.outdir_files.is_empty() {
        if let Some(dir) = result.outdir_files[0].parent() {
            summary.add_info(format!(
                "Wrote {} files to {}",
                result.outdir_files.len(),
                dir.display()
            ));
        }
    }
    if result.dry_run {
        summary.with_next_step("Run `edgeship deploy` without --dry-run to upload");
    }

    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeship::domain::entities::UploadPayload;

    fn result(dry_run: bool) -> DeployResult {
        DeployResult {
            script_name: "api".to_string(),
            environment: None,
            dry_run,
            payload: UploadPayload {
                main_module: Some("index.js".to_string()),
                body_part: None,
                compatibility_date: "2024-01-01".to_string(),
                compatibility_flags: Vec::new(),
                bindings: Vec::new(),
                parts: Vec::new(),
            },
            upload: None,
            completed_steps: Vec::new(),
            urls: vec!["https://api.acme.workers.dev".to_string()],
            outdir_files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn header_lists_environment_and_mode() {
        let rendered = render_deploy_header("edgeship.toml", Some("staging"), true, false, false);
        assert_eq!(
            rendered,
            "[DEPLOY] Edgeship Deploy\nConfig: edgeship.toml\nEnvironment: staging\nMode: Dry run\n"
        );
    }

    #[test]
    fn summary_lists_urls() {
        let rendered = render_deploy_summary(&result(false), false, false);
        insta::assert_snapshot!(rendered.trim_end(), @r"
        [OK] Deployed api
          0 bindings, 0 parts
          [>] https://api.acme.workers.dev
        ");
    }

    #[test]
    fn dry_run_summary_has_next_step() {
        let rendered = render_deploy_summary(&result(true), false, false);
        assert!(rendered.starts_with("[OK] Dry run complete: api\n"));
        assert!(rendered.contains("Next: Run `edgeship deploy` without --dry-run to upload"));
    }
}
