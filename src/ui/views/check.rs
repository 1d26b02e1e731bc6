use edgeship::application::CheckResult;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_check_header(
    file: &str,
    env: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "Edgeship Check");
    header.add("Config", file);
    if let Some(env) = env {
        header.add("Environment", env);
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_check_summary(
    result: &CheckResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if result.is_clean() {
        ResultSummary::success(format!("{} is valid", result.script_name))
    } else {
        ResultSummary::partial(format!("{} is valid, with warnings", result.script_name))
    };

    summary.add_stat("bindings", result.binding_count);
    summary.add_stat("warnings", result.warnings.len());
    for warning in &result.warnings {
        summary.add_warning(warning.as_str());
    }
    summary.with_next_step("Run `edgeship deploy --dry-run` to build the upload");

    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_check_summary() {
        let result = CheckResult {
            file: "edgeship.toml".to_string(),
            script_name: "api".to_string(),
            environment: None,
            binding_count: 3,
            warnings: Vec::new(),
        };
        insta::assert_snapshot!(render_check_summary(&result, false, false).trim_end(), @r"
        [OK] api is valid
          3 bindings, 0 warnings
          Next: Run `edgeship deploy --dry-run` to build the upload
        ");
    }

    #[test]
    fn warnings_are_listed() {
        let result = CheckResult {
            file: "edgeship.toml".to_string(),
            script_name: "api-dev".to_string(),
            environment: Some("dev".to_string()),
            binding_count: 0,
            warnings: vec!["\"vars\" exists at the top level, but not on \"env.dev\".".to_string()],
        };
        let rendered = render_check_summary(&result, false, false);
        assert!(rendered.starts_with("[WARN] api-dev is valid, with warnings\n"));
        assert!(rendered.contains("  [WARN] \"vars\" exists at the top level"));
    }
}
