use edgeship::{ConfigValidationError, EdgeshipError};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// First `EdgeshipError` in the chain, if any
pub fn find_edgeship_error(err: &anyhow::Error) -> Option<&EdgeshipError> {
    err.chain().find_map(|e| e.downcast_ref::<EdgeshipError>())
}

fn validation_error(err: &anyhow::Error) -> Option<&ConfigValidationError> {
    match find_edgeship_error(err) {
        Some(EdgeshipError::ConfigValidation(validation)) => Some(validation),
        _ => err
            .chain()
            .find_map(|e| e.downcast_ref::<ConfigValidationError>()),
    }
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let icon = Icon::Error.colored(supports_color, supports_unicode);

    if let Some(validation) = validation_error(err) {
        let mut out = format!(
            "{} {}\n",
            icon,
            ColoredText::error(format!("Processing {} configuration:", validation.file))
                .bold()
                .render(supports_color)
        );
        for diagnostic in &validation.diagnostics {
            let mut lines = diagnostic.lines();
            if let Some(first) = lines.next() {
                out.push_str(&format!("  - {}\n", first));
            }
            for line in lines {
                out.push_str(&format!("    {}\n", line));
            }
        }
        return out;
    }

    let mut out = format!(
        "{} {}\n",
        icon,
        ColoredText::error(err.to_string()).render(supports_color)
    );
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        // thiserror messages often embed their source already
        if out.contains(&cause) {
            continue;
        }
        out.push_str(&format!(
            "  {} {}\n",
            ColoredText::dim("caused by:").render(supports_color),
            cause
        ));
    }
    out
}

pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let mut event = serde_json::json!({
        "event": "error",
        "message": err.to_string(),
    });
    if let Some(validation) = validation_error(err) {
        event["file"] = serde_json::json!(validation.file);
        event["diagnostics"] = serde_json::json!(validation.diagnostics);
    }
    event
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = crate::ui::json::emit(error_json(err));
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color && !caps.is_ci, caps.supports_unicode)
    );
}
