//! Human-readable deploy progress

use std::io::Write;

use edgeship::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Event sink printing one line per deploy step
pub struct ConsoleEventSink {
    color: bool,
    unicode: bool,
    verbose: u8,
}

impl ConsoleEventSink {
    pub fn new(ui: &UiContext) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            verbose: ui.verbose,
        }
    }

    /// Line for `event`, or `None` for events printed elsewhere
    pub fn render_event(&self, event: &DeployEvent) -> Option<String> {
        let ok = Icon::Success.colored(self.color, self.unicode);
        match event {
            // header and summary are printed by the command
            DeployEvent::Started { .. } | DeployEvent::Completed { .. } => None,
            DeployEvent::Warning { message } => Some(indent_continuation(&format!(
                "{} {}",
                Icon::Warning.colored(self.color, self.unicode),
                ColoredText::warning(message.as_str()).render(self.color)
            ))),
            DeployEvent::Validated { binding_count } => Some(format!(
                "{} Configuration valid ({} binding{})",
                ok,
                binding_count,
                plural(*binding_count)
            )),
            DeployEvent::Bundled {
                entry,
                module_count,
                total_bytes,
            } => Some(format!(
                "{} Bundled {} ({} module{}, {})",
                ok,
                entry,
                module_count,
                plural(*module_count),
                format_size(*total_bytes)
            )),
            DeployEvent::StepStarted { step } => (self.verbose > 0).then(|| {
                format!(
                    "{} {}...",
                    Icon::Progress.colored(self.color, self.unicode),
                    step
                )
            }),
            DeployEvent::StepCompleted { step, detail } => Some(match detail {
                Some(detail) => format!(
                    "{} {} {}",
                    ok,
                    step,
                    ColoredText::dim(format!("({detail})")).render(self.color)
                ),
                None => format!("{} {}", ok, step),
            }),
            DeployEvent::StepFailed { step, error } => Some(format!(
                "{} {}: {}",
                Icon::Error.colored(self.color, self.unicode),
                step,
                ColoredText::error(error.as_str()).render(self.color)
            )),
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Some(line) = self.render_event(&event) else {
            return;
        };
        if matches!(event, DeployEvent::Warning { .. }) {
            eprintln!("{line}");
        } else {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out, "{line}");
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn indent_continuation(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("\n    ")
}

/// `1536` -> `1.5 KiB`
pub fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KIB {
        format!("{} B", bytes)
    } else if bytes_f < KIB * KIB {
        format!("{:.1} KiB", bytes_f / KIB)
    } else {
        format!("{:.1} MiB", bytes_f / (KIB * KIB))
    }
}
