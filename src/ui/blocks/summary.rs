use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    success: bool,
    stats: Vec<(String, usize)>,
    infos: Vec<String>,
    warnings: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    fn new(title: impl Into<String>, success: bool) -> Self {
        Self {
            title: title.into(),
            success,
            stats: Vec::new(),
            infos: Vec::new(),
            warnings: Vec::new(),
            next_step: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, true)
    }

    pub fn partial(title: impl Into<String>) -> Self {
        Self::new(title, false)
    }

    pub fn add_stat(&mut self, label: impl Into<String>, count: usize) {
        self.stats.push((label.into(), count));
    }

    /// Add an informational message (shown with arrow icon)
    pub fn add_info(&mut self, message: impl Into<String>) {
        self.infos.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (icon, title) = if self.success {
            (
                Icon::Success,
                ColoredText::success(self.title.as_str()).bold(),
            )
        } else {
            (
                Icon::Warning,
                ColoredText::warning(self.title.as_str()).bold(),
            )
        };

        let mut out = format!(
            "{} {}\n",
            icon.colored(supports_color, supports_unicode),
            title.render(supports_color)
        );

        if !self.stats.is_empty() {
            let stats: Vec<String> = self
                .stats
                .iter()
                .map(|(label, count)| format!("{} {}", count, label))
                .collect();
            out.push_str(&format!("  {}\n", stats.join(", ")));
        }

        for info in &self.infos {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                info
            ));
        }

        for warning in &self.warnings {
            let mut lines = warning.lines();
            if let Some(first) = lines.next() {
                out.push_str(&format!(
                    "  {} {}\n",
                    Icon::Warning.colored(supports_color, supports_unicode),
                    first
                ));
            }
            for line in lines {
                out.push_str(&format!("    {}\n", line));
            }
        }

        if let Some(next_step) = &self.next_step {
            out.push_str(&format!(
                "  {} {}\n",
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }

        out
    }
}
