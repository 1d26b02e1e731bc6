use edgeship::application::BindingRow;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{pad_to_width, ColoredText};
use unicode_width::UnicodeWidthStr;

pub fn render_bindings_header(
    script_name: &str,
    env: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Bindings, "Edgeship Bindings");
    header.add("Worker", script_name);
    if let Some(env) = env {
        header.add("Environment", env);
    }
    header.render(supports_color, supports_unicode)
}

/// Three aligned columns; conflicting names get a warning icon
pub fn render_bindings_table(
    rows: &[BindingRow],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if rows.is_empty() {
        return format!(
            "{}\n",
            ColoredText::dim("No bindings declared.").render(supports_color)
        );
    }

    let name_width = column_width("NAME", rows.iter().map(|r| r.name.as_str()));
    let kind_width = column_width("TYPE", rows.iter().map(|r| r.label));

    let mut out = String::new();
    out.push_str(
        &ColoredText::plain(format!(
            "{} {} RESOURCE",
            pad_to_width("NAME", name_width),
            pad_to_width("TYPE", kind_width)
        ))
        .bold()
        .render(supports_color),
    );
    out.push('\n');

    for row in rows {
        let name = pad_to_width(&row.name, name_width);
        let name = if row.conflict {
            ColoredText::warning(name).render(supports_color)
        } else {
            name
        };
        let mut line = format!(
            "{} {} {}",
            name,
            pad_to_width(row.label, kind_width),
            row.resource
        );
        if row.conflict {
            line.push(' ');
            line.push_str(&Icon::Warning.colored(supports_color, supports_unicode));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if rows.iter().any(|r| r.conflict) {
        out.push('\n');
        out.push_str(&format!(
            "{} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning("Some binding names are shared; `edgeship check` will fail.")
                .render(supports_color)
        ));
    }
    out
}

fn column_width<'a>(title: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(UnicodeWidthStr::width)
        .chain(std::iter::once(title.width()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeship::domain::value_objects::BindingKind;

    fn row(name: &str, kind: BindingKind, resource: &str, conflict: bool) -> BindingRow {
        BindingRow {
            name: name.to_string(),
            kind,
            label: kind.display_name(),
            resource: resource.to_string(),
            conflict,
        }
    }

    #[test]
    fn table_aligns_columns() {
        let rows = vec![
            row("CACHE", BindingKind::KvNamespace, "ns-1", true),
            row("CACHE", BindingKind::R2Bucket, "assets", true),
            row("API_URL", BindingKind::EnvironmentVariable, "https://example.com", false),
        ];
        insta::assert_snapshot!(render_bindings_table(&rows, false, false).trim_end(), @r"
        NAME    TYPE                 RESOURCE
        CACHE   KV Namespace         ns-1 [WARN]
        CACHE   R2 Bucket            assets [WARN]
        API_URL Environment Variable https://example.com

        [WARN] Some binding names are shared; `edgeship check` will fail.
        ");
    }

    #[test]
    fn empty_table() {
        assert_eq!(render_bindings_table(&[], false, false), "No bindings declared.\n");
    }
}
