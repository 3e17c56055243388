//! HTML report rendering
//!
//! The report template uses `$name` / `${name}` placeholders; `$$` stands for
//! a literal dollar sign. Available placeholders: `archive1_name`,
//! `archive2_name`, `report_time`, `added_count`, `removed_count`,
//! `modified_count`, `identical_count` and `details_html`.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use super::types::{ComparisonResult, DiffLineKind, FileDiff, ModifiedContent, ModifiedFile};
use crate::error::{Error, Result};

/// Template bundled with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/comparison_report.html");

/// Timestamp format used in reports.
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header information of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Display name of the old release.
    pub old_name: String,
    /// Display name of the new release.
    pub new_name: String,
    pub report_time: String,
}

impl ReportContext {
    /// Context for two archive paths, named by file name, stamped with the local time.
    pub fn for_archives(old: &Path, new: &Path) -> Self {
        Self {
            old_name: display_name(old),
            new_name: display_name(new),
            report_time: chrono::Local::now().format(REPORT_TIME_FORMAT).to_string(),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Load a custom template, or the bundled one when `path` is `None`.
///
/// # Errors
/// Returns an error if the template file cannot be read.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e)),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Render the comparison as a complete HTML document.
///
/// # Errors
/// Returns an error if the template references an unknown placeholder or
/// contains a stray `$`.
pub fn render_html(result: &ComparisonResult, context: &ReportContext, template: &str) -> Result<String> {
    let mut values: HashMap<&str, String> = HashMap::new();
    values.insert("archive1_name", escape_html(&context.old_name));
    values.insert("archive2_name", escape_html(&context.new_name));
    values.insert("report_time", escape_html(&context.report_time));
    values.insert("added_count", result.added.len().to_string());
    values.insert("removed_count", result.removed.len().to_string());
    values.insert("modified_count", result.modified.len().to_string());
    values.insert("identical_count", result.identical.len().to_string());
    values.insert("details_html", details_html(result));

    substitute(template, &values)
}

/// Fill `$name` and `${name}` placeholders.
///
/// # Errors
/// Returns [`Error::TemplatePlaceholder`] for a name with no value and
/// [`Error::TemplateSyntax`] for a `$` that starts no valid placeholder.
pub fn substitute(template: &str, values: &HashMap<&str, String>) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        output.push_str(&rest[..pos]);
        let offset = template.len() - rest.len() + pos;
        let after = &rest[pos + 1..];

        let (name, consumed) = if after.starts_with('$') {
            output.push('$');
            rest = &after[1..];
            continue;
        } else if let Some(braced) = after.strip_prefix('{') {
            let name_len = identifier_len(braced);
            if name_len == 0 || !braced[name_len..].starts_with('}') {
                return Err(Error::TemplateSyntax(offset));
            }
            (&braced[..name_len], name_len + 2)
        } else {
            let name_len = identifier_len(after);
            if name_len == 0 {
                return Err(Error::TemplateSyntax(offset));
            }
            (&after[..name_len], name_len)
        };

        let value = values
            .get(name)
            .ok_or_else(|| Error::TemplatePlaceholder(name.to_string()))?;
        output.push_str(value);
        rest = &after[consumed..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Length of the ASCII identifier at the start of `s`.
fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let valid = c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit());
        if !valid {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

/// Escape `& < > " '` for HTML text and attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn details_html(result: &ComparisonResult) -> String {
    let mut html = String::new();
    list_section(&mut html, "Added files", &result.added);
    list_section(&mut html, "Removed files", &result.removed);
    if !result.modified.is_empty() {
        html.push_str("<div>");
        for file in &result.modified {
            modified_file_html(&mut html, file);
        }
        html.push_str("</div>");
    }
    list_section(&mut html, "Unchanged files", &result.identical);
    html
}

fn list_section(html: &mut String, title: &str, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    let _ = write!(
        html,
        "<details><summary><span>{title} ({})</span></summary><div class=\"file-list-wrapper\"><ul class=\"file-list\">",
        paths.len()
    );
    for path in paths {
        let _ = write!(html, "<li>{}</li>", escape_html(path));
    }
    html.push_str("</ul></div></details>\n");
}

fn modified_file_html(html: &mut String, file: &ModifiedFile) {
    let path = escape_html(&file.path);
    match &file.content {
        ModifiedContent::Binary => {
            let _ = write!(
                html,
                "<details><summary><span>{path}</span></summary><div class=\"diff-summary-bin\">Binary file, contents changed.</div></details>\n"
            );
        }
        ModifiedContent::Unreadable(reason) => {
            let _ = write!(
                html,
                "<details><summary><span>{path}</span></summary><p class=\"diff-error\">Could not read file for comparison: {}</p></details>\n",
                escape_html(reason)
            );
        }
        ModifiedContent::Text(diff) => {
            let mut stats = String::new();
            if diff.stats.added > 0 {
                let _ = write!(stats, "<span class=\"diff-stat-add\">+{}</span>", diff.stats.added);
            }
            if diff.stats.removed > 0 {
                let _ = write!(stats, "<span class=\"diff-stat-del\">-{}</span>", diff.stats.removed);
            }
            let _ = write!(
                html,
                "<details><summary><span>{path}</span><div class=\"diff-stats\">{stats}</div></summary><div class=\"diff-container\">{}</div></details>\n",
                diff_table(diff)
            );
        }
    }
}

fn diff_table(diff: &FileDiff) -> String {
    let mut table = String::from("<table class=\"context-diff-table\">");
    for hunk in &diff.hunks {
        let _ = write!(
            table,
            "<tr class=\"diff-hunk\"><td colspan=\"4\">{}</td></tr>",
            escape_html(&hunk.header)
        );
        for line in &hunk.lines {
            let class = match line.kind {
                DiffLineKind::Context => "",
                DiffLineKind::Added => " class=\"diff-add\"",
                DiffLineKind::Removed => " class=\"diff-sub\"",
            };
            let _ = write!(
                table,
                "<tr{class}><td class=\"diff-line-num\">{}</td><td class=\"diff-line-num\">{}</td><td class=\"diff-line-op\">{}</td><td class=\"diff-line-code\">{}</td></tr>",
                line_number(line.old_line),
                line_number(line.new_line),
                line.kind,
                escape_html(&line.text)
            );
        }
    }
    table.push_str("</table>");
    table
}

fn line_number(number: Option<usize>) -> String {
    number.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::line_diff::diff_texts;

    fn values(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, (*v).to_string())).collect()
    }

    #[test]
    fn test_substitute_forms() {
        let out = substitute("a=$a, b=${b}x, cost $$5", &values(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(out, "a=1, b=2x, cost $5");
    }

    #[test]
    fn test_substitute_errors() {
        assert!(matches!(
            substitute("${missing}", &values(&[])),
            Err(Error::TemplatePlaceholder(name)) if name == "missing"
        ));
        assert!(matches!(substitute("price: $5", &values(&[])), Err(Error::TemplateSyntax(7))));
        assert!(matches!(substitute("${open", &values(&[])), Err(Error::TemplateSyntax(0))));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
    }

    #[test]
    fn test_render_default_template() {
        let result = ComparisonResult {
            added: vec!["new <file>.txt".to_string()],
            removed: Vec::new(),
            modified: vec![
                ModifiedFile {
                    path: "lang.json".to_string(),
                    content: ModifiedContent::Text(diff_texts("a\n<b>\n", "a\nc\n", 2)),
                },
                ModifiedFile {
                    path: "icon.png".to_string(),
                    content: ModifiedContent::Binary,
                },
            ],
            identical: vec!["same.txt".to_string()],
        };
        let context = ReportContext {
            old_name: "v1.zip".to_string(),
            new_name: "v2.zip".to_string(),
            report_time: "2024-01-02 03:04:05".to_string(),
        };

        let html = render_html(&result, &context, DEFAULT_TEMPLATE).unwrap();

        assert!(html.contains("v1.zip"));
        assert!(html.contains("2024-01-02 03:04:05"));
        assert!(html.contains("new &lt;file&gt;.txt"));
        assert!(html.contains("Added files (1)"));
        assert!(!html.contains("Removed files"));
        assert!(html.contains("<span class=\"diff-stat-add\">+1</span>"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("Binary file, contents changed."));
        assert!(html.contains("@@ -1,2 +1,2 @@"));
        assert!(!html.contains("${"));
    }

    #[test]
    fn test_context_names() {
        let context = ReportContext::for_archives(Path::new("dist/old.zip"), Path::new("new.tar.gz"));
        assert_eq!(context.old_name, "old.zip");
        assert_eq!(context.new_name, "new.tar.gz");
        assert_eq!(context.report_time.len(), 19);
    }
}
