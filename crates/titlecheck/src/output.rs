//! Output formatting for validation reports and vocabulary dumps

use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;
use titlecheck_core::{Issue, Vocabulary};

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    title: &'a str,
    valid: bool,
    issues: &'a [Issue],
}

/// Render the issues found for `title` in the specified format
pub fn render_report(title: &str, issues: &[Issue], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(title, issues),
        OutputFormat::Json => to_json(&Report {
            title,
            valid: issues.is_empty(),
            issues,
        }),
    }
}

fn render_text(title: &str, issues: &[Issue]) -> String {
    let mut output = String::new();

    if issues.is_empty() {
        output.push_str(&format!(
            "{} {}\n",
            "OK".if_supports_color(Stream::Stdout, |t| t.style(Style::new().green().bold())),
            title
        ));
        return output;
    }

    output.push_str(&format!(
        "{} {} ({} {})\n",
        "FAIL".if_supports_color(Stream::Stdout, |t| t.style(Style::new().red().bold())),
        title,
        issues.len(),
        if issues.len() == 1 { "issue" } else { "issues" }
    ));

    for issue in issues {
        let mut lines = issue.message.lines();
        let code = format!("[{}]", issue.kind);
        output.push_str(&format!(
            "  {} {}\n",
            code.if_supports_color(Stream::Stdout, |t| t.yellow()),
            lines.next().unwrap_or_default()
        ));
        for line in lines {
            output.push_str(&format!("    {line}\n"));
        }
    }

    output
}

/// Render a harvested vocabulary, one name per line or as a JSON array
pub fn render_names(vocabulary: &Vocabulary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => vocabulary.iter().map(|name| format!("{name}\n")).collect(),
        OutputFormat::Json => to_json(&vocabulary.iter().collect::<Vec<_>>()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("{json}\n"),
        Err(e) => format!("{{\"error\": \"{e}\"}}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titlecheck_core::{IssueKind, Policy};

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("html"), None);
    }

    #[test]
    fn test_json_report() {
        let issues = vec![Issue::invalid_scope_with_suggestion(
            &Policy::default(),
            "Mattermost",
        )];
        let json = render_report("feat(Mattermos Node): add x", &issues, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["valid"], false);
        assert_eq!(value["issues"][0]["kind"], "invalid_scope");
        assert_eq!(value["issues"][0]["suggestion"], "Mattermost");
    }

    #[test]
    fn test_json_report_without_issues() {
        let json = render_report("feat: add x", &[], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["valid"], true);
        assert_eq!(value["issues"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_text_report_indents_continuation_lines() {
        let issues = vec![Issue::new(IssueKind::SchemaMismatch, &Policy::default())];
        let text = render_report("nope", &issues, OutputFormat::Text);

        assert!(text.contains("schema_mismatch"));
        assert!(text.contains("PR title does not conform to PR title convention."));
        assert!(text.contains("\n    For the subject, mind the whitespace"));
    }

    #[test]
    fn test_names() {
        let vocabulary: Vocabulary = ["Oura", "Gmail"].into_iter().collect();
        assert_eq!(render_names(&vocabulary, OutputFormat::Text), "Gmail\nOura\n");
        assert_eq!(
            render_names(&vocabulary, OutputFormat::Json),
            "[\n  \"Gmail\",\n  \"Oura\"\n]\n"
        );
    }
}
