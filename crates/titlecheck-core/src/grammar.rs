//! Grammar matcher for `type(scope)!: subject` titles

use regex::Regex;
use std::sync::LazyLock;

static CONVENTIONAL_SCHEMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<type>\w+)(?<scoped>\((?<scope>.*)\))?(?<breaking>!)?: (?<subject>.*)$")
        .expect("conventional schema is a valid regex")
});

/// A title split into its grammar slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTitle<'a> {
    /// Change kind, e.g. `feat`
    pub ty: &'a str,
    /// Raw scope list between the parentheses, if any
    pub scope: Option<&'a str>,
    /// Everything after `: `
    pub subject: &'a str,
    /// Whether the `!` breaking-change marker was present
    pub breaking: bool,
}

/// Match `title` against the conventional schema.
///
/// Returns `None` when the title does not match or the subject is empty.
/// Empty parentheses (`feat(): ...`) are treated as no scope at all.
pub fn parse(title: &str) -> Option<ParsedTitle<'_>> {
    let caps = CONVENTIONAL_SCHEMA.captures(title)?;

    let ty = caps.name("type")?.as_str();
    let subject = caps.name("subject")?.as_str();
    if subject.is_empty() {
        return None;
    }

    let scope = caps
        .name("scope")
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty());

    Some(ParsedTitle {
        ty,
        scope,
        subject,
        breaking: caps.name("breaking").is_some(),
    })
}
