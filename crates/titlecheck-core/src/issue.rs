//! Issues reported against a pull request title

use crate::policy::Policy;
use serde::Serialize;

/// The kind of rule a title violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Title does not match `type(scope)!: subject`
    SchemaMismatch,
    /// Title references a ticket id
    TicketNumberPresent,
    /// `type` is not one of the configured change kinds
    InvalidType,
    /// A scope is neither a fixed scope nor a known node
    InvalidScope,
    /// Scope list uses a comma without a following space
    MalformedScopeDelimiter,
    /// Subject starts with an uppercase character
    SubjectCaseViolation,
    /// Subject ends with a period
    SubjectTrailingPeriod,
    /// Subject's first verb is not in its base form
    SubjectNotPresentTense,
    /// Changelog-skip marker is present but not the subject's suffix
    ChangelogMarkerMisplaced,
}

impl IssueKind {
    /// Stable machine-readable code for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::SchemaMismatch => "schema_mismatch",
            IssueKind::TicketNumberPresent => "ticket_number_present",
            IssueKind::InvalidType => "invalid_type",
            IssueKind::InvalidScope => "invalid_scope",
            IssueKind::MalformedScopeDelimiter => "malformed_scope_delimiter",
            IssueKind::SubjectCaseViolation => "subject_case_violation",
            IssueKind::SubjectTrailingPeriod => "subject_trailing_period",
            IssueKind::SubjectNotPresentTense => "subject_not_present_tense",
            IssueKind::ChangelogMarkerMisplaced => "changelog_marker_misplaced",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Human-readable message, including any suggestion supplement
    pub message: String,
    /// Nearest known node display name, when one was computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    /// Build an issue with the base message for `kind` under `policy`
    pub fn new(kind: IssueKind, policy: &Policy) -> Self {
        Self {
            kind,
            message: base_message(kind, policy),
            suggestion: None,
        }
    }

    /// Build an invalid-scope issue carrying a "did you mean" supplement
    pub fn invalid_scope_with_suggestion(policy: &Policy, closest: impl Into<String>) -> Self {
        let closest = closest.into();
        let message = format!(
            "{}. Did you mean `{}{}`?",
            base_message(IssueKind::InvalidScope, policy),
            closest,
            policy.node_suffix()
        );
        Self {
            kind: IssueKind::InvalidScope,
            message,
            suggestion: Some(closest),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

fn base_message(kind: IssueKind, policy: &Policy) -> String {
    let types = policy.types().join(",");
    let scopes = policy.scopes().join(",");
    let marker = policy.changelog_marker();

    match kind {
        IssueKind::SchemaMismatch => [
            "PR title does not conform to PR title convention.".to_string(),
            format!(
                "Please use `type(scope): subject` or `type: subject`, where `type` is one of {{{types}}} and scope is one of {{{scopes}}} or may be omitted."
            ),
            "For the subject, mind the whitespace, use initial lowercase and omit final period."
                .to_string(),
        ]
        .join("\n"),
        IssueKind::TicketNumberPresent => "PR title must not contain a ticket number".to_string(),
        IssueKind::InvalidType => {
            format!("Unknown `type` in PR title. Expected one of {{{types}}}")
        }
        IssueKind::InvalidScope => format!(
            "Unknown `scope` in PR title. Expected one of {{{scopes}}} or a node scope, e.g. Mattermost{}",
            policy.node_suffix()
        ),
        IssueKind::MalformedScopeDelimiter => {
            "Scopes in a list must be separated by a comma and a space, e.g. `core, editor`"
                .to_string()
        }
        IssueKind::SubjectCaseViolation => "First char of subject must be lowercase".to_string(),
        IssueKind::SubjectTrailingPeriod => "Subject must not end with a period".to_string(),
        IssueKind::SubjectNotPresentTense => {
            "Subject must use present tense, e.g. `implement` instead of `implemented`".to_string()
        }
        IssueKind::ChangelogMarkerMisplaced => format!(
            "`{marker}` must be in suffix position, e.g. `docs(Mattermost{}): fix typo {marker}`",
            policy.node_suffix()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_type_lists_configured_types() {
        let issue = Issue::new(IssueKind::InvalidType, &Policy::default());
        assert_eq!(
            issue.message,
            "Unknown `type` in PR title. Expected one of {feat,fix,perf,test,docs,refactor,build,ci}"
        );
    }

    #[test]
    fn test_suggestion_supplement() {
        let policy = Policy::default();
        let issue = Issue::invalid_scope_with_suggestion(&policy, "Mattermost");
        let base = Issue::new(IssueKind::InvalidScope, &policy);

        assert_eq!(issue.kind, IssueKind::InvalidScope);
        assert_eq!(
            issue.message,
            format!("{}. Did you mean `Mattermost Node`?", base.message)
        );
        assert_eq!(issue.suggestion.as_deref(), Some("Mattermost"));
    }

    #[test]
    fn test_kind_serializes_as_code() {
        let issue = Issue::new(IssueKind::SubjectTrailingPeriod, &Policy::default());
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"kind\":\"subject_trailing_period\""));
        assert!(!json.contains("suggestion"));
    }
}
