//! Title policy: the vocabularies and markers the rule pipeline checks against

use eyre::{Result, WrapErr};
use regex::{Regex, RegexBuilder};

/// Change kinds accepted as `type`
pub const DEFAULT_TYPES: &[&str] = &[
    "feat", "fix", "perf", "test", "docs", "refactor", "build", "ci",
];

/// Scopes that are always valid without consulting the node vocabulary
pub const DEFAULT_SCOPES: &[&str] = &["API", "core", "editor"];

/// Ticket references such as `N8N-1234`
pub const DEFAULT_TICKET_PATTERN: &str = r"n8n-\d{3,5}";

/// Subject marker excluding a change from generated release notes
pub const DEFAULT_CHANGELOG_MARKER: &str = "(no-changelog)";

/// Suffix marking a scope as naming a node
pub const NODE_SUFFIX: &str = " Node";

/// Everything the rule pipeline needs to know besides the title itself.
///
/// The ticket pattern is always matched case-insensitively.
#[derive(Debug, Clone)]
pub struct Policy {
    types: Vec<String>,
    scopes: Vec<String>,
    ticket: Regex,
    changelog_marker: String,
}

impl Policy {
    /// Create a policy from explicit lists.
    ///
    /// Fails only when `ticket_pattern` is not a valid regex.
    pub fn new(
        types: impl IntoIterator<Item = impl Into<String>>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
        ticket_pattern: &str,
        changelog_marker: impl Into<String>,
    ) -> Result<Self> {
        let ticket = RegexBuilder::new(ticket_pattern)
            .case_insensitive(true)
            .build()
            .wrap_err_with(|| format!("Invalid ticket pattern: {ticket_pattern}"))?;

        Ok(Self {
            types: types.into_iter().map(Into::into).collect(),
            scopes: scopes.into_iter().map(Into::into).collect(),
            ticket,
            changelog_marker: changelog_marker.into(),
        })
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn changelog_marker(&self) -> &str {
        &self.changelog_marker
    }

    pub fn node_suffix(&self) -> &'static str {
        NODE_SUFFIX
    }

    pub fn is_known_type(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t == ty)
    }

    pub fn is_fixed_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Whether `scope` has the shape of a node scope (`<display name> Node`)
    pub fn is_node_scope(&self, scope: &str) -> bool {
        scope.ends_with(NODE_SUFFIX)
    }

    pub fn contains_ticket(&self, title: &str) -> bool {
        self.ticket.is_match(title)
    }
}

impl Default for Policy {
    fn default() -> Self {
        let ticket = RegexBuilder::new(DEFAULT_TICKET_PATTERN)
            .case_insensitive(true)
            .build()
            .expect("default ticket pattern is valid");

        Self {
            types: DEFAULT_TYPES.iter().map(|s| s.to_string()).collect(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            ticket,
            changelog_marker: DEFAULT_CHANGELOG_MARKER.to_string(),
        }
    }
}
