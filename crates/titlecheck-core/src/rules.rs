//! The rule pipeline: grammar match, then every title rule in a fixed order

use crate::grammar::{self, ParsedTitle};
use crate::issue::{Issue, IssueKind};
use crate::policy::Policy;
use crate::scope::{self, Resolution};
use crate::subject;
use crate::vocabulary::{Vocabulary, VocabularySource};
use std::cell::OnceCell;
use tracing::warn;

/// Separator between scopes in a scope list
const SCOPE_DELIMITER: &str = ", ";

/// Validates titles against a [`Policy`], resolving node scopes through `V`.
///
/// `validate` holds no state between calls: the vocabulary is loaded at most
/// once per call, and only if a node scope is present.
pub struct Validator<V> {
    policy: Policy,
    vocabulary: V,
}

impl<V: VocabularySource> Validator<V> {
    pub fn new(policy: Policy, vocabulary: V) -> Self {
        Self { policy, vocabulary }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Validate one title, returning issues in rule order.
    ///
    /// An empty list means the title is accepted. A ticket reference or a
    /// schema mismatch is reported alone; all other rules accumulate.
    pub fn validate(&self, title: &str) -> Vec<Issue> {
        if self.policy.contains_ticket(title) {
            return vec![self.issue(IssueKind::TicketNumberPresent)];
        }

        let Some(parsed) = grammar::parse(title) else {
            return vec![self.issue(IssueKind::SchemaMismatch)];
        };

        let vocabulary = LazyVocabulary::new(&self.vocabulary);
        let mut issues = Vec::new();

        self.check_type(&parsed, &mut issues);
        self.check_scopes(&parsed, &vocabulary, &mut issues);
        self.check_subject(&parsed, &mut issues);

        issues
    }

    fn issue(&self, kind: IssueKind) -> Issue {
        Issue::new(kind, &self.policy)
    }

    fn check_type(&self, parsed: &ParsedTitle<'_>, issues: &mut Vec<Issue>) {
        if !self.policy.is_known_type(parsed.ty) {
            issues.push(self.issue(IssueKind::InvalidType));
        }
    }

    fn check_scopes(
        &self,
        parsed: &ParsedTitle<'_>,
        vocabulary: &LazyVocabulary<'_, V>,
        issues: &mut Vec<Issue>,
    ) {
        let Some(scopes) = parsed.scope else {
            return;
        };

        if has_comma_without_space(scopes) {
            issues.push(self.issue(IssueKind::MalformedScopeDelimiter));
            return;
        }

        for scope in scopes.split(SCOPE_DELIMITER) {
            if let Some(issue) = self.scope_issue(scope, vocabulary) {
                issues.push(issue);
            }
        }
    }

    fn scope_issue(&self, scope: &str, vocabulary: &LazyVocabulary<'_, V>) -> Option<Issue> {
        if self.policy.is_fixed_scope(scope) {
            return None;
        }

        if !self.policy.is_node_scope(scope) {
            return Some(self.issue(IssueKind::InvalidScope));
        }

        let Some(names) = vocabulary.get() else {
            warn!(scope, "no node display names available, skipping node scope check");
            return None;
        };

        match scope::resolve(scope, self.policy.node_suffix(), names) {
            Resolution::Known => None,
            Resolution::Unknown {
                closest: Some(closest),
            } => Some(Issue::invalid_scope_with_suggestion(&self.policy, closest)),
            Resolution::Unknown { closest: None } => Some(self.issue(IssueKind::InvalidScope)),
        }
    }

    fn check_subject(&self, parsed: &ParsedTitle<'_>, issues: &mut Vec<Issue>) {
        let subject = parsed.subject;

        if subject::starts_with_uppercase(subject) {
            issues.push(self.issue(IssueKind::SubjectCaseViolation));
        }

        if subject::ends_with_period(subject) {
            issues.push(self.issue(IssueKind::SubjectTrailingPeriod));
        }

        if subject::first_verb_is_past_tense(subject) {
            issues.push(self.issue(IssueKind::SubjectNotPresentTense));
        }

        if subject::marker_is_misplaced(subject, self.policy.changelog_marker()) {
            issues.push(self.issue(IssueKind::ChangelogMarkerMisplaced));
        }
    }
}

fn has_comma_without_space(scopes: &str) -> bool {
    scopes
        .split(',')
        .skip(1)
        .any(|after| after.chars().next().is_some_and(|c| !c.is_whitespace()))
}

/// Vocabulary loaded on first use, for the duration of one validation
struct LazyVocabulary<'s, V> {
    source: &'s V,
    loaded: OnceCell<Option<Vocabulary>>,
}

impl<'s, V: VocabularySource> LazyVocabulary<'s, V> {
    fn new(source: &'s V) -> Self {
        Self {
            source,
            loaded: OnceCell::new(),
        }
    }

    /// The vocabulary, or `None` if it failed to load or came back empty
    fn get(&self) -> Option<&Vocabulary> {
        self.loaded
            .get_or_init(|| match self.source.load() {
                Ok(vocabulary) if vocabulary.is_empty() => {
                    warn!("failed to find any node display names");
                    None
                }
                Ok(vocabulary) => Some(vocabulary),
                Err(e) => {
                    let error = format!("{e:#}");
                    warn!(%error, "failed to load node display names");
                    None
                }
            })
            .as_ref()
    }
}
