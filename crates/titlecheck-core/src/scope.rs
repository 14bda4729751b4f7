//! Node-scope resolution against the display-name vocabulary

use crate::vocabulary::Vocabulary;

/// Outcome of resolving a node scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'v> {
    /// Some vocabulary entry is a prefix of the scope
    Known,
    /// No entry matched; carries the nearest entry by edit distance
    Unknown { closest: Option<&'v str> },
}

/// Resolve a node scope such as `Mattermost Node`.
///
/// Membership is a prefix test: the scope is known if it starts with any
/// display name. On a miss, the scope with its `suffix` stripped is compared
/// to every entry by Levenshtein distance; ties keep the first entry in
/// sorted order.
pub fn resolve<'v>(scope: &str, suffix: &str, vocabulary: &'v Vocabulary) -> Resolution<'v> {
    if vocabulary.iter().any(|name| scope.starts_with(name)) {
        return Resolution::Known;
    }

    let needle = scope.split(suffix).next().unwrap_or(scope);
    Resolution::Unknown {
        closest: closest(needle, vocabulary),
    }
}

/// Nearest vocabulary entry to `needle` by Levenshtein distance
pub fn closest<'v>(needle: &str, vocabulary: &'v Vocabulary) -> Option<&'v str> {
    let mut best: Option<(&str, usize)> = None;
    for name in vocabulary.iter() {
        let distance = strsim::levenshtein(needle, name);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((name, distance));
        }
    }
    best.map(|(name, _)| name)
}
