//! Node display-name vocabulary and the sources it can be loaded from

use eyre::Result;
use std::collections::BTreeSet;

/// Set of node display names harvested from a source tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    names: BTreeSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a display name, ignoring empty ones.
    ///
    /// Returns whether the name was newly added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Merge another vocabulary into this one
    pub fn merge(&mut self, other: Vocabulary) {
        self.names.extend(other.names);
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        for name in iter {
            vocabulary.insert(name);
        }
        vocabulary
    }
}

impl<S: Into<String>> Extend<S> for Vocabulary {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

/// Something that can produce a vocabulary on demand.
///
/// The rule pipeline calls [`VocabularySource::load`] at most once per
/// validation, and only when a node scope needs resolving. Errors are
/// never fatal to validation: they downgrade to "no vocabulary".
pub trait VocabularySource {
    fn load(&self) -> Result<Vocabulary>;
}

impl VocabularySource for Vocabulary {
    fn load(&self) -> Result<Vocabulary> {
        Ok(self.clone())
    }
}

impl<F> VocabularySource for F
where
    F: Fn() -> Result<Vocabulary>,
{
    fn load(&self) -> Result<Vocabulary> {
        self()
    }
}
