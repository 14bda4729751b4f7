//! titlecheck-core - Core library for pull request title validation
//!
//! This crate provides the building blocks for:
//! - Matching a title against the `type(scope)!: subject` convention
//! - Running the title rules (type, scope, subject) and collecting [`Issue`]s
//! - Harvesting node display names from TypeScript sources with tree-sitter
//! - Resolving `<display name> Node` scopes against that vocabulary
//!
//! # Features
//!
//! - `walk` - Enable [`WalkSources`] for gitignore-aware directory walking (brings in `ignore` and `globset`)
//! - `parallel` - Enable parallel extraction (brings in `rayon`)
//!
//! # Validating a title
//!
//! The node vocabulary is an injected dependency. Anything implementing
//! [`VocabularySource`] works, including a fixed [`Vocabulary`]:
//!
//! ```
//! use titlecheck_core::{IssueKind, Policy, Validator, Vocabulary};
//!
//! let vocabulary: Vocabulary = ["Mattermost", "Oura"].into_iter().collect();
//! let validator = Validator::new(Policy::default(), vocabulary);
//!
//! assert!(validator.validate("feat(Mattermost Node): add new resource").is_empty());
//!
//! let issues = validator.validate("feat(Mattermos Node): add new resource");
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind, IssueKind::InvalidScope);
//! assert!(issues[0].message.ends_with(". Did you mean `Mattermost Node`?"));
//! ```
//!
//! # Harvesting display names
//!
//! Use [`MemorySources`] when you don't want to hit the filesystem:
//!
//! ```
//! use titlecheck_core::{MemorySources, Sources};
//!
//! let harvest = MemorySources::new()
//!     .add(
//!         "Oura/Oura.node.ts",
//!         "export class Oura { description = { displayName: 'Oura' }; }",
//!     )
//!     .add(
//!         "Mattermost/v1/actions/versionDescription.ts",
//!         "export const versionDescription = { displayName: 'Mattermost' };",
//!     )
//!     .harvest()
//!     .unwrap();
//!
//! assert_eq!(harvest.vocabulary.len(), 2);
//! ```
//!
//! Against a real checkout, [`WalkSources`] discovers `**/*.node.ts` and
//! `**/versionDescription.ts` files under a root and is itself a
//! [`VocabularySource`]:
//!
//! ```ignore
//! use titlecheck_core::{Policy, Validator, WalkSources};
//!
//! let nodes = WalkSources::new("packages/nodes-base/nodes").exclude(["dist/**"]);
//! let validator = Validator::new(Policy::default(), nodes);
//! let issues = validator.validate("fix(Gmail Trigger Node): handle empty inbox");
//! ```

pub mod display_name;
mod grammar;
mod issue;
pub mod policy;
mod rules;
pub mod scope;
mod sources;
mod subject;
mod vocabulary;

pub use display_name::{DeclarationShape, Recognized, SourceKind};
pub use grammar::{ParsedTitle, parse};
pub use issue::{Issue, IssueKind};
pub use policy::Policy;
pub use rules::Validator;
pub use sources::{
    DEFAULT_NODE_GLOB, DEFAULT_VERSION_DESCRIPTION_GLOB, Harvest, MemorySources, PathSources,
    Sources,
};
pub use vocabulary::{Vocabulary, VocabularySource};

#[cfg(feature = "walk")]
pub use sources::WalkSources;
