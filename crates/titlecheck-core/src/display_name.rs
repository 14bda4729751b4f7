//! Display-name extraction from node source files
//!
//! This module provides tree-sitter based parsing of TypeScript node
//! sources to recover the human-readable `displayName` each node declares.
//!
//! Nodes declare their name in one of three shapes:
//!
//! - [`DeclarationShape::Description`]: the majority of node files, where the
//!   node class has a `description = { displayName: '...' }` field
//! - [`DeclarationShape::VersionedBase`]: the base file of a versioned node,
//!   whose constructor builds a `baseDescription` object in a local variable
//! - [`DeclarationShape::VersionDescription`]: a per-version
//!   `versionDescription.ts` file exporting a `versionDescription` object
//!
//! Recognizers are tried in order and the first hit wins. A file that matches
//! none of them yields `None`, which is the common case for helper files.

use arborium::tree_sitter::{Node, Parser, Tree};
use eyre::{Result, WrapErr, eyre};
use std::path::Path;
use tracing::debug;

/// Which naming convention a source file follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `*.node.ts`: a node class, plain or versioned
    NodeFile,
    /// `versionDescription.ts`: a standalone version descriptor
    VersionDescription,
}

impl SourceKind {
    /// Classify a file by name alone
    pub fn from_path(path: &Path) -> Self {
        let is_descriptor = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem == "versionDescription");
        if is_descriptor {
            SourceKind::VersionDescription
        } else {
            SourceKind::NodeFile
        }
    }

    /// Shapes worth trying for this kind of file, in priority order
    pub fn shapes(&self) -> &'static [DeclarationShape] {
        match self {
            SourceKind::NodeFile => &[
                DeclarationShape::Description,
                DeclarationShape::VersionedBase,
            ],
            SourceKind::VersionDescription => &[DeclarationShape::VersionDescription],
        }
    }
}

/// The declaration shape a display name was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationShape {
    Description,
    VersionedBase,
    VersionDescription,
}

impl DeclarationShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationShape::Description => "description",
            DeclarationShape::VersionedBase => "versioned-base",
            DeclarationShape::VersionDescription => "version-description",
        }
    }

    fn recognize(&self, source: &str, root: Node) -> Option<String> {
        match self {
            DeclarationShape::Description => from_description_field(source, root),
            DeclarationShape::VersionedBase => from_constructor_local(source, root),
            DeclarationShape::VersionDescription => from_version_description(source, root),
        }
    }
}

impl std::fmt::Display for DeclarationShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display name together with the shape it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub shape: DeclarationShape,
    pub display_name: String,
}

/// Extract a display name, classifying the file by its name
pub fn extract(path: &Path, source: &str) -> Result<Option<Recognized>> {
    extract_as(SourceKind::from_path(path), path, source)
}

/// Extract a display name from `source`, trying the shapes for `kind`.
///
/// `path` is only used for diagnostics. Errors are limited to the parser
/// itself failing; structural mismatches are `Ok(None)`.
pub fn extract_as(kind: SourceKind, path: &Path, source: &str) -> Result<Option<Recognized>> {
    let tree = parse_typescript(source).wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
    let root = tree.root_node();

    if root.has_error() {
        debug!(path = %path.display(), "syntax errors in source, extracting anyway");
    }

    for shape in kind.shapes() {
        if let Some(display_name) = shape.recognize(source, root) {
            debug!(path = %path.display(), %shape, %display_name, "recognized display name");
            return Ok(Some(Recognized {
                shape: *shape,
                display_name,
            }));
        }
    }

    Ok(None)
}

/// Read and extract a single file
pub fn extract_file(kind: SourceKind, path: &Path) -> Result<Option<Recognized>> {
    let source = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    extract_as(kind, path, &source)
}

fn parse_typescript(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|e| eyre!("Failed to load TypeScript grammar: {e}"))?;

    parser
        .parse(source, None)
        .ok_or_else(|| eyre!("TypeScript parser returned no tree"))
}

// Shape recognizers

/// `class X { description = { displayName: '...' } }`
fn from_description_field(source: &str, root: Node) -> Option<String> {
    let class = first_class(root)?;

    class_members(class)
        .into_iter()
        .filter(|m| matches!(m.kind(), "public_field_definition" | "field_definition"))
        .filter(|m| {
            m.child_by_field_name("name")
                .is_some_and(|name| text(source, name) == "description")
        })
        .filter_map(|m| m.child_by_field_name("value").map(unwrap_expression))
        .find(|value| value.kind() == "object")
        .and_then(|object| display_name_in_object(source, object))
}

/// `class X { constructor() { const baseDescription = { displayName: '...' }; ... } }`
fn from_constructor_local(source: &str, root: Node) -> Option<String> {
    let class = first_class(root)?;

    let constructor = class_members(class).into_iter().find(|m| {
        m.kind() == "method_definition"
            && m.child_by_field_name("name")
                .is_some_and(|name| text(source, name) == "constructor")
    })?;

    let body = constructor.child_by_field_name("body")?;
    let statement = named_children(body)
        .into_iter()
        .find(|s| is_variable_statement(*s))?;

    let declarator = named_children(statement)
        .into_iter()
        .find(|d| d.kind() == "variable_declarator")?;

    let value = unwrap_expression(declarator.child_by_field_name("value")?);
    if value.kind() != "object" {
        return None;
    }
    display_name_in_object(source, value)
}

/// `export const versionDescription = { displayName: '...' }`
fn from_version_description(source: &str, root: Node) -> Option<String> {
    top_level_statements(root)
        .into_iter()
        .filter(|s| is_variable_statement(*s))
        .flat_map(named_children)
        .filter(|d| d.kind() == "variable_declarator")
        .find(|d| {
            d.child_by_field_name("name")
                .is_some_and(|name| text(source, name) == "versionDescription")
        })
        .and_then(|d| d.child_by_field_name("value"))
        .map(unwrap_expression)
        .filter(|value| value.kind() == "object")
        .and_then(|object| display_name_in_object(source, object))
}

// Tree helpers

fn text<'s>(source: &'s str, node: Node) -> &'s str {
    &source[node.byte_range()]
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Top-level statements with `export` wrappers removed
fn top_level_statements(root: Node) -> Vec<Node> {
    named_children(root)
        .into_iter()
        .map(|statement| {
            if statement.kind() == "export_statement" {
                statement
                    .child_by_field_name("declaration")
                    .unwrap_or(statement)
            } else {
                statement
            }
        })
        .collect()
}

fn first_class(root: Node) -> Option<Node> {
    top_level_statements(root)
        .into_iter()
        .find(|s| matches!(s.kind(), "class_declaration" | "abstract_class_declaration"))
}

fn class_members(class: Node) -> Vec<Node> {
    class
        .child_by_field_name("body")
        .map(named_children)
        .unwrap_or_default()
}

fn is_variable_statement(node: Node) -> bool {
    matches!(node.kind(), "lexical_declaration" | "variable_declaration")
}

/// Strip `( ... )`, `... as T` and `... satisfies T` around an expression
fn unwrap_expression(mut node: Node) -> Node {
    while matches!(
        node.kind(),
        "parenthesized_expression" | "as_expression" | "satisfies_expression"
    ) {
        match named_children(node).into_iter().next() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Find `displayName: '<literal>'` among an object literal's pairs
fn display_name_in_object(source: &str, object: Node) -> Option<String> {
    named_children(object)
        .into_iter()
        .filter(|p| p.kind() == "pair")
        .find_map(|pair| {
            let key = pair.child_by_field_name("key")?;
            if key.kind() != "property_identifier" || text(source, key) != "displayName" {
                return None;
            }
            let value = pair.child_by_field_name("value")?;
            if value.kind() != "string" {
                return None;
            }
            string_literal_text(text(source, value))
        })
        .filter(|name| !name.is_empty())
}

/// Contents of a quoted string literal with common escapes resolved
fn string_literal_text(raw: &str) -> Option<String> {
    let inner = raw.get(1..raw.len().checked_sub(1)?)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }

    Some(out)
}
