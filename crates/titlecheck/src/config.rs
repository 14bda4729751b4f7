//! Configuration schema for titlecheck
//!
//! Config lives at `.config/titlecheck/config.yaml` relative to the project
//! root. Every key is optional; omitted keys fall back to the built-in policy.

use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use titlecheck_core::policy::{
    DEFAULT_CHANGELOG_MARKER, DEFAULT_SCOPES, DEFAULT_TICKET_PATTERN, DEFAULT_TYPES,
};
use titlecheck_core::{Policy, WalkSources};

/// Config path relative to the project root
pub const DEFAULT_CONFIG_PATH: &str = ".config/titlecheck/config.yaml";

/// Node sources directory relative to the project root
pub const DEFAULT_NODES_ROOT: &str = "packages/nodes-base/nodes";

const DEFAULT_EXCLUDE: &[&str] = &["node_modules/**", "dist/**"];

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Root configuration for titlecheck
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Accepted change kinds, e.g. `[feat, fix]`
    pub types: Option<Vec<String>>,

    /// Scopes accepted without a vocabulary lookup
    pub scopes: Option<Vec<String>>,

    /// Ticket reference regex, matched case-insensitively
    pub ticket_pattern: Option<String>,

    pub changelog_marker: Option<String>,

    pub nodes: NodesConfig,
}

/// Where node display names are harvested from
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodesConfig {
    /// Directory to walk, relative to the project root
    pub root: Option<PathBuf>,

    /// Globs for primary node declaration files
    /// Defaults to `["**/*.node.ts"]` if not specified
    pub include: Vec<String>,

    /// Globs for standalone version descriptors
    /// Defaults to `["**/versionDescription.ts"]` if not specified
    pub version_descriptions: Vec<String>,

    /// Globs to skip, relative to the nodes root
    pub exclude: Option<Vec<String>>,

    /// Upper bound on building the vocabulary
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load a config file.
    ///
    /// A missing file is an error only when `required` is set; otherwise the
    /// built-in defaults are used.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                eyre::bail!("Config file not found at {}", path.display());
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build the title policy, compiling the ticket pattern
    pub fn to_policy(&self) -> Result<Policy> {
        let types = or_defaults(&self.types, DEFAULT_TYPES);
        let scopes = or_defaults(&self.scopes, DEFAULT_SCOPES);
        let ticket_pattern = self
            .ticket_pattern
            .as_deref()
            .unwrap_or(DEFAULT_TICKET_PATTERN);
        let marker = self
            .changelog_marker
            .as_deref()
            .unwrap_or(DEFAULT_CHANGELOG_MARKER);

        Policy::new(types, scopes, ticket_pattern, marker)
    }

    /// Build the node walker rooted under `project_root`
    pub fn to_walk_sources(&self, project_root: &Path) -> WalkSources {
        let nodes = &self.nodes;
        let root = project_root.join(
            nodes
                .root
                .as_deref()
                .unwrap_or(Path::new(DEFAULT_NODES_ROOT)),
        );

        let mut walk = WalkSources::new(root).exclude(or_defaults(&nodes.exclude, DEFAULT_EXCLUDE));
        if !nodes.include.is_empty() {
            walk = walk.include(nodes.include.iter().cloned());
        }
        if !nodes.version_descriptions.is_empty() {
            walk = walk.version_descriptions(nodes.version_descriptions.iter().cloned());
        }
        walk
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.nodes.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn or_defaults(values: &Option<Vec<String>>, defaults: &[&str]) -> Vec<String> {
    match values {
        Some(values) => values.clone(),
        None => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        let policy = config.to_policy().unwrap();

        assert_eq!(policy.types(), DEFAULT_TYPES);
        assert_eq!(policy.scopes(), DEFAULT_SCOPES);
        assert!(policy.contains_ticket("closes N8N-1234"));
        assert_eq!(policy.changelog_marker(), "(no-changelog)");
        assert_eq!(config.timeout(), Duration::from_secs(120));

        let walk = config.to_walk_sources(Path::new("/repo"));
        assert_eq!(walk.root(), Path::new("/repo/packages/nodes-base/nodes"));
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
types: [feat, fix, chore]
scopes: [cli]
ticket_pattern: 'PROJ-\d+'
changelog_marker: "[skip changelog]"
nodes:
  root: src/nodes
  include: ["**/*.node.ts"]
  exclude: ["legacy/**"]
  timeout_secs: 5
"#,
        )
        .unwrap();

        let policy = config.to_policy().unwrap();
        assert_eq!(policy.types(), ["feat", "fix", "chore"]);
        assert_eq!(policy.scopes(), ["cli"]);
        assert!(policy.contains_ticket("proj-7"));
        assert!(!policy.contains_ticket("n8n-1234"));
        assert_eq!(policy.changelog_marker(), "[skip changelog]");
        assert_eq!(config.timeout(), Duration::from_secs(5));

        let walk = config.to_walk_sources(Path::new("/repo"));
        assert_eq!(walk.root(), Path::new("/repo/src/nodes"));
    }

    #[test]
    fn test_invalid_ticket_pattern() {
        let config = Config::parse("ticket_pattern: '(unclosed'").unwrap();
        assert!(config.to_policy().is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::parse("typos: [feat]").is_err());
    }

    #[test]
    fn test_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");

        assert!(Config::load(&path, false).is_ok());
        assert!(Config::load(&path, true).is_err());
    }
}
