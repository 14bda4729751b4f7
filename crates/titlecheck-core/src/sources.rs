//! Source providers for display-name harvesting

use crate::display_name::{self, SourceKind};
use crate::vocabulary::{Vocabulary, VocabularySource};
use eyre::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default glob for primary node declaration files
pub const DEFAULT_NODE_GLOB: &str = "**/*.node.ts";

/// Default glob for standalone version descriptors
pub const DEFAULT_VERSION_DESCRIPTION_GLOB: &str = "**/versionDescription.ts";

/// Result of harvesting display names, including per-file warnings
#[derive(Debug, Default)]
pub struct Harvest {
    pub vocabulary: Vocabulary,
    /// Files that could not be read or parsed
    pub warnings: Vec<String>,
    /// Number of files run through the extractor
    pub files_scanned: usize,
}

impl Harvest {
    fn record(&mut self, path: &Path, outcome: Result<Option<display_name::Recognized>>) {
        self.files_scanned += 1;
        match outcome {
            Ok(Some(recognized)) => {
                self.vocabulary.insert(recognized.display_name);
            }
            Ok(None) => {
                debug!(path = %path.display(), "no display name");
            }
            Err(e) => self
                .warnings
                .push(format!("{}: {:#}", path.display(), e)),
        }
    }

    fn merge(&mut self, other: Harvest) {
        self.vocabulary.merge(other.vocabulary);
        self.warnings.extend(other.warnings);
        self.files_scanned += other.files_scanned;
    }
}

/// Trait for providing node source files to harvest display names from
pub trait Sources {
    /// Run the extractor over every source and collect the results
    fn harvest(self) -> Result<Harvest>;
}

/// Extract every `(kind, path)` entry, reading each file from disk
fn harvest_paths(files: Vec<(SourceKind, PathBuf)>) -> Harvest {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        files
            .par_iter()
            .map(|(kind, path)| {
                let mut harvest = Harvest::default();
                harvest.record(path, display_name::extract_file(*kind, path));
                harvest
            })
            .reduce(Harvest::default, |mut acc, part| {
                acc.merge(part);
                acc
            })
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut harvest = Harvest::default();
        for (kind, path) in &files {
            harvest.record(path, display_name::extract_file(*kind, path));
        }
        harvest
    }
}

/// Sources from an explicit list of file paths
pub struct PathSources(Vec<PathBuf>);

impl PathSources {
    /// Create from an iterator of paths
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl Sources for PathSources {
    fn harvest(self) -> Result<Harvest> {
        let files = self
            .0
            .into_iter()
            .map(|path| (SourceKind::from_path(&path), path))
            .collect();
        Ok(harvest_paths(files))
    }
}

/// In-memory sources (useful for testing)
#[derive(Debug, Clone, Default)]
pub struct MemorySources(Vec<(PathBuf, String)>);

impl MemorySources {
    /// Create empty memory sources
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a file with content
    pub fn add(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.0.push((path.into(), content.into()));
        self
    }
}

impl Sources for MemorySources {
    fn harvest(self) -> Result<Harvest> {
        let mut harvest = Harvest::default();
        for (path, content) in &self.0 {
            harvest.record(path, display_name::extract(path, content));
        }
        Ok(harvest)
    }
}

impl VocabularySource for MemorySources {
    fn load(&self) -> Result<Vocabulary> {
        Ok(self.clone().harvest()?.vocabulary)
    }
}

/// Gitignore-aware directory walker
#[cfg(feature = "walk")]
#[derive(Debug, Clone)]
pub struct WalkSources {
    root: PathBuf,
    include: Vec<String>,
    version_descriptions: Vec<String>,
    exclude: Vec<String>,
}

#[cfg(feature = "walk")]
impl WalkSources {
    /// Create a walker for the given root directory, using the default globs
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: vec![DEFAULT_NODE_GLOB.to_string()],
            version_descriptions: vec![DEFAULT_VERSION_DESCRIPTION_GLOB.to_string()],
            exclude: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Replace the node file patterns (e.g., `["**/*.node.ts"]`)
    pub fn include(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the version descriptor patterns (e.g., `["**/versionDescription.ts"]`)
    pub fn version_descriptions(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.version_descriptions = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Add exclude patterns (e.g., `["dist/**"]`)
    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Walk the root and classify every matching file
    pub fn discover(&self) -> Result<Vec<(SourceKind, PathBuf)>> {
        use eyre::WrapErr;
        use ignore::WalkBuilder;

        if !self.root.is_dir() {
            eyre::bail!("Node source root not found: {}", self.root.display());
        }

        let include = build_globset(&self.include).wrap_err("Invalid include pattern")?;
        let descriptors = build_globset(&self.version_descriptions)
            .wrap_err("Invalid version description pattern")?;
        let exclude = build_globset(&self.exclude).wrap_err("Invalid exclude pattern")?;

        let walker = WalkBuilder::new(&self.root)
            .follow_links(true)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);

            if exclude.is_match(relative) {
                continue;
            }

            // a file matching both conventions is treated as a descriptor
            let kind = if descriptors.is_match(relative) {
                SourceKind::VersionDescription
            } else if include.is_match(relative) {
                SourceKind::NodeFile
            } else {
                continue;
            };

            files.push((kind, path.to_path_buf()));
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }
}

#[cfg(feature = "walk")]
fn build_globset(patterns: &[String]) -> Result<globset::GlobSet> {
    use eyre::WrapErr;

    let mut builder = globset::GlobSetBuilder::new();
    for pattern in patterns {
        let glob = globset::Glob::new(&pattern.replace('\\', "/"))
            .wrap_err_with(|| format!("Invalid glob: {pattern}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

#[cfg(feature = "walk")]
impl Sources for WalkSources {
    fn harvest(self) -> Result<Harvest> {
        let files = self.discover()?;
        let harvest = harvest_paths(files);

        tracing::info!(
            root = %self.root.display(),
            files = harvest.files_scanned,
            names = harvest.vocabulary.len(),
            warnings = harvest.warnings.len(),
            "harvested node display names"
        );

        Ok(harvest)
    }
}

#[cfg(feature = "walk")]
impl VocabularySource for WalkSources {
    fn load(&self) -> Result<Vocabulary> {
        let harvest = self.clone().harvest()?;
        for warning in &harvest.warnings {
            tracing::warn!("{}", warning);
        }
        Ok(harvest.vocabulary)
    }
}
