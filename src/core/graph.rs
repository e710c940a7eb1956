//! The configured build graph.
//!
//! A BuildGraph is the finished result of configuring a project: every
//! directory with its definitions and targets, plus the generator that
//! writes the native build files. It is described by a `build-graph.toml`
//! file and is read-only once loaded.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::definitions::Definitions;
use crate::core::errors::GraphError;
use crate::core::target::Target;

/// Canonical graph description file name.
pub const GRAPH_FILE_NAME: &str = "build-graph.toml";

/// Build description file of every directory.
pub const BUILD_FILE_NAME: &str = "CMakeLists.txt";

/// The native build-file generator the graph was configured for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeneratorKind {
    /// Per-directory Makefiles
    UnixMakefiles,
    /// Single build.ninja compiled from the top-level output directory
    Ninja,
    /// Any other generator, by name
    Other(String),
}

impl GeneratorKind {
    /// Generator display name.
    pub fn name(&self) -> &str {
        match self {
            GeneratorKind::UnixMakefiles => "Unix Makefiles",
            GeneratorKind::Ninja => "Ninja",
            GeneratorKind::Other(name) => name,
        }
    }

    /// Whether all compile commands run from the top-level output directory.
    pub fn is_single_root(&self) -> bool {
        matches!(self, GeneratorKind::Ninja)
    }

    /// Whether the Android Gradle export supports this generator.
    pub fn is_supported(&self) -> bool {
        matches!(self, GeneratorKind::UnixMakefiles | GeneratorKind::Ninja)
    }
}

impl From<String> for GeneratorKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Unix Makefiles" => GeneratorKind::UnixMakefiles,
            "Ninja" => GeneratorKind::Ninja,
            _ => GeneratorKind::Other(name),
        }
    }
}

impl From<GeneratorKind> for String {
    fn from(kind: GeneratorKind) -> Self {
        kind.name().to_string()
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One configured directory of the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directory {
    /// Directory holding the build description
    pub source_dir: PathBuf,

    /// Directory the generator writes this directory's build files to
    pub binary_dir: PathBuf,

    /// Directory-scoped definitions (override the graph cache)
    #[serde(default)]
    pub definitions: Definitions,

    /// Include directories applied to every target of the directory
    #[serde(default)]
    pub include_directories: Vec<PathBuf>,

    /// Targets built by this directory, in declaration order
    #[serde(default)]
    pub targets: Vec<Target>,

    /// Pre-built targets imported by this directory
    #[serde(default)]
    pub imported_targets: Vec<Target>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new(source_dir: impl Into<PathBuf>, binary_dir: impl Into<PathBuf>) -> Self {
        Directory {
            source_dir: source_dir.into(),
            binary_dir: binary_dir.into(),
            definitions: Definitions::new(),
            include_directories: Vec::new(),
            targets: Vec::new(),
            imported_targets: Vec::new(),
        }
    }

    /// Path of the directory's build description file.
    pub fn build_file(&self) -> PathBuf {
        self.source_dir.join(BUILD_FILE_NAME)
    }

    /// Built targets followed by imported targets.
    pub fn all_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().chain(self.imported_targets.iter())
    }
}

/// A fully configured build graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildGraph {
    /// Native generator the graph was configured for
    pub generator: GeneratorKind,

    /// Top-level source directory
    pub home_source_dir: PathBuf,

    /// Top-level output directory
    pub home_output_dir: PathBuf,

    /// Graph-wide definitions
    #[serde(default)]
    pub cache: Definitions,

    /// Configured directories in registration order (top-level first)
    #[serde(default)]
    pub directories: Vec<Directory>,
}

impl BuildGraph {
    /// Create an empty graph.
    pub fn new(
        generator: GeneratorKind,
        home_source_dir: impl Into<PathBuf>,
        home_output_dir: impl Into<PathBuf>,
    ) -> Self {
        BuildGraph {
            generator,
            home_source_dir: home_source_dir.into(),
            home_output_dir: home_output_dir.into(),
            cache: Definitions::new(),
            directories: Vec::new(),
        }
    }

    /// Load a graph description file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build graph: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load build graph: {}", path.display()))
    }

    /// Parse, normalize and validate a graph description.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut graph: BuildGraph =
            toml::from_str(contents).context("invalid build graph description")?;
        graph.normalize();
        graph.validate()?;
        Ok(graph)
    }

    /// Anchor relative paths and flag imported targets.
    ///
    /// Directory paths are relative to the home directories; source and
    /// include paths are relative to their directory's source directory.
    pub fn normalize(&mut self) {
        for directory in &mut self.directories {
            directory.source_dir = anchor(&self.home_source_dir, &directory.source_dir);
            directory.binary_dir = anchor(&self.home_output_dir, &directory.binary_dir);

            let source_dir = directory.source_dir.clone();
            for include in &mut directory.include_directories {
                *include = anchor(&source_dir, include);
            }

            for target in &mut directory.imported_targets {
                target.imported = true;
            }

            for target in directory
                .targets
                .iter_mut()
                .chain(directory.imported_targets.iter_mut())
            {
                for source in &mut target.sources {
                    source.path = anchor(&source_dir, &source.path);
                }
                for include in target
                    .include_directories
                    .iter_mut()
                    .chain(target.interface_include_directories.iter_mut())
                {
                    *include = anchor(&source_dir, include);
                }
            }
        }
    }

    /// Check graph-wide invariants.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::new();

        for directory in &self.directories {
            if let Some(target) = directory.targets.iter().find(|t| t.imported) {
                return Err(GraphError::ImportedInTargets {
                    name: target.name.clone(),
                    directory: directory.source_dir.clone(),
                });
            }

            for target in directory.all_targets() {
                if !seen.insert(target.name.as_str()) {
                    return Err(GraphError::DuplicateTarget {
                        name: target.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The top-level directory, if any directory was configured.
    pub fn top_level(&self) -> Option<&Directory> {
        self.directories.first()
    }

    /// Find a target by name, together with the directory that owns it.
    pub fn find_target(&self, name: &str) -> Option<(&Directory, &Target)> {
        self.directories.iter().find_map(|directory| {
            directory
                .all_targets()
                .find(|target| target.name == name)
                .map(|target| (directory, target))
        })
    }

    /// Total number of targets (built and imported).
    pub fn target_count(&self) -> usize {
        self.directories
            .iter()
            .map(|d| d.targets.len() + d.imported_targets.len())
            .sum()
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Find the graph description file starting from `start` and searching upward.
pub fn find_graph_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(GRAPH_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
