//! Per-directory generator context.

use std::path::Path;

use crate::core::{BuildGraph, Directory, GeneratorKind, GraphError, Target};
use crate::generator::target::GeneratorTarget;
use crate::util::shell::escape_for_shell;

/// Variable holding the active build type.
pub const BUILD_TYPE_VAR: &str = "CMAKE_BUILD_TYPE";

/// Variable holding the Android ABI.
pub const ANDROID_ABI_VAR: &str = "CMAKE_ANDROID_ARCH_ABI";

/// Older spelling of [`ANDROID_ABI_VAR`] set by NDK toolchain files.
pub const LEGACY_ANDROID_ABI_VAR: &str = "ANDROID_ABI";

/// A directory of the build graph seen through its generator.
///
/// Definition lookups fall back from the directory to the graph cache.
#[derive(Debug, Clone, Copy)]
pub struct LocalGenerator<'g> {
    graph: &'g BuildGraph,
    directory: &'g Directory,
}

impl<'g> LocalGenerator<'g> {
    /// Create the generator context for one directory of `graph`.
    pub fn new(graph: &'g BuildGraph, directory: &'g Directory) -> Self {
        LocalGenerator { graph, directory }
    }

    /// Generator contexts for every directory, in registration order.
    pub fn all(graph: &'g BuildGraph) -> impl Iterator<Item = LocalGenerator<'g>> {
        graph
            .directories
            .iter()
            .map(move |directory| LocalGenerator::new(graph, directory))
    }

    pub fn graph(&self) -> &'g BuildGraph {
        self.graph
    }

    pub fn directory(&self) -> &'g Directory {
        self.directory
    }

    pub fn generator(&self) -> &'g GeneratorKind {
        &self.graph.generator
    }

    /// Look up a definition.
    pub fn definition(&self, name: &str) -> Option<&'g str> {
        self.directory
            .definitions
            .get(name)
            .or_else(|| self.graph.cache.get(name))
    }

    /// Look up a definition, treating unset as empty.
    pub fn safe_definition(&self, name: &str) -> &'g str {
        self.definition(name).unwrap_or("")
    }

    /// Look up a definition that must be set.
    pub fn required_definition(&self, name: &str) -> Result<&'g str, GraphError> {
        self.definition(name)
            .ok_or_else(|| GraphError::MissingDefinition {
                name: name.to_string(),
                directory: self.directory.source_dir.clone(),
            })
    }

    /// The active build type (may be empty).
    pub fn config_name(&self) -> &'g str {
        self.safe_definition(BUILD_TYPE_VAR)
    }

    /// The Android ABI being built (may be empty).
    pub fn android_abi(&self) -> &'g str {
        self.definition(ANDROID_ABI_VAR)
            .filter(|abi| !abi.is_empty())
            .unwrap_or_else(|| self.safe_definition(LEGACY_ANDROID_ABI_VAR))
    }

    pub fn home_output_dir(&self) -> &'g Path {
        &self.graph.home_output_dir
    }

    pub fn current_source_dir(&self) -> &'g Path {
        &self.directory.source_dir
    }

    pub fn current_binary_dir(&self) -> &'g Path {
        &self.directory.binary_dir
    }

    /// Targets of this directory: built targets, then imported ones.
    pub fn targets(&self) -> impl Iterator<Item = GeneratorTarget<'g>> {
        let local = *self;
        self.directory
            .all_targets()
            .map(move |target| GeneratorTarget::new(local, target))
    }

    /// Wrap a target owned by this directory.
    pub fn generator_target(&self, target: &'g Target) -> GeneratorTarget<'g> {
        GeneratorTarget::new(*self, target)
    }

    /// Find a target anywhere in the graph, in the context of its owner.
    pub fn find_generator_target(&self, name: &str) -> Option<GeneratorTarget<'g>> {
        self.graph.find_target(name).map(|(directory, target)| {
            GeneratorTarget::new(LocalGenerator::new(self.graph, directory), target)
        })
    }

    /// Render a define list as compiler flags for `language`.
    pub fn join_defines(&self, defines: &[String], language: &str) -> String {
        let flag = self
            .definition(&format!("CMAKE_{}_DEFINE_FLAG", language))
            .filter(|f| !f.is_empty())
            .unwrap_or("-D");

        defines
            .iter()
            .map(|define| escape_for_shell(&format!("{}{}", flag, define)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Append a `;`-separated definition list, skipping duplicates.
///
/// Insertion order is kept: definitions appended first stay first.
pub fn append_defines(defines: &mut Vec<String>, list: &str) {
    for define in list.split(';').map(str::trim).filter(|d| !d.is_empty()) {
        if !defines.iter().any(|d| d == define) {
            defines.push(define.to_string());
        }
    }
}
