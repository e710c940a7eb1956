//! Targets seen through the generator of the directory that owns them.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::core::{SourceFile, Target, TargetKind};
use crate::generator::local::LocalGenerator;

/// A target bound to its owning directory's generator context.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorTarget<'g> {
    local: LocalGenerator<'g>,
    target: &'g Target,
}

impl<'g> GeneratorTarget<'g> {
    pub fn new(local: LocalGenerator<'g>, target: &'g Target) -> Self {
        GeneratorTarget { local, target }
    }

    pub fn local(&self) -> LocalGenerator<'g> {
        self.local
    }

    pub fn target(&self) -> &'g Target {
        self.target
    }

    pub fn name(&self) -> &'g str {
        &self.target.name
    }

    pub fn kind(&self) -> TargetKind {
        self.target.kind
    }

    pub fn is_imported(&self) -> bool {
        self.target.imported
    }

    /// Source files compiled in the given build type.
    pub fn source_files(&self, config: &str) -> Vec<&'g SourceFile> {
        self.target
            .sources
            .iter()
            .filter(|source| source.is_in_configuration(config))
            .collect()
    }

    /// Full path of the artifact produced for `config`.
    ///
    /// Returns an empty string for targets without an artifact and
    /// `<name>-NOTFOUND` for imported targets with no known location.
    pub fn location(&self, config: &str) -> String {
        if self.target.imported {
            return match self.target.explicit_location(config) {
                Some(location) => location.to_string(),
                None => format!("{}-NOTFOUND", self.target.name),
            };
        }

        let Some(variable) = self.target.kind.artifact_variable() else {
            return String::new();
        };

        if let Some(location) = self.target.explicit_location(config) {
            return location.to_string();
        }

        let dir = self
            .target
            .output_directory
            .as_deref()
            .unwrap_or_else(|| self.local.current_binary_dir());
        let prefix = self.local.safe_definition(&format!("{}_PREFIX", variable));
        let suffix = self.local.safe_definition(&format!("{}_SUFFIX", variable));

        dir.join(format!(
            "{}{}{}",
            prefix,
            self.target.artifact_base_name(),
            suffix
        ))
        .to_string_lossy()
        .into_owned()
    }

    /// Directly linked targets known to the graph.
    ///
    /// Names that do not resolve to a target (system libraries, raw flags)
    /// are skipped.
    pub fn direct_dependencies(&self) -> Vec<GeneratorTarget<'g>> {
        self.target
            .dependencies
            .iter()
            .filter_map(|name| self.local.find_generator_target(name))
            .collect()
    }

    /// All targets reachable through dependencies, nearest first.
    pub fn linked_closure(&self) -> Vec<GeneratorTarget<'g>> {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(self.name());

        let mut closure = Vec::new();
        let mut queue = self.direct_dependencies();
        let mut next = 0;

        while next < queue.len() {
            let dep = queue[next];
            next += 1;
            if !seen.insert(dep.name()) {
                continue;
            }
            closure.push(dep);
            queue.extend(dep.direct_dependencies());
        }

        closure
    }

    /// Include directories for compiling this target, in search order.
    ///
    /// Directory-wide directories come first, then the target's own, then
    /// the interface directories of every linked target. Duplicates keep
    /// their first position.
    pub fn include_directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        let linked = self.linked_closure();

        let candidates = self
            .local
            .directory()
            .include_directories
            .iter()
            .chain(self.target.include_directories.iter())
            .chain(self.target.interface_include_directories.iter())
            .chain(
                linked
                    .iter()
                    .flat_map(|dep| dep.target.interface_include_directories.iter()),
            );

        for dir in candidates {
            if !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }

        dirs
    }

    /// Preprocessor definitions for compiling this target.
    pub fn compile_definitions(&self) -> Vec<String> {
        let mut defines: Vec<String> = Vec::new();
        let linked = self.linked_closure();

        let candidates = self
            .target
            .compile_definitions
            .iter()
            .chain(self.target.interface_compile_definitions.iter())
            .chain(
                linked
                    .iter()
                    .flat_map(|dep| dep.target.interface_compile_definitions.iter()),
            );

        for define in candidates {
            if !defines.contains(define) {
                defines.push(define.clone());
            }
        }

        defines
    }

    /// Whether objects of this target are built position independent.
    pub fn is_position_independent(&self) -> bool {
        self.target.position_independent_code.unwrap_or(matches!(
            self.target.kind,
            TargetKind::SharedLibrary | TargetKind::ModuleLibrary
        ))
    }
}
