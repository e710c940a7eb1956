//! Target definitions - the buildable units of a build graph.
//!
//! A Target is an executable or a library declared by one directory. Targets
//! are only read here; nothing in this crate mutates them after loading.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::source::SourceFile;

/// The kind of target being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Executable binary
    #[serde(alias = "exe", alias = "bin")]
    Executable,

    /// Static library (.a)
    #[serde(alias = "static", alias = "staticlib")]
    StaticLibrary,

    /// Shared library (.so)
    #[serde(alias = "shared", alias = "sharedlib")]
    SharedLibrary,

    /// Loadable module (.so, never linked against)
    #[serde(alias = "module")]
    ModuleLibrary,

    /// Compiled objects only, consumed by the targets that link them
    #[serde(alias = "object")]
    ObjectLibrary,

    /// Custom commands with no compiled output
    Utility,

    /// Usage requirements only
    Interface,
}

impl TargetKind {
    /// Whether the target produces a standalone, linkable artifact.
    pub fn is_linkable_artifact(&self) -> bool {
        match self {
            TargetKind::Executable
            | TargetKind::StaticLibrary
            | TargetKind::SharedLibrary
            | TargetKind::ModuleLibrary => true,
            TargetKind::ObjectLibrary | TargetKind::Utility | TargetKind::Interface => false,
        }
    }

    /// Whether the target takes part in an export at all.
    ///
    /// Object libraries are visited (their extensions are collected and their
    /// sources are folded into dependents) but never produce a library entry.
    pub fn is_exportable(&self) -> bool {
        self.is_linkable_artifact() || *self == TargetKind::ObjectLibrary
    }

    /// Definition prefix used for the artifact prefix/suffix variables.
    pub(crate) fn artifact_variable(&self) -> Option<&'static str> {
        match self {
            TargetKind::Executable => Some("CMAKE_EXECUTABLE"),
            TargetKind::StaticLibrary => Some("CMAKE_STATIC_LIBRARY"),
            TargetKind::SharedLibrary => Some("CMAKE_SHARED_LIBRARY"),
            TargetKind::ModuleLibrary => Some("CMAKE_SHARED_MODULE"),
            TargetKind::ObjectLibrary | TargetKind::Utility | TargetKind::Interface => None,
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TargetKind::Executable => "executable",
            TargetKind::StaticLibrary => "static library",
            TargetKind::SharedLibrary => "shared library",
            TargetKind::ModuleLibrary => "module library",
            TargetKind::ObjectLibrary => "object library",
            TargetKind::Utility => "utility",
            TargetKind::Interface => "interface library",
        };
        f.write_str(name)
    }
}

/// A target with its configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Target name, unique across the graph
    pub name: String,

    /// What kind of artifact the target produces
    pub kind: TargetKind,

    /// Pre-built artifact consumed but not compiled by the project
    #[serde(default)]
    pub imported: bool,

    /// Source files owned by the target
    #[serde(default)]
    pub sources: Vec<SourceFile>,

    /// Names of the targets this one links directly
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Private include directories
    #[serde(default)]
    pub include_directories: Vec<PathBuf>,

    /// Include directories propagated to dependents
    #[serde(default)]
    pub interface_include_directories: Vec<PathBuf>,

    /// Private preprocessor definitions (`NAME` or `NAME=VALUE`)
    #[serde(default)]
    pub compile_definitions: Vec<String>,

    /// Preprocessor definitions propagated to dependents
    #[serde(default)]
    pub interface_compile_definitions: Vec<String>,

    /// Extra compiler options
    #[serde(default)]
    pub compile_options: Vec<String>,

    /// Explicit position independent code setting
    #[serde(default)]
    pub position_independent_code: Option<bool>,

    /// Artifact base name, when different from the target name
    #[serde(default)]
    pub output_name: Option<String>,

    /// Directory the artifact is written to
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Artifact location for every configuration
    #[serde(default)]
    pub location: Option<String>,

    /// Artifact location per configuration (keys compared case-insensitively)
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
}

impl Target {
    /// Create a new target with the given name and kind.
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Target {
            name: name.into(),
            kind,
            imported: false,
            sources: Vec::new(),
            dependencies: Vec::new(),
            include_directories: Vec::new(),
            interface_include_directories: Vec::new(),
            compile_definitions: Vec::new(),
            interface_compile_definitions: Vec::new(),
            compile_options: Vec::new(),
            position_independent_code: None,
            output_name: None,
            output_directory: None,
            location: None,
            locations: BTreeMap::new(),
        }
    }

    /// Create a new executable target.
    pub fn executable(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::Executable)
    }

    /// Create a new imported target.
    pub fn imported(name: impl Into<String>, kind: TargetKind) -> Self {
        let mut target = Self::new(name, kind);
        target.imported = true;
        target
    }

    /// Add source files.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = SourceFile>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Add direct dependencies by name.
    pub fn with_dependencies(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the artifact location used for every configuration.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Explicit location for `config`, falling back to the unconfigured one.
    pub fn explicit_location(&self, config: &str) -> Option<&str> {
        self.locations
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(config))
            .map(|(_, value)| value.as_str())
            .or(self.location.as_deref())
    }

    /// Base name of the produced artifact.
    pub fn artifact_base_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exportable_kinds() {
        assert!(TargetKind::Executable.is_exportable());
        assert!(TargetKind::ModuleLibrary.is_exportable());
        assert!(TargetKind::ObjectLibrary.is_exportable());
        assert!(!TargetKind::ObjectLibrary.is_linkable_artifact());
        assert!(!TargetKind::Utility.is_exportable());
        assert!(!TargetKind::Interface.is_exportable());
    }

    #[test]
    fn test_kind_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: TargetKind,
        }

        let parsed: Wrapper = toml::from_str(r#"kind = "object""#).unwrap();
        assert_eq!(parsed.kind, TargetKind::ObjectLibrary);

        let parsed: Wrapper = toml::from_str(r#"kind = "shared_library""#).unwrap();
        assert_eq!(parsed.kind, TargetKind::SharedLibrary);
    }

    #[test]
    fn test_explicit_location_per_config() {
        let mut target = Target::imported("imported", TargetKind::SharedLibrary)
            .with_location("/fake/libimported.so");
        target
            .locations
            .insert("DEBUG".to_string(), "/fake/debug/libimported.so".to_string());

        assert_eq!(
            target.explicit_location("Debug"),
            Some("/fake/debug/libimported.so")
        );
        assert_eq!(
            target.explicit_location("Release"),
            Some("/fake/libimported.so")
        );
    }

    #[test]
    fn test_artifact_base_name() {
        let mut target = Target::executable("app");
        assert_eq!(target.artifact_base_name(), "app");
        target.output_name = Some("app-bin".to_string());
        assert_eq!(target.artifact_base_name(), "app-bin");
    }
}
