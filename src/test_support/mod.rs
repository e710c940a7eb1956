//! Test utilities for agbuild unit tests.
//!
//! [`GraphBuilder`] assembles in-memory build graphs rooted at `/src` and
//! `/build`; the fixtures write complete graph descriptions to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use agbuild::test_support::GraphBuilder;
//!
//! let graph = GraphBuilder::ninja()
//!     .cache("CMAKE_BUILD_TYPE", "Debug")
//!     .directory("", |dir| dir.targets.push(Target::executable("app")))
//!     .build();
//! ```

pub mod fixtures;

use std::path::Path;

use crate::core::{BuildGraph, Directory, GeneratorKind};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Builder for in-memory build graphs.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    graph: BuildGraph,
}

impl GraphBuilder {
    /// Create a builder for a graph configured with `generator`.
    pub fn new(generator: GeneratorKind) -> Self {
        GraphBuilder {
            graph: BuildGraph::new(generator, "/src", "/build"),
        }
    }

    pub fn ninja() -> Self {
        Self::new(GeneratorKind::Ninja)
    }

    pub fn makefiles() -> Self {
        Self::new(GeneratorKind::UnixMakefiles)
    }

    /// Set a graph-wide definition.
    pub fn cache(mut self, name: &str, value: &str) -> Self {
        self.graph.cache.set(name, value);
        self
    }

    /// Add a directory at `relative` below the home directories.
    ///
    /// An empty path adds the top-level directory.
    pub fn directory(mut self, relative: &str, configure: impl FnOnce(&mut Directory)) -> Self {
        let (source_dir, binary_dir) = if relative.is_empty() {
            (
                self.graph.home_source_dir.clone(),
                self.graph.home_output_dir.clone(),
            )
        } else {
            (
                self.graph.home_source_dir.join(Path::new(relative)),
                self.graph.home_output_dir.join(Path::new(relative)),
            )
        };

        let mut directory = Directory::new(source_dir, binary_dir);
        configure(&mut directory);
        self.graph.directories.push(directory);
        self
    }

    /// Finish the graph, panicking if it is invalid.
    pub fn build(self) -> BuildGraph {
        if let Err(e) = self.graph.validate() {
            panic!("invalid test graph: {}", e);
        }
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Target;
    use std::path::PathBuf;

    #[test]
    fn test_graph_builder_directories() {
        let graph = GraphBuilder::makefiles()
            .cache("CMAKE_BUILD_TYPE", "Debug")
            .directory("", |dir| dir.targets.push(Target::executable("app")))
            .directory("lib/sub", |_| {})
            .build();

        assert_eq!(graph.generator, GeneratorKind::UnixMakefiles);
        assert_eq!(graph.directories[0].binary_dir, PathBuf::from("/build"));
        assert_eq!(graph.directories[1].source_dir, PathBuf::from("/src/lib/sub"));
        assert_eq!(graph.cache.get("CMAKE_BUILD_TYPE"), Some("Debug"));
    }

    #[test]
    #[should_panic(expected = "invalid test graph")]
    fn test_graph_builder_rejects_duplicates() {
        GraphBuilder::ninja()
            .directory("", |dir| {
                dir.targets.push(Target::executable("app"));
                dir.targets.push(Target::executable("app"));
            })
            .build();
    }
}
