//! Core data structures for agbuild.
//!
//! This module contains the read-only build graph model:
//! - Definitions (variables visible to a directory)
//! - Directories with their targets
//! - Targets and their source files

pub mod definitions;
pub mod errors;
pub mod graph;
pub mod source;
pub mod target;

pub use definitions::{is_not_found, Definitions};
pub use errors::GraphError;
pub use graph::{
    find_graph_file, BuildGraph, Directory, GeneratorKind, BUILD_FILE_NAME, GRAPH_FILE_NAME,
};
pub use source::{is_native_language, SourceFile, LANG_C, LANG_CXX};
pub use target::{Target, TargetKind};
