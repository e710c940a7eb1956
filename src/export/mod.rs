//! Android Gradle native build export.
//!
//! Writes `android_gradle_build.json`, the description of native libraries
//! the Android Gradle plugin imports from an external build. The document
//! lists, for every linkable target, its artifact, the command building it
//! and the compile flags of each of its C and C++ sources:
//!
//! - [`ProjectExporter`] walks every directory and assembles the document
//! - [`TargetExporter`] turns one target into a library record, folding in
//!   the sources of the object libraries it links
//! - [`SourceExporter`] turns one source into a file record
//! - [`collect_extensions`] gathers the C and C++ file extensions

mod context;
mod extensions;
mod model;
mod project;
mod source;
mod target;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::GraphError;

pub use context::{ExportContext, CMAKE_COMMAND_VAR};
pub use extensions::collect_extensions;
pub use model::{NativeBuildConfig, NativeLibrary, NativeSourceFile, NativeToolchain};
pub use project::ProjectExporter;
pub use source::SourceExporter;
pub use target::TargetExporter;

/// File name of the exported document.
pub const OUTPUT_FILE_NAME: &str = "android_gradle_build.json";

/// Error that aborts an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to serialize the native build configuration")]
    Json(#[from] serde_json::Error),

    #[error("failed to write `{}`", path.display())]
    Io { path: PathBuf, source: io::Error },
}
