//! Build graph error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised by the build graph when it is queried or validated.
///
/// These are configuration errors: they abort the whole run rather than
/// a single target.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("required variable `{name}` is not defined (directory `{}`)", directory.display())]
    MissingDefinition { name: String, directory: PathBuf },

    #[error("target `{name}` is defined more than once")]
    DuplicateTarget { name: String },

    #[error("imported target `{name}` is listed with the targets built by `{}`", directory.display())]
    ImportedInTargets { name: String, directory: PathBuf },

    #[error("target `{name}` not found")]
    TargetNotFound { name: String },
}
