//! High-level operations.
//!
//! This module contains the implementation of agbuild commands.

pub mod agbuild_export;
pub mod inspect;

pub use agbuild_export::{export_project, ExportOptions, ExportOutcome};
pub use inspect::source_flags;
