//! agbuild - Android Gradle native build export
//!
//! This crate reads a configured build graph and writes the
//! `android_gradle_build.json` document that the Android Gradle plugin uses
//! to import native libraries: the artifact, build command and per-source
//! compile flags of every target.

pub mod core;
pub mod export;
pub mod generator;
pub mod ops;
pub mod rule;
pub mod util;

/// Test utilities for agbuild unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{BuildGraph, Target, TargetKind};
pub use crate::export::{ExportError, NativeBuildConfig, ProjectExporter};
pub use crate::util::context::GlobalContext;
