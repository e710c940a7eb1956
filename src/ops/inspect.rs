//! Implementation of `agbuild flags`.

use std::path::Path;

use anyhow::Result;

use crate::core::{BuildGraph, GraphError};
use crate::export::{ExportContext, NativeSourceFile, TargetExporter};
use crate::generator::LocalGenerator;

/// The exported source records of one target.
///
/// Includes the sources of object libraries the target links directly,
/// exactly as they appear in the target's `files` list.
pub fn source_flags(graph_path: &Path, target_name: &str) -> Result<Vec<NativeSourceFile>> {
    let graph = BuildGraph::load(graph_path)?;

    let (directory, target) =
        graph
            .find_target(target_name)
            .ok_or_else(|| GraphError::TargetNotFound {
                name: target_name.to_string(),
            })?;

    let local = LocalGenerator::new(&graph, directory);
    let ctx = ExportContext::for_directory(local);
    let files = TargetExporter::new(&ctx, "").export_files(local.generator_target(target))?;

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::android_project;
    use tempfile::TempDir;

    #[test]
    fn test_source_flags() {
        let tmp = TempDir::new().unwrap();
        let graph_path = android_project(tmp.path(), "Unix Makefiles");

        let files = source_flags(&graph_path, "cpp_exe").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| Path::new(&f.src).file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["main.cpp", "exe.cpp", "object.cpp"]);
        assert!(files[0].flags.contains("-DCXX_FLAGS"));
    }

    #[test]
    fn test_unknown_target() {
        let tmp = TempDir::new().unwrap();
        let graph_path = android_project(tmp.path(), "Ninja");

        let err = source_flags(&graph_path, "nope").unwrap_err();
        assert!(err.to_string().contains("target `nope` not found"));
    }
}
