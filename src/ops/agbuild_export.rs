//! Implementation of `agbuild export`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::BuildGraph;
use crate::export::ProjectExporter;

/// Options for the export command.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty-print the JSON
    pub pretty: bool,

    /// Skip instead of failing when the generator is not supported
    pub skip_unsupported_generators: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            pretty: true,
            skip_unsupported_generators: false,
        }
    }
}

/// What an export did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, libraries: usize },
    Skipped(String),
}

/// Export the graph described by `graph_path`.
pub fn export_project(graph_path: &Path, opts: &ExportOptions) -> Result<ExportOutcome> {
    let graph = BuildGraph::load(graph_path)?;

    if !graph.generator.is_supported() {
        if opts.skip_unsupported_generators {
            tracing::warn!(
                "generator `{}` is not supported, skipping export",
                graph.generator
            );
            return Ok(ExportOutcome::Skipped(format!(
                "generator `{}` is not supported",
                graph.generator
            )));
        }
        bail!(
            "generator `{}` is not supported by the Android Gradle export\n\
             help: configure with `Ninja` or `Unix Makefiles`, or set \
             `export.skip_unsupported_generators = true`",
            graph.generator
        );
    }

    tracing::debug!(
        "exporting {} targets in {} directories ({})",
        graph.target_count(),
        graph.directories.len(),
        graph.generator
    );

    let exporter = ProjectExporter::new(&graph).pretty(opts.pretty);
    let context = || format!("failed to export `{}`", graph_path.display());

    let Some(config) = exporter.build().with_context(context)? else {
        return Ok(ExportOutcome::Skipped(
            "the graph has no configured directories".to_string(),
        ));
    };

    match exporter.write(&config).with_context(context)? {
        Some(path) => Ok(ExportOutcome::Written {
            path,
            libraries: config.libraries.len(),
        }),
        None => Ok(ExportOutcome::Skipped(format!(
            "cannot create `{}`",
            exporter.output_path().display()
        ))),
    }
}
