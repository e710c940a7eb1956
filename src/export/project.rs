//! The top-level exporter.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::{BuildGraph, LANG_C, LANG_CXX};
use crate::export::context::ExportContext;
use crate::export::extensions::collect_extensions;
use crate::export::model::{NativeBuildConfig, NativeToolchain};
use crate::export::target::TargetExporter;
use crate::export::{ExportError, OUTPUT_FILE_NAME};
use crate::generator::LocalGenerator;
use crate::util::fs::GeneratedFile;
use crate::util::hash::short_id;

/// Exports a whole build graph to `android_gradle_build.json`.
#[derive(Debug, Clone, Copy)]
pub struct ProjectExporter<'g> {
    graph: &'g BuildGraph,
    pretty: bool,
}

impl<'g> ProjectExporter<'g> {
    pub fn new(graph: &'g BuildGraph) -> Self {
        ProjectExporter {
            graph,
            pretty: true,
        }
    }

    /// Pretty-print the JSON (the default).
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// `<home output dir>/android_gradle_build.json`
    pub fn output_path(&self) -> PathBuf {
        self.graph.home_output_dir.join(OUTPUT_FILE_NAME)
    }

    /// Build the document without writing it.
    ///
    /// Returns `None` when the graph has no configured directory.
    pub fn build(&self) -> Result<Option<NativeBuildConfig>, ExportError> {
        let Some(top) = self.graph.top_level() else {
            tracing::debug!("no configured directories, nothing to export");
            return Ok(None);
        };
        let top = LocalGenerator::new(self.graph, top);

        let (toolchain_id, toolchain) = toolchain(top);
        let mut config = NativeBuildConfig {
            clean_commands: vec![ExportContext::for_directory(top).clean_command()],
            ..NativeBuildConfig::default()
        };
        config.toolchains.insert(toolchain_id.clone(), toolchain);

        for local in LocalGenerator::all(self.graph) {
            config
                .build_files
                .push(local.directory().build_file().to_string_lossy().into_owned());

            let ctx = ExportContext::for_directory(local);
            let exporter = TargetExporter::new(&ctx, &toolchain_id);

            for target in local.targets() {
                if !target.kind().is_exportable() {
                    continue;
                }

                config
                    .c_file_extensions
                    .extend(collect_extensions(LANG_C, target, &ctx.build_type));
                config
                    .cpp_file_extensions
                    .extend(collect_extensions(LANG_CXX, target, &ctx.build_type));

                if let Some(library) = exporter.export(target)? {
                    config
                        .libraries
                        .insert(ctx.library_key(target.name()), library);
                }
            }
        }

        Ok(Some(config))
    }

    /// Write `config` to [`Self::output_path`].
    ///
    /// The file only appears once fully written. If it cannot be created the
    /// export is skipped and `None` is returned.
    pub fn write(&self, config: &NativeBuildConfig) -> Result<Option<PathBuf>, ExportError> {
        let path = self.output_path();
        let mut file = match GeneratedFile::create(&path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!("cannot create `{}`: {}", path.display(), e);
                return Ok(None);
            }
        };

        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(config)?
        } else {
            serde_json::to_vec(config)?
        };
        bytes.push(b'\n');

        write_document(&mut file, &bytes, &path)?;
        let written = file.commit().map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Wrote {}", written.display());
        Ok(Some(written))
    }

    /// Build and write the document.
    pub fn export(&self) -> Result<Option<PathBuf>, ExportError> {
        match self.build()? {
            Some(config) => self.write(&config),
            None => Ok(None),
        }
    }
}

/// The single toolchain of the project, keyed by a hash of its compilers.
fn toolchain(top: LocalGenerator<'_>) -> (String, NativeToolchain) {
    let compiler = |name: &str| top.definition(name).filter(|path| !path.is_empty());
    let c = compiler("CMAKE_C_COMPILER");
    let cxx = compiler("CMAKE_CXX_COMPILER");

    let id = short_id([c.unwrap_or(""), cxx.unwrap_or("")]);
    let toolchain = NativeToolchain {
        c_compiler_executable: c.map(str::to_string),
        cpp_compiler_executable: cxx.map(str::to_string),
    };
    (id, toolchain)
}

/// Write the serialized document, reporting failures against `path`.
fn write_document(out: &mut impl Write, bytes: &[u8], path: &Path) -> Result<(), ExportError> {
    out.write_all(bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
