use std::path::PathBuf;

use crate::core::{is_native_language, GraphError, SourceFile};
use crate::export::model::NativeSourceFile;
use crate::generator::GeneratorTarget;
use crate::rule::RuleExpander;

/// Exports the sources of one target.
#[derive(Debug)]
pub struct SourceExporter<'g> {
    expander: RuleExpander<'g>,
    working_directory: PathBuf,
}

impl<'g> SourceExporter<'g> {
    /// Exporter for the sources owned by `target`.
    ///
    /// Ninja compiles every source from the top-level output directory; the
    /// Makefile generators compile from the owning directory's output
    /// directory.
    pub fn new(target: GeneratorTarget<'g>) -> Self {
        let local = target.local();
        let working_directory = if local.generator().is_single_root() {
            local.home_output_dir()
        } else {
            local.current_binary_dir()
        };

        SourceExporter {
            expander: RuleExpander::new(target),
            working_directory: working_directory.to_path_buf(),
        }
    }

    /// The exported record of `source`, or `None` for non C/C++ sources.
    pub fn export(&mut self, source: &SourceFile) -> Result<Option<NativeSourceFile>, GraphError> {
        if !is_native_language(source.language()) {
            tracing::debug!(
                "skipping `{}` of `{}`: language `{}` is not C or C++",
                source.full_path().display(),
                self.expander.target().name(),
                source.language()
            );
            return Ok(None);
        }

        Ok(Some(NativeSourceFile {
            src: source.full_path().to_string_lossy().into_owned(),
            working_directory: self.working_directory.to_string_lossy().into_owned(),
            flags: self.expander.expand(source)?,
        }))
    }
}
