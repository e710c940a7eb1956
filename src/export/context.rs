//! Per-directory export settings.

use std::path::PathBuf;

use crate::core::GeneratorKind;
use crate::generator::LocalGenerator;
use crate::util::shell::{convert_to_output_path, path_to_output};

/// Variable holding the path of the `cmake` executable.
pub const CMAKE_COMMAND_VAR: &str = "CMAKE_COMMAND";

const DEFAULT_CMAKE_COMMAND: &str = "cmake";

/// Settings every exporter call of one directory shares.
///
/// Read once from the directory's definitions instead of being looked up
/// again for each target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    /// Active build type as configured (may be empty)
    pub build_type: String,
    /// Android ABI (may be empty)
    pub abi: String,
    pub home_output_dir: PathBuf,
    pub cmake_command: String,
    pub generator: GeneratorKind,
}

impl ExportContext {
    pub fn for_directory(local: LocalGenerator<'_>) -> Self {
        let cmake_command = local
            .definition(CMAKE_COMMAND_VAR)
            .filter(|command| !command.is_empty())
            .unwrap_or(DEFAULT_CMAKE_COMMAND);

        ExportContext {
            build_type: local.config_name().to_string(),
            abi: local.android_abi().to_string(),
            home_output_dir: local.home_output_dir().to_path_buf(),
            cmake_command: cmake_command.to_string(),
            generator: local.generator().clone(),
        }
    }

    /// Key of a target's entry in `libraries`: `<name>[-<build type>][-<abi>]`.
    pub fn library_key(&self, target_name: &str) -> String {
        let mut key = target_name.to_string();
        for suffix in [&self.build_type, &self.abi] {
            if !suffix.is_empty() {
                key.push('-');
                key.push_str(suffix);
            }
        }
        key
    }

    /// The `buildType` field: the lower-cased build type, if any.
    pub fn build_type_field(&self) -> Option<String> {
        (!self.build_type.is_empty()).then(|| self.build_type.to_lowercase())
    }

    /// The `abi` field, if any.
    pub fn abi_field(&self) -> Option<String> {
        (!self.abi.is_empty()).then(|| self.abi.clone())
    }

    /// Command building one target from the top-level output directory.
    pub fn build_command(&self, target_name: &str) -> String {
        format!(
            "{} --build {} --target {}",
            convert_to_output_path(&self.cmake_command),
            path_to_output(&self.home_output_dir),
            target_name
        )
    }

    pub fn clean_command(&self) -> String {
        self.build_command("clean")
    }
}
