//! Records of `android_gradle_build.json`.
//!
//! Field names follow the JSON schema read by the Android Gradle plugin.
//! Maps and sets are ordered so the same graph always serializes to the
//! same bytes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The whole exported document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeBuildConfig {
    pub build_files: Vec<String>,
    pub clean_commands: Vec<String>,
    pub toolchains: BTreeMap<String, NativeToolchain>,
    pub c_file_extensions: BTreeSet<String>,
    pub cpp_file_extensions: BTreeSet<String>,
    pub libraries: BTreeMap<String, NativeLibrary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeToolchain {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_compiler_executable: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpp_compiler_executable: Option<String>,
}

/// One target in one build type and ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeLibrary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<String>,

    /// Raw target name, never suffixed
    pub artifact_name: String,

    /// Absent for imported targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,

    /// Lower-cased build type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_type: Option<String>,

    pub output: String,

    /// Key into [`NativeBuildConfig::toolchains`]
    pub toolchain: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<NativeSourceFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeSourceFile {
    pub src: String,
    pub working_directory: String,
    pub flags: String,
}
