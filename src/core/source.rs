//! Source files and their language tags.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Language tag of C sources.
pub const LANG_C: &str = "C";

/// Language tag of C++ sources.
pub const LANG_CXX: &str = "CXX";

/// Whether a language tag names a natively compiled language.
///
/// The comparison is exact: `"c"` or `"cxx"` are not native tags.
pub fn is_native_language(language: &str) -> bool {
    language == LANG_C || language == LANG_CXX
}

/// Infer a language tag from a file extension.
///
/// Note: `.C` (uppercase) is C++ on case-sensitive systems.
pub fn language_for_extension(extension: &str) -> &'static str {
    match extension {
        "c" => LANG_C,
        "cpp" | "cc" | "cxx" | "c++" | "C" | "CPP" | "CC" | "CXX" => LANG_CXX,
        _ => "",
    }
}

/// A source file owned by a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Full path to the file
    pub path: PathBuf,

    /// Language tag (`C`, `CXX`, ...); inferred from the extension when absent
    #[serde(default)]
    pub language: Option<String>,

    /// Per-file properties such as `COMPILE_FLAGS` or `COMPILE_DEFINITIONS`
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    /// Build types the file is part of (empty = all)
    #[serde(default)]
    pub configurations: Vec<String>,
}

impl SourceFile {
    /// Create a source with an inferred language.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceFile {
            path: path.into(),
            language: None,
            properties: BTreeMap::new(),
            configurations: Vec::new(),
        }
    }

    /// Set an explicit language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set a source property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// The full path of the file.
    pub fn full_path(&self) -> &Path {
        &self.path
    }

    /// The file extension without the leading dot.
    pub fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
    }

    /// The language tag, explicit or inferred.
    pub fn language(&self) -> &str {
        match &self.language {
            Some(language) => language,
            None => language_for_extension(self.extension()),
        }
    }

    /// Look up a source property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Whether the file is compiled in the given build type.
    pub fn is_in_configuration(&self, config: &str) -> bool {
        self.configurations.is_empty()
            || self
                .configurations
                .iter()
                .any(|c| c.eq_ignore_ascii_case(config))
    }
}
