//! Test fixtures for common test scenarios.
//!
//! The Android project fixture mirrors what an NDK toolchain file configures:
//! C and C++ executables linking an object library and a shared library
//! from a subdirectory, plus one imported prebuilt library.

use std::path::{Path, PathBuf};

use crate::core::GRAPH_FILE_NAME;

/// Graph description of the Android project fixture.
///
/// `@ROOT@` is replaced by the project root and `@GENERATOR@` by the
/// generator name.
pub const ANDROID_GRAPH: &str = r#"generator = "@GENERATOR@"
home_source_dir = '@ROOT@/src'
home_output_dir = '@ROOT@/build'

[cache]
CMAKE_BUILD_TYPE = "Debug"
CMAKE_ANDROID_ARCH_ABI = "x86"
CMAKE_COMMAND = "/usr/bin/cmake"
CMAKE_C_COMPILER = "/ndk/bin/clang"
CMAKE_CXX_COMPILER = "/ndk/bin/clang++"
CMAKE_C_COMPILER_TARGET = "i686-none-linux-android21"
CMAKE_CXX_COMPILER_TARGET = "i686-none-linux-android21"
CMAKE_C_COMPILE_OPTIONS_TARGET = "--target="
CMAKE_CXX_COMPILE_OPTIONS_TARGET = "--target="
CMAKE_C_COMPILE_OPTIONS_PIC = "-fPIC"
CMAKE_CXX_COMPILE_OPTIONS_PIC = "-fPIC"
CMAKE_C_COMPILE_OBJECT = "<CMAKE_C_COMPILER> <DEFINES> <INCLUDES> <FLAGS> -o <OBJECT> -c <SOURCE>"
CMAKE_CXX_COMPILE_OBJECT = "<CMAKE_CXX_COMPILER> <DEFINES> <INCLUDES> <FLAGS> -o <OBJECT> -c <SOURCE>"
CMAKE_C_FLAGS = "-DC_FLAGS"
CMAKE_C_FLAGS_DEBUG = "-DC_DEBUG_FLAGS"
CMAKE_CXX_FLAGS = "-DCXX_FLAGS"
CMAKE_CXX_FLAGS_DEBUG = "-DCXX_DEBUG_FLAGS"
CMAKE_SHARED_LIBRARY_PREFIX = "lib"
CMAKE_SHARED_LIBRARY_SUFFIX = ".so"

[[directories]]
source_dir = "."
binary_dir = "."
include_directories = ["shared"]

[[directories.targets]]
name = "cpp_exe"
kind = "executable"
compile_definitions = ["DEFINITION"]
dependencies = ["cpp_object", "cpp_shared", "log"]
sources = [{ path = "main.cpp" }, { path = "exe.cpp" }, { path = "exe.h" }]

[[directories.targets]]
name = "cpp_object"
kind = "object"
sources = [{ path = "object.cpp" }]

[[directories.targets]]
name = "c_exe"
kind = "executable"
compile_definitions = ["DEFINITION"]
dependencies = ["c_object", "c_shared"]
sources = [{ path = "main.c" }, { path = "exe.c" }]

[[directories.targets]]
name = "c_object"
kind = "object"
sources = [{ path = "object.c" }]

[[directories.imported_targets]]
name = "imported"
kind = "shared"
location = "/fake/location/libimported.so"

[[directories]]
source_dir = "shared"
binary_dir = "shared"

[[directories.targets]]
name = "cpp_shared"
kind = "shared"
interface_compile_definitions = ["USING_SHARED"]
sources = [{ path = "shared.cpp" }]

[[directories.targets]]
name = "c_shared"
kind = "shared"
sources = [{ path = "shared.c" }]
"#;

/// Render [`ANDROID_GRAPH`] for a project rooted at `root`.
pub fn android_graph(root: &Path, generator: &str) -> String {
    ANDROID_GRAPH
        .replace("@ROOT@", &root.to_string_lossy())
        .replace("@GENERATOR@", generator)
}

/// Write the Android project fixture below `root`.
///
/// Creates the output directory and returns the path of the graph file.
pub fn android_project(root: &Path, generator: &str) -> PathBuf {
    std::fs::create_dir_all(root.join("build")).expect("failed to create build dir");

    let path = root.join(GRAPH_FILE_NAME);
    std::fs::write(&path, android_graph(root, generator)).expect("failed to write graph");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildGraph;
    use tempfile::TempDir;

    #[test]
    fn test_android_project_loads() {
        let tmp = TempDir::new().unwrap();
        let path = android_project(tmp.path(), "Ninja");

        let graph = BuildGraph::load(&path).unwrap();
        assert_eq!(graph.directories.len(), 2);
        assert_eq!(graph.target_count(), 7);
        assert_eq!(graph.home_output_dir, tmp.path().join("build"));
        assert!(graph.home_output_dir.is_dir());
    }
}
