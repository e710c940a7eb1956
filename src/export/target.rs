use std::collections::HashSet;

use crate::core::{is_not_found, GraphError, TargetKind};
use crate::export::context::ExportContext;
use crate::export::model::{NativeLibrary, NativeSourceFile};
use crate::export::source::SourceExporter;
use crate::generator::GeneratorTarget;

/// Exports targets as `libraries` entries.
#[derive(Debug, Clone, Copy)]
pub struct TargetExporter<'a> {
    ctx: &'a ExportContext,
    toolchain: &'a str,
}

impl<'a> TargetExporter<'a> {
    pub fn new(ctx: &'a ExportContext, toolchain: &'a str) -> Self {
        TargetExporter { ctx, toolchain }
    }

    /// The library record of `target`.
    ///
    /// Targets without a standalone artifact and targets whose artifact
    /// location is unknown are omitted.
    pub fn export(&self, target: GeneratorTarget<'_>) -> Result<Option<NativeLibrary>, GraphError> {
        if !target.kind().is_linkable_artifact() {
            tracing::debug!("`{}` ({}) has no standalone artifact", target.name(), target.kind());
            return Ok(None);
        }

        let output = target.location(&self.ctx.build_type);
        if output.is_empty() || is_not_found(&output) {
            tracing::debug!("`{}` has no known output location, not exported", target.name());
            return Ok(None);
        }

        let (build_command, files) = if target.is_imported() {
            (None, Vec::new())
        } else {
            (
                Some(self.ctx.build_command(target.name())),
                self.export_files(target)?,
            )
        };

        Ok(Some(NativeLibrary {
            abi: self.ctx.abi_field(),
            artifact_name: target.name().to_string(),
            build_command,
            build_type: self.ctx.build_type_field(),
            output,
            toolchain: self.toolchain.to_string(),
            files,
        }))
    }

    /// Sources of `target`, followed by those of the object libraries it
    /// links directly.
    ///
    /// Object library sources keep the context of the object library's own
    /// directory. Object libraries linked through another object library are
    /// not followed, imported ones are never compiled, and each one is
    /// folded in once.
    pub fn export_files(
        &self,
        target: GeneratorTarget<'_>,
    ) -> Result<Vec<NativeSourceFile>, GraphError> {
        let mut files = Vec::new();
        export_sources_of(target, &mut files)?;

        let mut folded: HashSet<&str> = HashSet::new();
        for dep in target.direct_dependencies() {
            if dep.kind() != TargetKind::ObjectLibrary || dep.is_imported() {
                continue;
            }
            if !folded.insert(dep.name()) {
                continue;
            }
            tracing::debug!("folding object library `{}` into `{}`", dep.name(), target.name());
            export_sources_of(dep, &mut files)?;
        }

        Ok(files)
    }
}

/// Export the sources `target` compiles in its own directory's build type.
fn export_sources_of(
    target: GeneratorTarget<'_>,
    files: &mut Vec<NativeSourceFile>,
) -> Result<(), GraphError> {
    let mut exporter = SourceExporter::new(target);
    for source in target.source_files(target.local().config_name()) {
        if let Some(file) = exporter.export(source)? {
            files.push(file);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuildGraph, SourceFile, Target};
    use crate::generator::LocalGenerator;
    use crate::test_support::GraphBuilder;

    const RULE: &str = "<CMAKE_CXX_COMPILER> <DEFINES> <FLAGS> -o <OBJECT> -c <SOURCE>";

    fn graph() -> BuildGraph {
        GraphBuilder::makefiles()
            .cache("CMAKE_BUILD_TYPE", "Debug")
            .cache("CMAKE_ANDROID_ARCH_ABI", "x86")
            .cache("CMAKE_COMMAND", "/usr/bin/cmake")
            .cache("CMAKE_CXX_COMPILE_OBJECT", RULE)
            .cache("CMAKE_SHARED_LIBRARY_PREFIX", "lib")
            .cache("CMAKE_SHARED_LIBRARY_SUFFIX", ".so")
            .directory("", |dir| {
                dir.targets.push(
                    Target::executable("app")
                        .with_sources([
                            SourceFile::new("/src/main.cpp"),
                            SourceFile::new("/src/notes.txt"),
                        ])
                        .with_dependencies(["objs", "shared", "log"]),
                );
                dir.imported_targets.push(
                    Target::imported("imported", TargetKind::SharedLibrary)
                        .with_location("/fake/location/libimported.so"),
                );
                dir.imported_targets
                    .push(Target::imported("missing", TargetKind::SharedLibrary));
            })
            .directory("objs", |dir| {
                let mut objs = Target::new("objs", TargetKind::ObjectLibrary)
                    .with_sources([SourceFile::new("/src/objs/object.cpp")])
                    .with_dependencies(["inner"]);
                objs.compile_definitions.push("IN_OBJS".to_string());
                dir.targets.push(objs);

                dir.targets.push(
                    Target::new("inner", TargetKind::ObjectLibrary)
                        .with_sources([SourceFile::new("/src/objs/inner.cpp")]),
                );
                dir.targets.push(
                    Target::new("shared", TargetKind::SharedLibrary)
                        .with_sources([SourceFile::new("/src/objs/shared.cpp")]),
                );
            })
            .build()
    }

    fn export(graph: &BuildGraph, name: &str) -> Option<NativeLibrary> {
        let local = LocalGenerator::new(graph, &graph.directories[0]);
        let ctx = ExportContext::for_directory(local);
        let target = local.find_generator_target(name).unwrap();
        TargetExporter::new(&ctx, "toolchain-id").export(target).unwrap()
    }

    #[test]
    fn test_export_built_target() {
        let graph = graph();
        let app = export(&graph, "app").unwrap();

        assert_eq!(app.artifact_name, "app");
        assert_eq!(app.abi.as_deref(), Some("x86"));
        assert_eq!(app.build_type.as_deref(), Some("debug"));
        assert_eq!(
            app.build_command.as_deref(),
            Some("/usr/bin/cmake --build /build --target app")
        );
        assert_eq!(app.output, "/build/app");
        assert_eq!(app.toolchain, "toolchain-id");
    }

    #[test]
    fn test_object_library_sources_are_folded_one_hop() {
        let graph = graph();
        let app = export(&graph, "app").unwrap();

        let srcs: Vec<_> = app.files.iter().map(|f| f.src.as_str()).collect();
        assert_eq!(srcs, vec!["/src/main.cpp", "/src/objs/object.cpp"]);

        let object = &app.files[1];
        assert_eq!(object.working_directory, "/build/objs");
        assert_eq!(object.flags, "-DIN_OBJS");
        assert_eq!(app.files[0].working_directory, "/build");
    }

    fn file_srcs(graph: &BuildGraph, name: &str) -> Vec<String> {
        let local = LocalGenerator::new(graph, &graph.directories[0]);
        let ctx = ExportContext::for_directory(local);
        let target = local.find_generator_target(name).unwrap();
        TargetExporter::new(&ctx, "toolchain-id")
            .export_files(target)
            .unwrap()
            .into_iter()
            .map(|f| f.src)
            .collect()
    }

    #[test]
    fn test_repeated_object_library_is_folded_once() {
        let graph = GraphBuilder::ninja()
            .cache("CMAKE_CXX_COMPILE_OBJECT", RULE)
            .directory("", |dir| {
                dir.targets.push(
                    Target::executable("app")
                        .with_sources([SourceFile::new("/src/main.cpp")])
                        .with_dependencies(["objs", "objs"]),
                );
                dir.targets.push(
                    Target::new("objs", TargetKind::ObjectLibrary)
                        .with_sources([SourceFile::new("/src/o.cpp")]),
                );
            })
            .build();

        assert_eq!(file_srcs(&graph, "app"), vec!["/src/main.cpp", "/src/o.cpp"]);
    }

    #[test]
    fn test_imported_object_library_is_not_folded() {
        let graph = GraphBuilder::ninja()
            .cache("CMAKE_CXX_COMPILE_OBJECT", RULE)
            .directory("", |dir| {
                dir.targets.push(
                    Target::executable("app")
                        .with_sources([SourceFile::new("/src/main.cpp")])
                        .with_dependencies(["prebuilt_objs"]),
                );
                dir.imported_targets.push(
                    Target::imported("prebuilt_objs", TargetKind::ObjectLibrary)
                        .with_sources([SourceFile::new("/src/prebuilt.cpp")]),
                );
            })
            .build();

        assert_eq!(file_srcs(&graph, "app"), vec!["/src/main.cpp"]);
    }

    #[test]
    fn test_object_library_sources_use_their_own_build_type() {
        let graph = GraphBuilder::makefiles()
            .cache("CMAKE_BUILD_TYPE", "Debug")
            .cache("CMAKE_CXX_COMPILE_OBJECT", RULE)
            .directory("", |dir| {
                dir.targets.push(
                    Target::executable("app")
                        .with_sources([SourceFile::new("/src/main.cpp")])
                        .with_dependencies(["objs"]),
                );
            })
            .directory("objs", |dir| {
                dir.definitions.set("CMAKE_BUILD_TYPE", "Release");
                dir.targets.push(
                    Target::new("objs", TargetKind::ObjectLibrary).with_sources([
                        SourceFile {
                            configurations: vec!["Release".to_string()],
                            ..SourceFile::new("/src/objs/rel.cpp")
                        },
                        SourceFile {
                            configurations: vec!["Debug".to_string()],
                            ..SourceFile::new("/src/objs/dbg.cpp")
                        },
                    ]),
                );
            })
            .build();

        assert_eq!(
            file_srcs(&graph, "app"),
            vec!["/src/main.cpp", "/src/objs/rel.cpp"]
        );
    }

    #[test]
    fn test_imported_targets() {
        let graph = graph();

        let imported = export(&graph, "imported").unwrap();
        assert_eq!(imported.output, "/fake/location/libimported.so");
        assert!(imported.build_command.is_none());
        assert!(imported.files.is_empty());

        assert!(export(&graph, "missing").is_none());
    }

    #[test]
    fn test_object_library_is_not_a_library() {
        let graph = graph();
        assert!(export(&graph, "objs").is_none());
    }
}
