//! Compile-rule expansion.
//!
//! [`RuleExpander`] replays the per-language compile rule of a target for a
//! single source file and returns the flags part of the resulting command:
//! everything except the compiler executable, `-c`, `-o` and the object and
//! source paths together with the switches that introduce them.
//!
//! Flags the compiler is always invoked with (`CMAKE_<LANG>_COMPILER_ARG1`,
//! `--target=`, `--sysroot=`) are bound to the compiler token and are kept;
//! only the executable itself is dropped.

mod expand;
mod template;

pub use expand::{render, Marker, Part, Piece};
pub use template::{Positional, RuleTemplate, RuleToken, Segment};

use crate::core::{GraphError, SourceFile};
use crate::generator::{append_defines, GeneratorTarget, LocalGenerator, TargetFlags};
use crate::util::shell::convert_to_output_path;

/// Expands compile rules for the sources of one target.
#[derive(Debug)]
pub struct RuleExpander<'g> {
    target: GeneratorTarget<'g>,
    config: &'g str,
    flags: TargetFlags<'g>,
}

impl<'g> RuleExpander<'g> {
    /// Expander for `target` in the build type of its own directory.
    pub fn new(target: GeneratorTarget<'g>) -> Self {
        let config = target.local().config_name();
        RuleExpander {
            target,
            config,
            flags: TargetFlags::new(target, config),
        }
    }

    pub fn target(&self) -> GeneratorTarget<'g> {
        self.target
    }

    /// Compile flags for `source`.
    ///
    /// Fails if the directory defines no compile rule for the source's
    /// language.
    pub fn expand(&mut self, source: &SourceFile) -> Result<String, GraphError> {
        let language = source.language();
        let local = self.target.local();
        let rule = local.required_definition(&format!("CMAKE_{}_COMPILE_OBJECT", language))?;
        let template = RuleTemplate::parse(rule).strip_per_object();

        let payloads = Payloads::for_source(local, source, language, self.config);
        let pieces: Vec<Piece> = template
            .tokens()
            .iter()
            .flat_map(|token| expand_token(self.target, token, language, &payloads))
            .collect();

        Ok(render(&pieces, self.flags.get(language)))
    }
}

/// Substitutions for `<FLAGS>`, `<DEFINES>` and `<INCLUDES>`.
struct Payloads {
    flags: Vec<Part>,
    defines: Vec<Part>,
    includes: Vec<Part>,
}

impl Payloads {
    fn for_source(local: LocalGenerator<'_>, source: &SourceFile, language: &str, config: &str) -> Self {
        let mut flags = vec![Part::Marker(Marker::Flags)];
        if let Some(compile_flags) = source.property("COMPILE_FLAGS") {
            flags.push(Part::Gap);
            flags.push(Part::text(compile_flags));
        }

        let mut defines = Vec::new();
        if let Some(list) = source.property("COMPILE_DEFINITIONS") {
            append_defines(&mut defines, list);
        }
        if !config.is_empty() {
            let name = format!("COMPILE_DEFINITIONS_{}", config.to_uppercase());
            if let Some(list) = source.property(&name) {
                append_defines(&mut defines, list);
            }
        }

        Payloads {
            flags,
            defines: vec![
                Part::Marker(Marker::Defines),
                Part::Gap,
                Part::text(local.join_defines(&defines, language)),
            ],
            includes: vec![Part::Marker(Marker::Includes)],
        }
    }
}

fn expand_token(
    target: GeneratorTarget<'_>,
    token: &RuleToken,
    language: &str,
    payloads: &Payloads,
) -> Vec<Piece> {
    match token {
        RuleToken::Positional(Positional::Compiler(compiler_language)) => {
            compiler_pieces(target.local(), compiler_language)
        }
        RuleToken::Positional(_) => Vec::new(),
        RuleToken::Word(segments) => vec![Piece::Parts(
            segments
                .iter()
                .flat_map(|segment| expand_segment(target, segment, language, payloads))
                .collect(),
        )],
    }
}

fn expand_segment(
    target: GeneratorTarget<'_>,
    segment: &Segment,
    language: &str,
    payloads: &Payloads,
) -> Vec<Part> {
    let local = target.local();

    match segment {
        Segment::Text(text) => vec![Part::text(text.as_str())],
        Segment::Var(name) => match name.as_str() {
            "FLAGS" => payloads.flags.clone(),
            "DEFINES" => payloads.defines.clone(),
            "INCLUDES" => payloads.includes.clone(),
            "TARGET_NAME" => vec![Part::text(target.name())],
            "LANGUAGE_COMPILE_FLAGS" => Vec::new(),
            _ if is_compiler_variable(name) => {
                vec![Part::text(convert_to_output_path(local.safe_definition(name)))]
            }
            _ if name.starts_with("CMAKE_") => match local.definition(name) {
                Some(value) => vec![Part::text(value)],
                None => vec![Part::text(format!("<{}>", name))],
            },
            _ => vec![Part::text(format!("<{}>", name))],
        },
        Segment::MakeVar(name) => match Marker::for_make_var(name, language) {
            Some(marker) => vec![Part::Marker(marker)],
            None => vec![Part::text(format!("$({})", name))],
        },
    }
}

fn is_compiler_variable(name: &str) -> bool {
    name.strip_prefix("CMAKE_")
        .and_then(|rest| rest.strip_suffix("_COMPILER"))
        .is_some_and(|language| !language.is_empty())
}

/// The compiler executable followed by the flags bound to it.
fn compiler_pieces(local: LocalGenerator<'_>, language: &str) -> Vec<Piece> {
    let var = |suffix: &str| local.safe_definition(&format!("CMAKE_{}_{}", language, suffix));
    let mut bound = Vec::new();
    let mut bind = |text: String| {
        if !text.is_empty() {
            bound.push(Part::Gap);
            bound.push(Part::Text(text));
        }
    };

    bind(var("COMPILER_ARG1").to_string());

    let triple = var("COMPILER_TARGET");
    if !triple.is_empty() {
        bind(prefixed(var("COMPILE_OPTIONS_TARGET"), triple.to_string()));
    }

    let toolchain = var("COMPILER_EXTERNAL_TOOLCHAIN");
    if !toolchain.is_empty() {
        bind(prefixed(
            var("COMPILE_OPTIONS_EXTERNAL_TOOLCHAIN"),
            convert_to_output_path(toolchain),
        ));
    }

    let sysroot = local.safe_definition("CMAKE_SYSROOT");
    if !sysroot.is_empty() {
        bind(prefixed(
            var("COMPILE_OPTIONS_SYSROOT"),
            convert_to_output_path(sysroot),
        ));
    }

    vec![
        Piece::Executable(convert_to_output_path(var("COMPILER"))),
        Piece::Parts(bound),
    ]
}

/// `option` followed by `value`; nothing when the option is not defined.
fn prefixed(option: &str, value: String) -> String {
    if option.is_empty() {
        String::new()
    } else {
        format!("{}{}", option, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuildGraph, SourceFile, Target};
    use crate::test_support::GraphBuilder;

    const NINJA_RULE: &str = "<CMAKE_CXX_COMPILER> <DEFINES> <INCLUDES> <FLAGS> -o <OBJECT> -c <SOURCE>";

    fn graph(rule: &str) -> BuildGraph {
        GraphBuilder::ninja()
            .cache("CMAKE_BUILD_TYPE", "Debug")
            .cache("CMAKE_CXX_COMPILER", "/ndk/bin/clang++")
            .cache("CMAKE_CXX_COMPILE_OBJECT", rule)
            .cache("CMAKE_CXX_FLAGS", "-DCXX_FLAGS")
            .cache("CMAKE_CXX_FLAGS_DEBUG", "-DCXX_DEBUG_FLAGS")
            .cache("CMAKE_CXX_COMPILER_TARGET", "x86_64-none-linux-android21")
            .cache("CMAKE_CXX_COMPILE_OPTIONS_TARGET", "--target=")
            .cache("CMAKE_SYSROOT", "/ndk/sysroot")
            .cache("CMAKE_CXX_COMPILE_OPTIONS_SYSROOT", "--sysroot=")
            .directory("", |dir| {
                dir.include_directories.push("/src/shared".into());
                let mut app = Target::executable("app");
                app.compile_definitions.push("DEFINITION".to_string());
                dir.targets.push(app);
            })
            .build()
    }

    fn expand(graph: &BuildGraph, source: &SourceFile) -> Result<String, GraphError> {
        let target = LocalGenerator::new(graph, &graph.directories[0])
            .find_generator_target("app")
            .unwrap();
        RuleExpander::new(target).expand(source)
    }

    #[test]
    fn test_expand_keeps_bound_compiler_flags() {
        let graph = graph(NINJA_RULE);
        let flags = expand(&graph, &SourceFile::new("/src/main.cpp")).unwrap();

        assert_eq!(
            flags,
            "--target=x86_64-none-linux-android21 --sysroot=/ndk/sysroot \
             -DDEFINITION -I/src/shared -DCXX_FLAGS -DCXX_DEBUG_FLAGS"
        );
    }

    #[test]
    fn test_expand_strips_invocation_and_positionals() {
        let graph = graph(NINJA_RULE);
        let flags = expand(&graph, &SourceFile::new("/src/main.cpp")).unwrap();

        assert!(!flags.starts_with("/ndk/bin/clang++"));
        assert!(!flags.contains("clang++"));
        assert!(!flags.contains("<OBJECT>"));
        assert!(!flags.contains("<SOURCE>"));
        assert!(!flags.contains("main.cpp"));
        assert!(!flags.split(' ').any(|word| word == "-c" || word == "-o"));
    }

    #[test]
    fn test_expand_source_properties() {
        let graph = graph(NINJA_RULE);
        let source = SourceFile::new("/src/main.cpp")
            .with_property("COMPILE_FLAGS", "-Wextra")
            .with_property("COMPILE_DEFINITIONS", "LOCAL;SHARED")
            .with_property("COMPILE_DEFINITIONS_DEBUG", "SHARED;DEBUG_ONLY")
            .with_property("COMPILE_DEFINITIONS_RELEASE", "RELEASE_ONLY");

        let flags = expand(&graph, &source).unwrap();
        assert_eq!(
            flags,
            "--target=x86_64-none-linux-android21 --sysroot=/ndk/sysroot \
             -DDEFINITION -DLOCAL -DSHARED -DDEBUG_ONLY -I/src/shared \
             -DCXX_FLAGS -DCXX_DEBUG_FLAGS -Wextra"
        );
    }

    #[test]
    fn test_expand_make_style_rule() {
        let graph = graph(
            "<CMAKE_CXX_COMPILER> $(CXX_DEFINES) $(CXX_INCLUDES) $(CXX_FLAGS) \
             -MD -MT <OBJECT> -MF <DEP_FILE> -o <OBJECT> -c <SOURCE>",
        );
        let flags = expand(&graph, &SourceFile::new("/src/main.cpp")).unwrap();

        assert_eq!(
            flags,
            "--target=x86_64-none-linux-android21 --sysroot=/ndk/sysroot \
             -DDEFINITION -I/src/shared -DCXX_FLAGS -DCXX_DEBUG_FLAGS -MD"
        );
    }

    #[test]
    fn test_expand_definitions_and_unknown_variables() {
        let graph = graph("<CMAKE_CXX_COMPILER> <FLAGS> -fdebug-prefix-map=<CMAKE_SYSROOT>=. $(UNKNOWN) <TARGET_NAME> -c <SOURCE>");
        let flags = expand(&graph, &SourceFile::new("/src/main.cpp")).unwrap();

        assert!(flags.ends_with(
            "-DCXX_FLAGS -DCXX_DEBUG_FLAGS -fdebug-prefix-map=/ndk/sysroot=. $(UNKNOWN) app"
        ));
    }

    #[test]
    fn test_resolved_payloads_are_not_reexpanded() {
        let graph = GraphBuilder::ninja()
            .cache("CMAKE_C_COMPILE_OBJECT", "<CMAKE_C_COMPILER> <FLAGS> -c <SOURCE>")
            .cache("CMAKE_C_FLAGS", "-DLITERAL=<FLAGS>")
            .directory("", |dir| dir.targets.push(Target::executable("app")))
            .build();

        let flags = expand(&graph, &SourceFile::new("/src/main.c")).unwrap();
        assert_eq!(flags, "-DLITERAL=<FLAGS>");
    }

    #[test]
    fn test_expand_missing_rule() {
        let graph = graph(NINJA_RULE);
        let err = expand(&graph, &SourceFile::new("/src/main.c")).unwrap_err();
        assert!(matches!(
            err,
            GraphError::MissingDefinition { ref name, .. } if name == "CMAKE_C_COMPILE_OBJECT"
        ));
    }
}
