//! Compile flags, defines and includes of a target.

use std::collections::HashMap;

use crate::core::TargetKind;
use crate::generator::target::GeneratorTarget;
use crate::util::shell::{append_flags, escape_for_shell, path_to_output};

/// The three real payloads substituted into a compile rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFlags {
    pub flags: String,
    pub defines: String,
    pub includes: String,
}

/// Lazily computed [`LanguageFlags`] of one target, cached per language.
#[derive(Debug)]
pub struct TargetFlags<'g> {
    target: GeneratorTarget<'g>,
    config: String,
    cache: HashMap<String, LanguageFlags>,
}

impl<'g> TargetFlags<'g> {
    pub fn new(target: GeneratorTarget<'g>, config: impl Into<String>) -> Self {
        TargetFlags {
            target,
            config: config.into(),
            cache: HashMap::new(),
        }
    }

    /// Flags for compiling `language` sources of the target.
    pub fn get(&mut self, language: &str) -> &LanguageFlags {
        let target = self.target;
        let config = self.config.as_str();
        self.cache
            .entry(language.to_string())
            .or_insert_with(|| LanguageFlags {
                flags: compile_flags(target, config, language),
                defines: target
                    .local()
                    .join_defines(&target.compile_definitions(), language),
                includes: include_flags(target, language),
            })
    }
}

fn compile_flags(target: GeneratorTarget<'_>, config: &str, language: &str) -> String {
    let local = target.local();
    let mut flags = String::new();

    append_flags(
        &mut flags,
        local.safe_definition(&format!("CMAKE_{}_FLAGS", language)),
    );
    if !config.is_empty() {
        append_flags(
            &mut flags,
            local.safe_definition(&format!(
                "CMAKE_{}_FLAGS_{}",
                language,
                config.to_uppercase()
            )),
        );
    }

    if target.is_position_independent() {
        let option = if target.kind() == TargetKind::Executable {
            "PIE"
        } else {
            "PIC"
        };
        append_flags(
            &mut flags,
            local.safe_definition(&format!("CMAKE_{}_COMPILE_OPTIONS_{}", language, option)),
        );
    }

    for option in &target.target().compile_options {
        append_flags(&mut flags, &escape_for_shell(option));
    }

    flags
}

fn include_flags(target: GeneratorTarget<'_>, language: &str) -> String {
    let flag = target
        .local()
        .definition(&format!("CMAKE_INCLUDE_FLAG_{}", language))
        .filter(|f| !f.is_empty())
        .unwrap_or("-I");

    target
        .include_directories()
        .iter()
        .map(|dir| format!("{}{}", flag, path_to_output(dir)))
        .collect::<Vec<_>>()
        .join(" ")
}
