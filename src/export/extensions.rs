use std::collections::BTreeSet;

use crate::generator::GeneratorTarget;

/// Distinct extensions of the target's `language` sources in `config`.
///
/// Imported targets compile nothing and yield an empty set. The language
/// tag is compared exactly.
pub fn collect_extensions(
    language: &str,
    target: GeneratorTarget<'_>,
    config: &str,
) -> BTreeSet<String> {
    if target.is_imported() {
        return BTreeSet::new();
    }

    target
        .source_files(config)
        .into_iter()
        .filter(|source| source.language() == language)
        .map(|source| source.extension())
        .filter(|extension| !extension.is_empty())
        .map(str::to_string)
        .collect()
}
