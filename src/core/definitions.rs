//! Variable definitions visible to a directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A set of `NAME = value` definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definitions {
    vars: BTreeMap<String, String>,
}

impl Definitions {
    /// Create an empty set of definitions.
    pub fn new() -> Self {
        Definitions::default()
    }

    /// Define (or redefine) a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Check whether a variable is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterate over all definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Definitions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Definitions {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Check whether a value is a "not found" marker (`NOTFOUND` or `*-NOTFOUND`).
pub fn is_not_found(value: &str) -> bool {
    value == "NOTFOUND" || value.ends_with("-NOTFOUND")
}
