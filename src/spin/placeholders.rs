//! Insertion-ordered table of placeholder values.
//!
//! Names are stored without their delimiters. Iteration follows insertion
//! order, which is also the order substitution applies entries in.

use super::error::{Result, SpinError};
use super::markers::json_kind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderTable {
    entries: IndexMap<String, String>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserting an existing name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build from a loosely typed JSON value, which must be an object of strings.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            SpinError::invalid(
                "placeholders",
                format!("expected an object, found {}", json_kind(value)),
            )
        })?;
        object
            .iter()
            .map(|(name, value)| match value.as_str() {
                Some(text) => Ok((name.clone(), text.to_string())),
                None => Err(SpinError::invalid(
                    "placeholders",
                    format!(
                        "value of `{}` must be a string, found {}",
                        name,
                        json_kind(value)
                    ),
                )),
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PlaceholderTable {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<IndexMap<String, String>> for PlaceholderTable {
    fn from(entries: IndexMap<String, String>) -> Self {
        PlaceholderTable { entries }
    }
}
