//! The four syntax markers that drive scanning and placeholder lookup.
//!
//! A [`MarkerSet`] is validated once and never mutated afterwards. Replacing the
//! markers on an engine means building a new set and swapping it in whole, so a
//! rejected update can never leave an engine with a half-applied configuration.
//!
//! The set can be built from:
//! - four strings ([`MarkerSet::new`])
//! - a string-keyed map with exactly the keys `open`, `close`, `separator`, `placeholder`
//! - a JSON object of the same shape
//! - serde, through [`MarkerSpec`]

use super::error::{Result, SpinError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_OPEN: &str = "{";
pub const DEFAULT_CLOSE: &str = "}";
pub const DEFAULT_SEPARATOR: &str = "|";
pub const DEFAULT_PLACEHOLDER: &str = "~";

const MARKER_KEYS: [&str; 4] = ["open", "close", "separator", "placeholder"];

/// Raw, unvalidated marker strings as they appear in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerSpec {
    pub open: String,
    pub close: String,
    pub separator: String,
    pub placeholder: String,
}

impl Default for MarkerSpec {
    fn default() -> Self {
        MarkerSpec {
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Validated marker set.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "MarkerSpec", into = "MarkerSpec")]
pub struct MarkerSet {
    spec: MarkerSpec,
    /// `placeholder` + one or more non-placeholder chars + `placeholder`
    reference_pattern: Regex,
}

impl MarkerSet {
    pub fn new(
        open: impl Into<String>,
        close: impl Into<String>,
        separator: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Result<Self> {
        Self::from_spec(MarkerSpec {
            open: open.into(),
            close: close.into(),
            separator: separator.into(),
            placeholder: placeholder.into(),
        })
    }

    pub fn from_spec(spec: MarkerSpec) -> Result<Self> {
        for (key, value) in MARKER_KEYS.iter().zip(spec.values()) {
            if value.is_empty() {
                return Err(SpinError::invalid(
                    "markers",
                    format!("marker `{}` must not be empty", key),
                ));
            }
        }
        let reference_pattern = compile_reference_pattern(&spec.placeholder)?;
        Ok(MarkerSet {
            spec,
            reference_pattern,
        })
    }

    /// Build from a string-keyed map holding exactly the four marker keys.
    pub fn from_map<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let unknown: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|key| !MARKER_KEYS.contains(key))
            .collect();
        if !unknown.is_empty() {
            return Err(SpinError::invalid(
                "markers",
                format!("unknown key(s) {}", quote_keys(&unknown)),
            ));
        }

        let missing: Vec<&str> = MARKER_KEYS
            .iter()
            .copied()
            .filter(|key| !map.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(SpinError::invalid(
                "markers",
                format!("missing key(s) {}", quote_keys(&missing)),
            ));
        }

        let mut take = |key: &str| map.remove(key).unwrap_or_default();
        Self::from_spec(MarkerSpec {
            open: take("open"),
            close: take("close"),
            separator: take("separator"),
            placeholder: take("placeholder"),
        })
    }

    /// Build from a loosely typed JSON value (an object of four strings).
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            SpinError::invalid(
                "markers",
                format!("expected an object, found {}", json_kind(value)),
            )
        })?;
        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            let text = value.as_str().ok_or_else(|| {
                SpinError::invalid(
                    "markers",
                    format!("marker `{}` must be a string, found {}", key, json_kind(value)),
                )
            })?;
            entries.push((key.clone(), text.to_string()));
        }
        Self::from_map(entries)
    }

    pub fn open(&self) -> &str {
        &self.spec.open
    }

    pub fn close(&self) -> &str {
        &self.spec.close
    }

    pub fn separator(&self) -> &str {
        &self.spec.separator
    }

    pub fn placeholder(&self) -> &str {
        &self.spec.placeholder
    }

    pub fn spec(&self) -> &MarkerSpec {
        &self.spec
    }

    /// The delimited form of a placeholder name, e.g. `~name~`.
    pub fn reference(&self, name: &str) -> String {
        format!("{}{}{}", self.spec.placeholder, name, self.spec.placeholder)
    }

    pub(crate) fn reference_pattern(&self) -> &Regex {
        &self.reference_pattern
    }
}

impl MarkerSpec {
    fn values(&self) -> [&str; 4] {
        [&self.open, &self.close, &self.separator, &self.placeholder]
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        let reference_pattern = compile_reference_pattern(DEFAULT_PLACEHOLDER)
            .expect("default placeholder pattern compiles");
        MarkerSet {
            spec: MarkerSpec::default(),
            reference_pattern,
        }
    }
}

impl PartialEq for MarkerSet {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl Eq for MarkerSet {}

impl fmt::Debug for MarkerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerSet")
            .field("open", &self.spec.open)
            .field("close", &self.spec.close)
            .field("separator", &self.spec.separator)
            .field("placeholder", &self.spec.placeholder)
            .finish()
    }
}

impl TryFrom<MarkerSpec> for MarkerSet {
    type Error = SpinError;

    fn try_from(spec: MarkerSpec) -> Result<Self> {
        MarkerSet::from_spec(spec)
    }
}

impl From<MarkerSet> for MarkerSpec {
    fn from(markers: MarkerSet) -> Self {
        markers.spec
    }
}

fn compile_reference_pattern(placeholder: &str) -> Result<Regex> {
    // Escaped class members are literal, so a multi-char marker excludes each of its chars.
    let delimiter = regex::escape(placeholder);
    let pattern = format!("{delimiter}([^{delimiter}]+){delimiter}");
    Regex::new(&pattern).map_err(|e| {
        SpinError::invalid(
            "markers",
            format!("placeholder marker `{}` is not usable: {}", placeholder, e),
        )
    })
}

fn quote_keys(keys: &[&str]) -> String {
    keys.iter()
        .map(|key| format!("`{}`", key))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
