//! Loosely typed spin input, as read from JSON or YAML files.
//!
//! A document is an object with a string `template` and optional `placeholders`
//! and `markers` objects:
//!
//! ```json
//! {
//!   "template": "Hello, {Joe|Jane|~name~}!",
//!   "placeholders": { "name": "Andy" },
//!   "markers": { "open": "{", "close": "}", "separator": "|", "placeholder": "~" }
//! }
//! ```
//!
//! Shape errors are reported as [`SpinError::InvalidInput`] naming the field.

use super::engine::Spinner;
use super::error::{Result, SpinError};
use super::markers::{json_kind, MarkerSet};
use super::placeholders::PlaceholderTable;
use serde_json::Value;

const DOCUMENT_KEYS: [&str; 3] = ["template", "placeholders", "markers"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinDocument {
    pub template: String,
    pub placeholders: PlaceholderTable,
    /// `None` when the document leaves marker choice to the caller.
    pub markers: Option<MarkerSet>,
}

impl SpinDocument {
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            SpinError::invalid(
                "document",
                format!("expected an object, found {}", json_kind(value)),
            )
        })?;

        if let Some(key) = object.keys().find(|key| !DOCUMENT_KEYS.contains(&key.as_str())) {
            return Err(SpinError::invalid("document", format!("unknown key `{}`", key)));
        }

        let template = match object.get("template") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => {
                return Err(SpinError::invalid(
                    "template",
                    format!("expected a string, found {}", json_kind(other)),
                ))
            }
            None => return Err(SpinError::invalid("template", "missing")),
        };

        let placeholders = match object.get("placeholders") {
            Some(value) => PlaceholderTable::from_json_value(value)?,
            None => PlaceholderTable::new(),
        };

        let markers = match object.get("markers") {
            Some(value) => Some(MarkerSet::from_json_value(value)?),
            None => None,
        };

        Ok(SpinDocument {
            template,
            placeholders,
            markers,
        })
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| SpinError::invalid("document", e.to_string()))?;
        Self::from_json_value(&value)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(source)
            .map_err(|e| SpinError::invalid("document", e.to_string()))?;
        Self::from_json_value(&value)
    }

    pub fn into_spinner(self) -> Spinner {
        Spinner::from_parts(
            self.template,
            self.placeholders,
            self.markers.unwrap_or_default(),
        )
    }
}
