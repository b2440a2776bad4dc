//! Layered configuration for the textspin binary.
//!
//! `defaults/textspin.default.toml` is embedded so that the documented defaults
//! and the runtime behavior stay in sync. User files and single-key overrides are
//! layered on top via [`Loader`] before deserializing into [`SpinConfig`].

use crate::spin::{MarkerSet, MarkerSpec, SpinError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/textspin.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct SpinConfig {
    pub markers: MarkerSpec,
    pub spin: SpinOptions,
}

/// Defaults for the `spin` and `validate` commands.
#[derive(Debug, Clone, Deserialize)]
pub struct SpinOptions {
    pub substitute: bool,
    pub check_placeholders: bool,
    pub strict: bool,
    pub count: usize,
}

impl SpinConfig {
    pub fn marker_set(&self) -> Result<MarkerSet, SpinError> {
        MarkerSet::from_spec(self.markers.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override a single dotted key, e.g. `markers.open`. Applied after every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SpinConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<SpinConfig, ConfigError> {
    Loader::new().build()
}
