//! Configuration loading
//!
//! `defaults/report-tree.default.toml` is embedded into the crate so the documented defaults and
//! runtime behavior stay in sync. Callers layer user files and single-key overrides on top via
//! [`Loader`] before deserializing into [`ReportConfig`].

use crate::formats::outline::{OutlineOptions, OutlineStyle};
use crate::persist::RecordFormat;
use crate::render::HtmlOptions;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/report-tree.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub outline: OutlineConfig,
    pub persistence: PersistenceConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutlineConfig {
    pub style: OutlineStyle,
    pub show_ids: bool,
}

impl OutlineConfig {
    pub fn options(&self) -> OutlineOptions {
        OutlineOptions {
            style: self.style,
            show_ids: self.show_ids,
            ..OutlineOptions::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    pub format: RecordFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub meta: String,
    pub head: String,
}

impl HtmlConfig {
    pub fn options(&self) -> HtmlOptions {
        HtmlOptions {
            meta: Some(self.meta.clone()).filter(|meta| !meta.is_empty()),
            head: self.head.clone(),
        }
    }
}

/// Layers user overrides over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. A missing file is an error at [`Loader::build`].
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file if it exists
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override a single key (e.g. from a CLI flag)
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ReportConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ReportConfig, ConfigError> {
    Loader::new().build()
}
