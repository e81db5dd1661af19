//! Deprecation warning configuration.

use crate::{DeprecationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable toggling warning output.
pub const ENV_WARNINGS: &str = "SUNSET_DEPRECATION_WARNINGS";
/// Environment variable selecting the sink.
pub const ENV_SINK: &str = "SUNSET_DEPRECATION_SINK";

/// Which warning channel the emitter writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// `tracing::warn!` under the `deprecation` target.
    #[default]
    Tracing,
    /// In-memory capture.
    Capture,
    /// Discard everything.
    #[serde(rename = "none")]
    Null,
}

impl SinkKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tracing" => Some(Self::Tracing),
            "capture" => Some(Self::Capture),
            "none" | "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// Configuration for the deprecation emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeprecationConfig {
    /// When false, notices are still tracked but never reach the sink.
    pub enabled: bool,
    /// Sink built by `Emitter::from_config`.
    pub sink: SinkKind,
    /// Whether the tracing sink logs the caller's file and line.
    pub include_location: bool,
}

impl Default for DeprecationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sink: SinkKind::Tracing,
            include_location: true,
        }
    }
}

impl DeprecationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `[deprecation]` section of a TOML document.
    ///
    /// A document without that section yields the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content.parse()?;

        match table.get("deprecation") {
            Some(section) => Ok(section.clone().try_into::<DeprecationConfig>()?),
            None => Ok(Self::default()),
        }
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize as a TOML document with a `[deprecation]` section.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut table = toml::Table::new();
        let section =
            toml::Value::try_from(self).map_err(|e| DeprecationError::Config(e.to_string()))?;
        table.insert("deprecation".to_string(), section);
        toml::to_string_pretty(&table).map_err(|e| DeprecationError::Config(e.to_string()))
    }

    /// Apply `SUNSET_DEPRECATION_*` overrides from the process environment.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unrecognised values are ignored.
    pub fn apply_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_WARNINGS) {
            match value.trim().to_lowercase().as_str() {
                "0" | "false" | "off" | "no" => self.enabled = false,
                "1" | "true" | "on" | "yes" => self.enabled = true,
                _ => {}
            }
        }

        if let Some(sink) = lookup(ENV_SINK).as_deref().and_then(SinkKind::parse) {
            self.sink = sink;
        }

        self
    }
}
