//! User-facing mixin configuration.
//!
//! Paths here are still relative to the project root. [`RuleSet::resolve`]
//! turns them into the canonical form the matcher works with.
//!
//! [`RuleSet::resolve`]: crate::RuleSet::resolve

use std::fs;
use std::path::Path;

use figment::providers::{Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Ordered list of injection rules.
///
/// # Example
///
/// ```
/// use fob_mixins::MixinOptions;
/// use serde_json::json;
///
/// let options = MixinOptions::from_value(json!({
///     "rules": [{
///         "include": "src/pages/*.vue",
///         "mixins": ["build/mixins/page.js"]
///     }]
/// }))
/// .unwrap();
/// assert_eq!(options.rules.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixinOptions {
    #[serde(default)]
    pub rules: Vec<RuleOptions>,
}

/// A single rule as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOptions {
    /// Glob of component files to inject into
    #[serde(default)]
    pub include: Option<String>,

    /// Glob of files to leave alone even when `include` matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Mixin modules to inject, in order
    #[serde(default)]
    pub mixins: Vec<String>,
}

impl RuleOptions {
    pub fn new(include: impl Into<String>) -> Self {
        Self {
            include: Some(include.into()),
            ..Self::default()
        }
    }

    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn with_mixin(mut self, mixin: impl Into<String>) -> Self {
        self.mixins.push(mixin.into());
        self
    }
}

impl MixinOptions {
    pub fn new(rules: Vec<RuleOptions>) -> Self {
        Self { rules }
    }

    /// Builds options from a JSON value.
    ///
    /// Accepts either `{ "rules": [...] }` or a bare array of rules.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let value = match value {
            Value::Array(rules) => serde_json::json!({ "rules": rules }),
            other => other,
        };

        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "rules".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Loads options from a `.toml` or `.json` file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Figment::new().merge(Toml::file(path)).extract()?),
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let value: Value =
                    serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                        field: path.display().to_string(),
                        hint: Some(format!("Invalid JSON: {}", e)),
                    })?;
                Self::from_value(value)
            }
            _ => Err(ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: Some("Unsupported config format, expected .toml or .json".to_string()),
            }),
        }
    }
}
