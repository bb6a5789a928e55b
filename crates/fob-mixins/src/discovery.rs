//! File-based config discovery for CLI use.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::MixinOptions;
use crate::error::ConfigError;

pub const TOML_CONFIG: &str = "fob-mixins.toml";
pub const JSON_CONFIG: &str = "fob-mixins.json";
pub const PACKAGE_JSON_FIELD: &str = "vueMixins";

/// Searches a project root for mixin configuration.
///
/// # Example
///
/// ```no_run
/// use fob_mixins::ConfigDiscovery;
///
/// let options = ConfigDiscovery::new(".").load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `fob-mixins.toml`
    /// 2. `fob-mixins.json`
    /// 3. `package.json` with a `vueMixins` field
    pub fn find(&self) -> Option<PathBuf> {
        for name in [TOML_CONFIG, JSON_CONFIG] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load options from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<MixinOptions, ConfigError> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.join(TOML_CONFIG)))?;
        load_from(&path)
    }
}

/// Loads options from an explicit path, including `package.json`.
pub fn load_from(path: &Path) -> Result<MixinOptions, ConfigError> {
    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        return load_from_package_json(path);
    }
    MixinOptions::from_file(path)
}

fn load_from_package_json(path: &Path) -> Result<MixinOptions, ConfigError> {
    let content = fs::read_to_string(path)?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {}", e)),
    })?;

    match parsed.get(PACKAGE_JSON_FIELD) {
        Some(value) if !value.is_null() => MixinOptions::from_value(value.clone()),
        _ => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some(format!(
                "Add a '{}' field to your package.json",
                PACKAGE_JSON_FIELD
            )),
        }),
    }
}
