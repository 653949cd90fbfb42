//! Config loading from JSON5 files.
//!
//! Parses JSON5, checks the raw value against the schema so typos surface as
//! field errors instead of silently falling back to defaults, then decodes and
//! validates a `QrMemoryConfig`.

mod schema;

#[cfg(test)]
mod tests;

use crate::{ConfigError, MAX_QR_VERSION, QrMemoryConfig};
use directories::UserDirs;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename.
const DEFAULT_CONFIG_FILE: &str = "qrmemory.json5";
/// Default config directory under the home directory.
const DEFAULT_CONFIG_DIR: &str = ".qrmemory";
/// Highest zlib compression level.
const MAX_COMPRESSION_LEVEL: u32 = 9;

impl QrMemoryConfig {
    /// Load a config from a JSON5 file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value)
    }

    /// Load `~/.qrmemory/qrmemory.json5`, or defaults when it does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_path(path),
            Some(path) => {
                debug!("default config missing (path={})", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("home directory unavailable; using default config");
                Ok(Self::default())
            }
        }
    }

    /// Validate invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.payload.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(invalid(
                "payload.compression_level",
                format!("must be at most {MAX_COMPRESSION_LEVEL}"),
            ));
        }
        if let Some(version) = self.barcode.max_version {
            if !(1..=MAX_QR_VERSION).contains(&version) {
                return Err(invalid(
                    "barcode.max_version",
                    format!("must be between 1 and {MAX_QR_VERSION}"),
                ));
            }
        }
        if self.barcode.module_size == 0 {
            return Err(invalid("barcode.module_size", "must be positive"));
        }
        if self.degrade.summary_max_keys == 0 {
            return Err(invalid("degrade.summary_max_keys", "must be positive"));
        }
        if self.degrade.micro_max_keys == 0 {
            return Err(invalid("degrade.micro_max_keys", "must be positive"));
        }
        if self.degrade.micro_max_keys > self.degrade.summary_max_keys {
            return Err(invalid(
                "degrade.micro_max_keys",
                "must not exceed summary_max_keys",
            ));
        }
        Ok(())
    }
}

/// Default user config path under the home directory.
pub fn default_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE)
    })
}

fn config_from_value(value: Value) -> Result<QrMemoryConfig, ConfigError> {
    schema::validate_schema(&value, "config")?;
    let config: QrMemoryConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

fn invalid(path: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_string(),
        message: message.into(),
    }
}
