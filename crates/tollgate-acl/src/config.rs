//! Engine configuration.
//!
//! The two fallback knobs of the engine, loadable from TOML:
//!
//! ```toml
//! default_action = "deny"
//! no_arguments_default_action = "deny"
//! ```
//!
//! Missing keys take their defaults, so an empty file is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::error::{Error, Result};

/// Default actions applied when rules cannot decide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Applied when no rule matches.
    pub default_action: Effect,
    /// Applied when a matching rule's predicate lacks arguments.
    pub no_arguments_default_action: Effect,
}

impl AclConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded ACL config from {}", path.display());
        Ok(config)
    }

    /// Serializes the config to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
