//! Engine configuration via `arcade.toml`
//!
//! The host creates a default `arcade.toml` next to its other data on first
//! start. To change settings, edit the file and restart the host.

use arcade_core::{Error, Result};
use arcade_scoreboard::SharedOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name placed in the host's data directory.
pub const CONFIG_FILE_NAME: &str = "arcade.toml";

fn default_scoreboard_interval_ticks() -> u64 {
    20
}

fn default_auto_promote() -> bool {
    true
}

/// Engine configuration loaded from `arcade.toml`.
///
/// # Example
///
/// ```toml
/// scoreboard_interval_ticks = 20
/// auto_promote_on_moderator_leave = true
/// max_party_size = 8
///
/// [scoreboard]
/// name_tag_visibility = true
/// collision_rule = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ticks between periodic scoreboard re-renders.
    #[serde(default = "default_scoreboard_interval_ticks")]
    pub scoreboard_interval_ticks: u64,
    /// Promote the longest-standing member when the last moderator leaves.
    #[serde(default = "default_auto_promote")]
    pub auto_promote_on_moderator_leave: bool,
    /// Upper bound on party membership, unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_party_size: Option<usize>,
    /// Team options every new session's scoreboard starts with.
    #[serde(default)]
    pub scoreboard: SharedOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoreboard_interval_ticks: default_scoreboard_interval_ticks(),
            auto_promote_on_moderator_leave: default_auto_promote(),
            max_party_size: None,
            scoreboard: SharedOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Arcade engine configuration
#
# Ticks between periodic scoreboard re-renders (default: 20, one second)
scoreboard_interval_ticks = 20

# Promote the longest-standing member when the last moderator
# leaves or is kicked (default: true)
auto_promote_on_moderator_leave = true

# Maximum number of players in a party (default: unlimited)
# max_party_size = 8

# Team options applied to every session scoreboard
[scoreboard]
name_tag_visibility = true
collision_rule = true
"#
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero re-render interval or a zero
    /// party size limit.
    pub fn validate(&self) -> Result<()> {
        if self.scoreboard_interval_ticks == 0 {
            return Err(Error::config(
                "scoreboard_interval_ticks must be greater than zero",
            ));
        }
        if self.max_party_size == Some(0) {
            return Err(Error::config("max_party_size must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
