//! Dispatcher configuration.
//!
//! Host-tunable behavior lives here rather than in code: the
//! pointer-inside-canvas restriction and the list of combinations that
//! must never suppress the native event (paste needs the native event to
//! reach the host's clipboard listener). Stored as TOML in the
//! XDG-compliant config dir via the [`directories`](https://docs.rs/directories)
//! crate, same as the rest of the application family.

use compact_str::CompactString;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::error::{KeyError, KeyResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Only respond to shortcuts while the pointer is inside the canvas.
    #[serde(default)]
    pub restrict_to_canvas: bool,

    /// Combinations that fire handlers but never suppress the native
    /// event's default action or propagation.
    #[serde(default = "default_passthrough")]
    pub passthrough: Vec<String>,
}

fn default_passthrough() -> Vec<String> {
    vec!["Control+v".to_string()]
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            restrict_to_canvas: false,
            passthrough: default_passthrough(),
        }
    }
}

impl DispatcherConfig {
    /// Load from the canonical config path, falling back to defaults when
    /// no file exists yet.
    pub fn load() -> KeyResult<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("loading dispatcher config from {}", path.display());
            Self::load_from_file(&path)
        } else {
            info!(
                "no dispatcher config at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> KeyResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            KeyError::Config(CompactString::from(format!(
                "failed to read config file: {e}"
            )))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            KeyError::Config(CompactString::from(format!("failed to parse config: {e}")))
        })?;

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> KeyResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            KeyError::Config(CompactString::from(format!(
                "failed to serialize config: {e}"
            )))
        })?;

        std::fs::write(path.as_ref(), content).map_err(|e| {
            KeyError::Config(CompactString::from(format!(
                "failed to write config file: {e}"
            )))
        })?;

        Ok(())
    }

    /// Canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> KeyResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "example", "Hotkeyr").ok_or_else(|| {
            KeyError::Config(CompactString::from("could not determine config directory"))
        })?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_paste_native() {
        let config = DispatcherConfig::default();
        assert!(!config.restrict_to_canvas);
        assert_eq!(config.passthrough, ["Control+v"]);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = DispatcherConfig {
            restrict_to_canvas: true,
            passthrough: vec!["Control+v".to_string(), "Control+Shift+v".to_string()],
        };
        config.save_to_file(&path).unwrap();

        let loaded = DispatcherConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: DispatcherConfig = toml::from_str("").unwrap();
        assert_eq!(config, DispatcherConfig::default());

        let config: DispatcherConfig = toml::from_str("restrict_to_canvas = true").unwrap();
        assert!(config.restrict_to_canvas);
        assert_eq!(config.passthrough, ["Control+v"]);
    }
}
