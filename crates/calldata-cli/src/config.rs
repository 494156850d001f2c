//! CLI configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Print JSON even without `--json`
    #[serde(default)]
    pub json: bool,
    /// Prefix hex output with `0x`
    #[serde(default = "default_hex_prefix")]
    pub hex_prefix: bool,
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_hex_prefix() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json: false,
            hex_prefix: default_hex_prefix(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".calldata"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from file or return default
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    std::fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "Cannot determine config path")
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.json);
        assert!(config.hex_prefix);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_serialize() {
        let toml = toml::to_string(&Config::default()).unwrap();
        assert!(toml.contains("hex_prefix"));
        assert!(toml.contains("log_level"));
    }

    #[test]
    fn test_config_partial_file() {
        let config: Config = toml::from_str("hex_prefix = false").unwrap();
        assert!(!config.hex_prefix);
        assert_eq!(config.log_level, "warn");

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
