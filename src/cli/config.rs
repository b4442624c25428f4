//! Attest configuration file handling.
//!
//! Operator settings in TOML format: which integration to connect by
//! default and how to log. Protocol behavior (what gets signed, how
//! verification works) is not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default integration to connect
const DEFAULT_INTEGRATION: &str = "phantom";

/// Attest operator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttestConfig {
    /// Wallet integration settings
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Wallet-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Integration to connect when none is named explicitly
    #[serde(default = "default_integration")]
    pub integration: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

fn default_integration() -> String {
    DEFAULT_INTEGRATION.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            integration: default_integration(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl AttestConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: AttestConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, contents)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml() -> String {
        r#"# Attest Configuration (Operator Settings)

[wallet]
# Integration to connect when none is named on the command line.
# Known integrations: phantom, coinbase
integration = "phantom"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (optional, logs to stderr if not specified)
# file = "/var/log/attest/attest.log"
"#
        .to_string()
    }

    /// Create and save a default configuration file
    pub fn create_default(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }

    /// Load the config at `path`, or fall back to the default location and
    /// finally to built-in defaults when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Default config file location: `<config_dir>/attest/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("attest")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AttestConfig::default();
        assert_eq!(config.wallet.integration, "phantom");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AttestConfig::default();
        config.wallet.integration = "coinbase".to_string();
        config.logging.level = "debug".to_string();
        config.save(&path).unwrap();

        let loaded = AttestConfig::load(&path).unwrap();
        assert_eq!(loaded.wallet.integration, "coinbase");
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_generated_default_parses() {
        let contents = AttestConfig::generate_default_toml();
        let config: AttestConfig = toml::from_str(&contents).unwrap();
        assert_eq!(config.wallet.integration, "phantom");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_create_default_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        AttestConfig::create_default(&path).unwrap();
        assert!(path.exists());

        let loaded = AttestConfig::load(&path).unwrap();
        assert_eq!(loaded.wallet.integration, "phantom");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();

        let config = AttestConfig::load(&path).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.wallet.integration, "phantom");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AttestConfig::load(&path).is_err());
    }
}
