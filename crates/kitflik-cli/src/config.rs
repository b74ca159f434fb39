//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for kitflik
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt endpoint URL
    pub endpoint: Option<String>,
    /// Color theme ("dark" or "light")
    pub theme: Option<String>,
    /// Whether to use TUI mode by default
    pub tui: Option<bool>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kitflik")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for KITFLIK_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("KITFLIK_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        let dir = path.parent().unwrap();
        fs::create_dir_all(dir)?;

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            endpoint: Some(crate::DEFAULT_ENDPOINT.to_string()),
            theme: Some("dark".to_string()),
            tui: Some(true),
        };

        default_config.save()?;
        Ok(path)
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# kitflik configuration file
# Place at ~/.config/kitflik/config.toml (Linux/Mac) or %APPDATA%\kitflik\config.toml (Windows)

# Prompt endpoint URL
endpoint = "http://127.0.0.1:8080/api/recommend"

# Color theme (dark, light)
theme = "dark"

# Whether to use TUI mode by default (true by default)
# Set to false for simple stdin/stdout mode
tui = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let cfg: Config = toml::from_str(
            r#"
            endpoint = "http://example.com/chat"
            theme = "light"
            tui = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://example.com/chat"));
        assert_eq!(cfg.theme.as_deref(), Some("light"));
        assert_eq!(cfg.tui, Some(false));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let cfg: Config = toml::from_str("theme = \"dark\"").unwrap();
        assert!(cfg.endpoint.is_none());
        assert!(cfg.tui.is_none());
    }

    #[test]
    fn test_example_config_parses() {
        let cfg: Config = toml::from_str(example_config()).unwrap();
        assert!(cfg.endpoint.is_some());
    }
}
