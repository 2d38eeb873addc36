//! # Configuration Management Module
//!
//! Loads and writes the TOML configuration shared by the `play` REPL and the
//! `serve` relay.
//!
//! ## Configuration Structure
//!
//! - [`GameConfig`] - Presentation options for the interactive shell
//! - [`ServerConfig`] - Relay listener address and per-connection limits
//! - [`LoggingConfig`] - Log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cli_adventures::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Write a starter file, then read it back
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!
//!     println!("Relay bind: {}", config.server.bind);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! color = true
//! banner = true
//!
//! [server]
//! bind = "127.0.0.1:4040"
//! max_line_bytes = 512
//! max_sessions = 64
//!
//! [logging]
//! level = "info"
//! file = "cli-adventures.log"
//! ```
//!
//! Every section is optional; missing sections and keys take the defaults
//! below. CLI flags (`--bind`, `-v`) override file values.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Render ANSI colors. When false, markup is stripped before printing.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Print the welcome banner when `play` starts.
    #[serde(default = "default_true")]
    pub banner: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            color: true,
            banner: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Longest request line accepted from a relay client, in bytes.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
    /// Connections beyond this are refused with an error line.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            max_line_bytes: default_max_line_bytes(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`, falling back to `Info` for unknown values.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

fn default_true() -> bool {
    true
}

fn default_bind() -> String {
    "127.0.0.1:4040".to_string()
}

fn default_max_line_bytes() -> usize {
    512
}

fn default_max_sessions() -> usize {
    64
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            Config::load(path).await
        } else {
            Ok(Config::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.game.color);
        assert!(config.game.banner);
        assert_eq!(config.server.bind, "127.0.0.1:4040");
        assert_eq!(config.server.max_line_bytes, 512);
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[game]\ncolor = false\n").unwrap();
        assert!(!config.game.color);
        assert!(config.game.banner);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "chatty".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Info);
        let debug = LoggingConfig {
            level: "debug".into(),
            file: None,
        };
        assert_eq!(debug.level_filter(), log::LevelFilter::Debug);
    }
}
