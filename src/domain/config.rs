//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat service, the glossary database and logging.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads and parses the YAML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| crate::strings::logs::config_read_error(&path.display().to_string()))?;
        serde_yaml::from_str(&content).context(crate::strings::logs::CONFIG_PARSE_ERROR)
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://data/acrobot.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

/// Controls which room messages are treated as commands.
#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    /// Only handle messages that start with a mention of the bot.
    #[serde(default = "default_mention_only")]
    pub mention_only: bool,
    /// Extra names the bot answers to, besides its username and display name.
    #[serde(default)]
    pub names: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            mention_only: default_mention_only(),
            names: Vec::new(),
        }
    }
}

fn default_mention_only() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: default_log_file(),
            filter: None,
        }
    }
}

fn default_log_directory() -> String {
    "data".to_string()
}

fn default_log_file() -> String {
    "session.log".to_string()
}

impl AppConfig {
    /// Names a message may start with to address the bot.
    pub fn mention_names(&self) -> Vec<String> {
        let matrix = &self.services.matrix;
        // "@acrobot:example.org" -> "acrobot"
        let localpart = matrix
            .username
            .trim_start_matches('@')
            .split(':')
            .next()
            .unwrap_or_default()
            .to_string();

        let mut names = vec![localpart];
        names.extend(matrix.display_name.clone());
        names.extend(self.commands.names.iter().cloned());
        let mut seen = HashSet::new();
        names.retain(|n| !n.trim().is_empty() && seen.insert(n.clone()));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
services:
  matrix:
    username: "@acrobot:example.org"
    password: "secret"
    homeserver: "https://matrix.example.org"
"#;

    #[test]
    fn test_defaults_for_optional_sections() {
        let config: AppConfig = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(config.database.url, "sqlite://data/acrobot.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.commands.mention_only);
        assert_eq!(config.logging.directory, "data");
        assert_eq!(config.logging.file, "session.log");
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{MINIMAL}database:\n  url: \"sqlite::memory:\"\ncommands:\n  mention_only: false\n"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(!config.commands.mention_only);
        assert_eq!(config.services.matrix.homeserver, "https://matrix.example.org");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(&dir.path().join("nope.yaml")).is_err());
    }

    #[test]
    fn test_mention_names() {
        let mut config: AppConfig = serde_yaml::from_str(MINIMAL).unwrap();
        config.services.matrix.display_name = Some("AcroBot".to_string());
        config.commands.names = vec!["acro".to_string(), " ".to_string()];
        assert_eq!(config.mention_names(), vec!["acrobot", "AcroBot", "acro"]);
    }

    #[test]
    fn test_mention_names_drop_repeats() {
        let mut config: AppConfig = serde_yaml::from_str(MINIMAL).unwrap();
        config.services.matrix.display_name = Some("AcroBot".to_string());
        config.commands.names = vec!["acrobot".to_string(), "AcroBot".to_string()];
        assert_eq!(config.mention_names(), vec!["acrobot", "AcroBot"]);
    }
}
