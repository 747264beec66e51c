//! Configuration file support for orgmirror.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Environment variables (prefixed with `ORGMIRROR_`, e.g.,
//!    `ORGMIRROR_DATABASE_URL`, `ORGMIRROR_GITHUB_TOKEN`)
//! 2. Config file (~/.config/orgmirror/config.toml or ./orgmirror.toml)
//! 3. Built-in defaults
//!
//! A `.env` file in the current directory is read before any of the above.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite:///var/lib/orgmirror/orgmirror.db?mode=rwc"
//!
//! [github]
//! token = "ghp_..."  # or use ORGMIRROR_GITHUB_TOKEN env var
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// GitHub configuration.
    pub github: GitHubConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL. Defaults to a SQLite file in the platform's
    /// local data directory if not specified.
    pub url: Option<String>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via ORGMIRROR_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

impl Config {
    /// Load configuration from config file and environment.
    ///
    /// Any load failure falls back to defaults; a missing config file is
    /// normal.
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(dirs) = ProjectDirs::from("", "", "orgmirror") {
            let path = dirs.config_dir().join("config.toml");
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder
            .add_source(File::new("orgmirror.toml", FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("ORGMIRROR").separator("_"));

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_default()
    }

    /// Resolve the database URL, falling back to a per-user SQLite file.
    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database.url {
            return url.clone();
        }

        let data_dir = ProjectDirs::from("", "", "orgmirror")
            .map(|d| d.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("orgmirror.db").display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_database_url_wins() {
        let config = Config {
            database: DatabaseConfig {
                url: Some("sqlite://custom.db".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(config.database_url(), "sqlite://custom.db");
    }

    #[test]
    fn test_default_database_url_is_sqlite() {
        let config = Config::default();
        assert!(config.database_url().starts_with("sqlite://"));
        assert!(config.database_url().contains("orgmirror.db"));
    }
}
