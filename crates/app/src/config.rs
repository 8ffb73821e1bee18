//! Layered settings for the binary.
//!
//! Sources, lowest to highest priority: built-in defaults, the TOML file,
//! `PRACTICE_*` environment variables (`__` separates sections, so
//! `PRACTICE_DATABASE__URL` sets `database.url`), then command-line flags.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use services::WebhookConfig;
use services::submission::DEFAULT_WEBHOOK_URL;
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "practice.toml";
pub const DEFAULT_DB_URL: &str = "sqlite://practice.sqlite3";
pub const MEMORY_DB_URL: &str = "sqlite::memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DB_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookSection {
    pub url: String,
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEBHOOK_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub webhook: WebhookSection,
}

impl AppConfig {
    /// Defaults, then `file` (or `practice.toml` if it exists), then env.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if an explicit file is absent and
    /// `ConfigError::Figment` if a source does not parse.
    pub fn figment(file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        Ok(figment.merge(Env::prefixed("PRACTICE_").split("__")))
    }

    /// Resolve the final settings, letting explicit flags win.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::figment`]; also rejects blank values.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config: Self = Self::figment(cli.config.as_deref())?.extract()?;
        if let Some(db) = &cli.db {
            config.database.url.clone_from(db);
        }
        if let Some(url) = &cli.webhook_url {
            config.webhook.url.clone_from(url);
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url",
                reason: "must not be empty".into(),
            });
        }
        let webhook = self.webhook.url.trim();
        if !(webhook.starts_with("http://") || webhook.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "webhook.url",
                reason: format!("expected an http(s) url, got '{webhook}'"),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn webhook_config(&self) -> WebhookConfig {
        WebhookConfig {
            url: self.webhook.url.trim().to_string(),
        }
    }
}

/// Turn a bare or relative path into an absolute `sqlite://` url.
#[must_use]
pub fn normalize_sqlite_url(raw: &str, cwd: &Path) -> String {
    let trimmed = raw.trim();
    if trimmed == MEMORY_DB_URL || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist before connecting.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a url without a path and
/// propagates filesystem errors as the same variant.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if db_url == MEMORY_DB_URL {
        return Ok(());
    }

    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "database.url",
        reason,
    };
    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| invalid(format!("expected a sqlite:// url, got '{db_url}'")))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid(format!("missing file path in '{db_url}'")));
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| invalid(e.to_string()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use figment::Jail;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("practice").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load(&cli(&[])).expect("config loads");
            assert_eq!(config.database.url, DEFAULT_DB_URL);
            assert_eq!(config.webhook.url, DEFAULT_WEBHOOK_URL);
            Ok(())
        });
    }

    #[test]
    fn local_file_then_env_then_flags() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [database]
                url = "sqlite://from-file.sqlite3"

                [webhook]
                url = "http://file.example/hook"
                "#,
            )?;
            let config = AppConfig::load(&cli(&[])).expect("config loads");
            assert_eq!(config.database.url, "sqlite://from-file.sqlite3");
            assert_eq!(config.webhook.url, "http://file.example/hook");

            jail.set_env("PRACTICE_WEBHOOK__URL", "http://env.example/hook");
            let config = AppConfig::load(&cli(&[])).expect("config loads");
            assert_eq!(config.database.url, "sqlite://from-file.sqlite3");
            assert_eq!(config.webhook.url, "http://env.example/hook");

            let config = AppConfig::load(&cli(&["--db", "sqlite::memory:"])).expect("config loads");
            assert_eq!(config.database.url, MEMORY_DB_URL);
            assert_eq!(config.webhook.url, "http://env.example/hook");
            Ok(())
        });
    }

    #[test]
    fn explicit_file_must_exist() {
        Jail::expect_with(|_jail| {
            let err = AppConfig::load(&cli(&["--config", "missing.toml"])).unwrap_err();
            assert!(matches!(err, ConfigError::MissingFile(_)));
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_webhook() {
        Jail::expect_with(|_jail| {
            let err = AppConfig::load(&cli(&["--webhook-url", "ftp://nope"])).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    field: "webhook.url",
                    ..
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn normalizes_sqlite_urls() {
        let cwd = Path::new("/work");
        assert_eq!(normalize_sqlite_url("sqlite::memory:", cwd), MEMORY_DB_URL);
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/a.db", cwd),
            "sqlite:///tmp/a.db"
        );
        assert_eq!(
            normalize_sqlite_url("data/dev.sqlite3", cwd),
            "sqlite:///work/data/dev.sqlite3"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:dev.sqlite3", cwd),
            "sqlite:///work/dev.sqlite3"
        );
    }

    #[test]
    fn prepare_creates_missing_file() {
        Jail::expect_with(|jail| {
            let url = normalize_sqlite_url("nested/dir/db.sqlite3", jail.directory());
            prepare_sqlite_file(&url).expect("file prepared");
            assert!(jail.directory().join("nested/dir/db.sqlite3").exists());

            assert!(prepare_sqlite_file("postgres://nope").is_err());
            assert!(prepare_sqlite_file(MEMORY_DB_URL).is_ok());
            Ok(())
        });
    }
}
