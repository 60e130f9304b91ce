//! Configuration loading
//!
//! Settings are merged from several sources. Later sources win:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`api_key`, `base_url`)
//! 3. Process environment, after `.env` has been loaded into it
//! 4. An explicit base URL override (the `--base-url` flag)
//!
//! A missing API key is fatal: no tool can be served without it.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Environment variable holding the Alpha Vantage API key
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Environment variable overriding the upstream base URL
pub const BASE_URL_ENV: &str = "ALPHA_VANTAGE_BASE_URL";

/// Public Alpha Vantage endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// On-disk configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ConfigFile {
    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Resolved runtime configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    base_url: String,
}

impl Config {
    /// Build a configuration directly, rejecting an empty API key
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Load configuration from the process environment
    ///
    /// Loads `.env` from the working directory first (existing variables are
    /// not overwritten), then reads the optional config file.
    pub fn load(config_path: Option<&Path>, base_url_override: Option<String>) -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env"),
        }

        let file = match config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        Self::resolve(file, |key| std::env::var(key).ok(), base_url_override)
    }

    /// Merge the configuration sources
    ///
    /// `env` looks up a variable by name; passing a closure keeps this free of
    /// process-global state.
    pub fn resolve<F>(file: ConfigFile, env: F, base_url_override: Option<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let api_key = non_empty(env(API_KEY_ENV))
            .or_else(|| non_empty(file.api_key))
            .ok_or(Error::MissingApiKey)?;

        let base_url = non_empty(base_url_override)
            .or_else(|| non_empty(env(BASE_URL_ENV)))
            .or_else(|| non_empty(file.base_url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(api_key, base_url)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// The API key never reaches logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn api_key_from_env() {
        let config =
            Config::resolve(ConfigFile::default(), env_from(&[(API_KEY_ENV, "abc")]), None).unwrap();
        assert_eq!(config.api_key(), "abc");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let result = Config::resolve(ConfigFile::default(), env_from(&[]), None);
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }

    #[test]
    fn blank_api_key_is_missing() {
        let result = Config::resolve(ConfigFile::default(), env_from(&[(API_KEY_ENV, "  ")]), None);
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }

    #[test]
    fn env_overrides_file() {
        let file = ConfigFile {
            api_key: Some("from-file".into()),
            base_url: Some("http://file.example".into()),
        };
        let config = Config::resolve(
            file,
            env_from(&[(API_KEY_ENV, "from-env"), (BASE_URL_ENV, "http://env.example")]),
            None,
        )
        .unwrap();
        assert_eq!(config.api_key(), "from-env");
        assert_eq!(config.base_url(), "http://env.example");
    }

    #[test]
    fn file_used_when_env_absent() {
        let file = ConfigFile {
            api_key: Some("from-file".into()),
            base_url: Some("http://file.example/".into()),
        };
        let config = Config::resolve(file, env_from(&[]), None).unwrap();
        assert_eq!(config.api_key(), "from-file");
        assert_eq!(config.base_url(), "http://file.example");
    }

    #[test]
    fn override_beats_everything() {
        let file = ConfigFile {
            api_key: None,
            base_url: Some("http://file.example".into()),
        };
        let config = Config::resolve(
            file,
            env_from(&[(API_KEY_ENV, "k"), (BASE_URL_ENV, "http://env.example")]),
            Some("http://cli.example".into()),
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://cli.example");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = Config::new("secret-key", DEFAULT_BASE_URL).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
