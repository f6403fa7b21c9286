//! API token configuration
//!
//! Token resolution priority: `MAILINATOR_API_KEY` environment variable,
//! then the `api_key` field of `<config dir>/mailinator/config.json`, then
//! none. Loading never fails; an unreadable or malformed config file logs a
//! warning and counts as "no token".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "MAILINATOR_API_KEY";

/// Environment variable overriding the config/cache directory
pub const CONFIG_DIR_ENV: &str = "MAILINATOR_CONFIG_DIR";

/// Where the loaded token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Environment,
    File,
    None,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment"),
            TokenSource::File => write!(f, "file"),
            TokenSource::None => write!(f, "none"),
        }
    }
}

/// Loaded configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: Option<String>,
    pub source: TokenSource,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

/// Directory holding the config and cache files
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mailinator")
        })
}

/// Path of the token config file
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Path of the inbox listing cache file
pub fn cache_path() -> PathBuf {
    config_dir().join("inbox-cache.json")
}

impl Config {
    /// Load the token from the environment, then the config file
    pub fn load() -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                return Self {
                    api_token: Some(token),
                    source: TokenSource::Environment,
                };
            }
        }
        Self::load_from_file(&config_path())
    }

    /// Load the token from a specific config file, ignoring the environment
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<ConfigFile>(&content) {
                Ok(file) => match file.api_key {
                    Some(token) if !token.is_empty() => Self {
                        api_token: Some(token),
                        source: TokenSource::File,
                    },
                    _ => Self::empty(),
                },
                Err(e) => {
                    tracing::warn!("ignoring malformed config file {}: {e}", path.display());
                    Self::empty()
                }
            },
            Err(_) => Self::empty(),
        }
    }

    fn empty() -> Self {
        Self {
            api_token: None,
            source: TokenSource::None,
        }
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}

/// Persist the API token to the config file
pub fn save_token(token: &str) -> Result<PathBuf> {
    let path = config_path();
    save_token_to(&path, token)?;
    Ok(path)
}

/// Persist the API token to a specific config file
pub fn save_token_to(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("failed to create config directory: {e}")))?;
    }

    // Keep any fields a future version may have written alongside api_key
    let mut file: serde_json::Map<String, serde_json::Value> = std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default();
    file.insert("api_key".to_string(), serde_json::Value::from(token));

    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| Error::config(format!("failed to serialize configuration: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| Error::config(format!("failed to save configuration: {e}")))?;
    Ok(())
}
