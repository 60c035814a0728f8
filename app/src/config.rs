//! Configuration management for the task list.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file is honoured when the binary calls `dotenvy::dotenv()` first.

use crate::storage::DEFAULT_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the task list is persisted
    pub storage: StorageConfig,
    /// Terminal front end
    pub ui: UiConfig,
    /// Log filter used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Persistence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<key>.json`
    pub dir: PathBuf,
    /// Slot name
    pub key: String,
    /// Mirror the list to disk after every change
    pub persist: bool,
}

/// Terminal front end configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Prefix of the heading
    pub title: String,
    /// Use ANSI strike-through for completed rows
    pub color: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            storage: StorageConfig {
                dir: lookup("TODO_STORAGE_DIR")
                    .map_or_else(|| PathBuf::from("."), PathBuf::from),
                key: lookup("TODO_STORAGE_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_KEY.to_string()),
                persist: lookup("TODO_PERSIST")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
            },
            ui: UiConfig {
                title: lookup("TODO_TITLE")
                    .unwrap_or_else(|| "Ma Liste de Tâches".to_string()),
                color: lookup("TODO_COLOR")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
            },
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
