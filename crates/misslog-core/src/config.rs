//! Configuration types for misslog.
//!
//! [`Config::load`] reads `~/.config/misslog/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
data_dir   = ""
record_key = "missed_searches"

[admin]
listen           = "127.0.0.1:8737"
default_sort     = "date"
capability_token = ""
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from
/// `~/.config/misslog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

/// `[store]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory the ledger record is written under. Empty means the default
    /// of `~/.local/share/misslog` (resolved at runtime by [`StoreConfig::resolved_data_dir`]).
    #[serde(default)]
    pub data_dir: String,
    /// Name of the single record holding the whole ledger.
    #[serde(default = "default_record_key")]
    pub record_key: String,
}

fn default_record_key() -> String { "missed_searches".to_string() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            record_key: default_record_key(),
        }
    }
}

impl StoreConfig {
    /// The data directory with the empty-string default expanded.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            default_data_dir()
        } else {
            PathBuf::from(&self.data_dir)
        }
    }
}

/// `[admin]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Address the admin/intake HTTP surface binds to.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Sort mode the ledger view renders with when none is requested.
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Bearer token required for removal requests. Empty means every caller
    /// is authorized (the capability check is an external collaborator in
    /// real deployments).
    #[serde(default)]
    pub capability_token: String,
}

fn default_listen() -> String { "127.0.0.1:8737".to_string() }
fn default_sort() -> String { "date".to_string() }

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            default_sort: default_sort(),
            capability_token: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/misslog/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("misslog")
        .join("config.toml")
}

fn default_data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".local")
                .join("share")
        })
        .join("misslog")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
