//! Configuration system for the SkyDesk ID server.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $SKYDESK_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/skydesk/config.toml
//!   3. ~/.config/skydesk/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkydeskConfig {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address. Default binds every interface.
    pub host: String,
    /// TCP listening port.
    pub port: u16,
    /// Echo raw body parse errors back to the caller in 500 responses.
    pub expose_internal_errors: bool,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            expose_internal_errors: false,
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("skydesk")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl SkydeskConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_file(&Self::file_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse the file at `path`, or defaults if it does not exist.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("SKYDESK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Apply PORT and SKYDESK_* env var overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    /// `SKYDESK_SERVER__PORT` wins over the bare `PORT`.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        for key in ["PORT", "SKYDESK_SERVER__PORT"] {
            if let Some(v) = var(key) {
                match v.trim().parse() {
                    Ok(p) => self.server.port = p,
                    Err(_) => tracing::warn!(key, value = %v, "ignoring unparseable port"),
                }
            }
        }
        if let Some(v) = var("SKYDESK_SERVER__HOST") {
            self.server.host = v;
        }
        let key = "SKYDESK_SERVER__EXPOSE_INTERNAL_ERRORS";
        if let Some(v) = var(key) {
            match parse_flag(&v) {
                Some(flag) => self.server.expose_internal_errors = flag,
                None => tracing::warn!(key, value = %v, "ignoring unrecognized boolean"),
            }
        }
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Case-insensitive `true/1/yes/on` or `false/0/no/off`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
