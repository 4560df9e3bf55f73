//! Server configuration
//!
//! Values come from the environment and can be overridden by the CLI.

use std::env;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "CHECKR_BIND_ADDR";
pub const MAX_PREFIXES_VAR: &str = "CHECKR_MAX_PREFIXES";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_PREFIXES: usize = 1024;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be used
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Largest number of prefixes accepted in one request
    pub max_prefixes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_prefixes: DEFAULT_MAX_PREFIXES,
        }
    }
}

impl ServerConfig {
    /// Read `CHECKR_BIND_ADDR` and `CHECKR_MAX_PREFIXES`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr;
        }
        if let Some(raw) = lookup(MAX_PREFIXES_VAR) {
            config.max_prefixes = parse_max_prefixes(&raw)?;
        }

        Ok(config)
    }

    /// Reject settings that could never accept a request
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_prefixes < checkr_analyzer::MIN_PREFIXES {
            return Err(ConfigError::InvalidValue {
                key: MAX_PREFIXES_VAR,
                value: self.max_prefixes.to_string(),
                reason: format!("must be at least {}", checkr_analyzer::MIN_PREFIXES),
            });
        }
        Ok(())
    }
}

fn parse_max_prefixes(raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidValue {
            key: MAX_PREFIXES_VAR,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
