//! Configuration loading and representation.

use std::path::PathBuf;

use thiserror::Error;

use idcard_directory::IdentityPolicy;

use crate::desk::IdCardDesk;
use crate::error::DeskResult;
use crate::repository::JsonFileRepository;

/// Directory holding `ids.json` and `domains.json`.
pub const DATA_DIR_ENV: &str = "IDCARD_DATA_DIR";

/// `lenient` (default) or `strict`.
pub const IDENTITY_POLICY_ENV: &str = "IDCARD_IDENTITY_POLICY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to resolve a data directory; set IDCARD_DATA_DIR")]
    NoDataDir,

    #[error("invalid IDCARD_IDENTITY_POLICY {0:?} (expected \"lenient\" or \"strict\")")]
    InvalidPolicy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub data_dir: PathBuf,
    pub identity_policy: IdentityPolicy,
}

impl DeskConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            identity_policy: IdentityPolicy::default(),
        }
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };

        let identity_policy = match lookup(IDENTITY_POLICY_ENV) {
            Some(raw) => parse_policy(&raw)?,
            None => IdentityPolicy::default(),
        };

        Ok(Self {
            data_dir,
            identity_policy,
        })
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Open a desk over the JSON files in `data_dir`.
    pub fn open_desk(&self) -> DeskResult<IdCardDesk<JsonFileRepository>> {
        IdCardDesk::open(
            JsonFileRepository::new(&self.data_dir),
            self.identity_policy,
        )
    }
}

pub fn parse_policy(raw: &str) -> Result<IdentityPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "lenient" => Ok(IdentityPolicy::Lenient),
        "strict" => Ok(IdentityPolicy::Strict),
        _ => Err(ConfigError::InvalidPolicy(raw.to_string())),
    }
}

/// `{app_data_dir}/idcard`, falling back to `~/.local/share/idcard`.
fn default_data_dir() -> Option<PathBuf> {
    let mut dir = dirs::data_dir().or_else(|| {
        dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        })
    })?;
    dir.push("idcard");
    Some(dir)
}
