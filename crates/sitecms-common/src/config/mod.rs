//! Configuration types for the sitecms system

mod server;
mod store;

pub use server::ServerConfig;
pub use store::{SeedTarget, StoreConfig};

use {
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

use crate::errors::{Error, Result};

/// Top-level configuration, normally built from defaults and CLI overrides and
/// optionally loaded from a JSON file first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CmsConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub log_level: Option<String>,
}

impl CmsConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str::<Self>(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.store.validate()
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}
