use {
    serde::{Deserialize, Serialize},
    std::{net::SocketAddr, path::PathBuf},
};

use crate::errors::{Error, Result};

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_ADMIN_PATH: &str = "/sys-ops";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Route serving the admin UI entry page
    pub admin_path: String,
    /// Directory holding the admin UI (`index.html` plus assets)
    pub admin_ui_root: PathBuf,
    /// Name reported by the status endpoint
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            admin_path: DEFAULT_ADMIN_PATH.to_string(),
            admin_ui_root: PathBuf::from("cms"),
            service_name: "sitecms".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.admin_path.starts_with('/') || self.admin_path.len() < 2 {
            return Err(Error::Config(format!(
                "admin_path must be an absolute route other than '/': {:?}",
                self.admin_path
            )));
        }
        if self.admin_path.ends_with('/') {
            return Err(Error::Config(format!(
                "admin_path must not end with '/': {:?}",
                self.admin_path
            )));
        }
        Ok(())
    }

    pub fn admin_entry_page(&self) -> PathBuf {
        self.admin_ui_root.join("index.html")
    }

    pub fn preview_path(&self) -> String {
        format!("{}/preview", self.admin_path)
    }
}
