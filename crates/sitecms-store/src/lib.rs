//! This is the sitecms-store crate - owns the allow-listed JSON documents on
//! disk, their `.bak` backups and the deployed mirror.

pub mod advisory;
pub mod bootstrap;
pub mod traits;


pub use advisory::{Advisory, AdvisoryOperation, AdvisoryStatus};
pub use bootstrap::BootstrapReport;
pub use traits::DocumentStore;

use {
    async_trait::async_trait,
    serde::Serialize,
    serde_json::{ser::PrettyFormatter, Serializer, Value},
    sitecms_common::{Error, ReadFailure, Result, StoreConfig},
    std::{
        collections::HashMap,
        io,
        path::{Path, PathBuf},
        sync::Arc,
    },
    tokio::{fs, sync::Mutex},
};

/// What a successful save did besides writing the primary copy.
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub name: String,
    pub primary: PathBuf,
    pub backup: Advisory,
    pub mirror: Advisory,
}

pub struct ConfigStore {
    config: StoreConfig,
    // One lock per allowed name, held across backup, write and mirror
    write_locks: HashMap<String, Arc<Mutex<()>>>,
}

impl ConfigStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let write_locks = config
            .allowed_files
            .iter()
            .map(|name| (name.clone(), Arc::new(Mutex::new(()))))
            .collect();

        Ok(Self {
            config,
            write_locks,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.config.is_allowed(name)
    }

    /// Seed missing artifacts from their templates. Run once before serving.
    pub fn bootstrap(&self) -> BootstrapReport {
        bootstrap::bootstrap(&self.config)
    }

    pub async fn get(&self, name: &str) -> Result<Value> {
        if !self.is_allowed(name) {
            return Err(Error::AccessDenied(name.to_string()));
        }

        let path = self.config.primary_path(name);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::read(name, ReadFailure::Missing, e));
            }
            Err(e) => return Err(Error::read(name, ReadFailure::Io, e)),
        };

        serde_json::from_slice(&data).map_err(|e| Error::read(name, ReadFailure::InvalidJson, e))
    }

    pub async fn save(&self, name: &str, document: &Value) -> Result<SaveReport> {
        let lock = match self.write_locks.get(name) {
            Some(lock) => lock.clone(),
            None => return Err(Error::AccessDenied(name.to_string())),
        };
        let _guard = lock.lock().await;

        let primary = self.config.primary_path(name);

        let backup = self.backup(name, &primary).await.logged();

        let content = to_pretty_json(document)
            .map_err(|e| Error::write(name, io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&primary, &content)
            .await
            .map_err(|e| Error::write(name, e))?;
        tracing::debug!(file = name, path = %primary.display(), "Saved primary file");

        let mirror = self.mirror(name, &content).await.logged();

        Ok(SaveReport {
            name: name.to_string(),
            primary,
            backup,
            mirror,
        })
    }

    async fn backup(&self, name: &str, primary: &Path) -> Advisory {
        let path = self.config.backup_path(name);
        match fs::copy(primary, &path).await {
            Ok(_) => Advisory::completed(AdvisoryOperation::Backup, name, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Advisory::skipped(AdvisoryOperation::Backup, name, path, "no previous file")
            }
            Err(e) => Advisory::failed(AdvisoryOperation::Backup, name, path, e),
        }
    }

    async fn mirror(&self, name: &str, content: &[u8]) -> Advisory {
        let path = self.config.mirror_path(name);

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent).await {
                return Advisory::failed(AdvisoryOperation::Mirror, name, path, e);
            }
        }

        match fs::write(&path, content).await {
            Ok(()) => Advisory::completed(AdvisoryOperation::Mirror, name, path),
            Err(e) => Advisory::failed(AdvisoryOperation::Mirror, name, path, e),
        }
    }
}

#[async_trait]
impl DocumentStore for ConfigStore {
    fn is_allowed(&self, name: &str) -> bool {
        ConfigStore::is_allowed(self, name)
    }

    async fn get(&self, name: &str) -> Result<Value> {
        ConfigStore::get(self, name).await
    }

    async fn save(&self, name: &str, document: &Value) -> Result<SaveReport> {
        ConfigStore::save(self, name, document).await
    }
}

/// Serialize with the 4-space indentation the site files are kept in.
pub fn to_pretty_json(document: &Value) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    Ok(buf)
}
