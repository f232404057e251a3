use {
    serde::{Deserialize, Serialize},
    std::{
        ffi::OsString,
        path::{Path, PathBuf},
    },
};

use crate::errors::{Error, Result};

pub const BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Source-of-truth document root, also served as the main site
    pub primary_root: PathBuf,
    /// Deployed root that receives a mirror of every save
    pub deployed_root: PathBuf,
    /// Document names that may be read and written
    pub allowed_files: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            primary_root: PathBuf::from("public"),
            deployed_root: PathBuf::from("dist"),
            allowed_files: vec!["config.json".to_string(), "seo.json".to_string()],
        }
    }
}

/// An artifact copied from its example template on first start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTarget {
    pub label: &'static str,
    pub target: PathBuf,
    pub template: PathBuf,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        for name in &self.allowed_files {
            let plain = Path::new(name)
                .file_name()
                .map(|f| f == name.as_str())
                .unwrap_or(false);
            if !plain || name.ends_with(BACKUP_SUFFIX) {
                return Err(Error::Config(format!(
                    "allowed file must be a plain file name: {:?}",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed_files.iter().any(|allowed| allowed == name)
    }

    pub fn primary_path(&self, name: &str) -> PathBuf {
        self.primary_root.join(name)
    }

    pub fn backup_path(&self, name: &str) -> PathBuf {
        let mut path = OsString::from(self.primary_path(name));
        path.push(BACKUP_SUFFIX);
        PathBuf::from(path)
    }

    pub fn mirror_path(&self, name: &str) -> PathBuf {
        self.deployed_root.join(name)
    }

    /// The five artifacts seeded at startup, all relative to the primary root.
    pub fn seed_targets(&self) -> Vec<SeedTarget> {
        let root = &self.primary_root;
        let seed = |label, target: &str, template: &str| SeedTarget {
            label,
            target: root.join(target),
            template: root.join(template),
        };

        vec![
            seed("config", "config.json", "config.example.json"),
            seed("preview image", "assets/preview.jpg", "assets/preview_example.jpg"),
            seed("seo", "seo.json", "seo.example.json"),
            seed("robots", "robots.txt", "robots.example.txt"),
            seed("sitemap", "sitemap.xml", "sitemap.example.xml"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let config = StoreConfig {
            primary_root: PathBuf::from("/srv/site/public"),
            deployed_root: PathBuf::from("/srv/site/dist"),
            ..StoreConfig::default()
        };

        assert_eq!(
            config.primary_path("seo.json"),
            PathBuf::from("/srv/site/public/seo.json")
        );
        assert_eq!(
            config.backup_path("seo.json"),
            PathBuf::from("/srv/site/public/seo.json.bak")
        );
        assert_eq!(
            config.mirror_path("seo.json"),
            PathBuf::from("/srv/site/dist/seo.json")
        );
    }

    #[test]
    fn test_allow_list() {
        let config = StoreConfig::default();
        assert!(config.is_allowed("config.json"));
        assert!(config.is_allowed("seo.json"));
        assert!(!config.is_allowed("secrets.json"));
        assert!(!config.is_allowed("../config.json"));
        assert!(!config.is_allowed(""));
    }

    #[test]
    fn test_validate_rejects_paths() {
        for bad in ["../etc/passwd", "nested/config.json", "", "config.json.bak"] {
            let config = StoreConfig {
                allowed_files: vec![bad.to_string()],
                ..StoreConfig::default()
            };
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
        assert!(StoreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_seed_targets() {
        let config = StoreConfig::default();
        let targets = config.seed_targets();
        assert_eq!(targets.len(), 5);

        let image = targets.iter().find(|t| t.label == "preview image").unwrap();
        assert_eq!(image.target, PathBuf::from("public/assets/preview.jpg"));
        assert_eq!(image.template, PathBuf::from("public/assets/preview_example.jpg"));

        let robots = targets.iter().find(|t| t.label == "robots").unwrap();
        assert_eq!(robots.template, PathBuf::from("public/robots.example.txt"));
    }
}
