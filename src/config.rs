//! Catalog configuration loaded from JSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_LOG_DIR: &str = ".logs";
const DEFAULT_LOG_FILTER: &str = "wallpaper_catalog=debug,warn";

/// Title and collection id for one of the catalog's own categories
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub title: String,
    pub collection_id: String,
}

impl CategoryLabel {
    fn new(title: &str, collection_id: &str) -> Self {
        Self {
            title: title.to_string(),
            collection_id: collection_id.to_string(),
        }
    }
}

/// Labels for the categories the catalog synthesizes itself
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLabels {
    pub my_photos: CategoryLabel,
    pub on_device: CategoryLabel,
    pub live_wallpapers: CategoryLabel,
    pub my_photos_overlay_icon: Option<String>,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            my_photos: CategoryLabel::new("My photos", "image_wallpapers"),
            on_device: CategoryLabel::new("On-device wallpapers", "on_device_wallpapers"),
            live_wallpapers: CategoryLabel::new("Live wallpapers", "live_wallpapers"),
            my_photos_overlay_icon: Some("wallpaperpicker_emptystate".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            file_prefix: "wallpaper-catalog".to_string(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Top-level catalog configuration
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Package of the embedding picker app, never listed as a third-party app.
    pub host_package: Option<String>,
    /// Packages never listed as third-party wallpaper apps.
    pub excluded_third_party_packages: Vec<String>,
    pub labels: CategoryLabels,
    pub logging: LoggingConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host_package: None,
            excluded_third_party_packages: vec![
                // Legacy launcher
                "com.android.launcher".to_string(),
                // Live wallpaper picker
                "com.android.wallpaper.livepicker".to_string(),
            ],
            labels: CategoryLabels::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CatalogConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: CatalogConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Catalog config loaded");
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn is_excluded_third_party(&self, package_name: &str) -> bool {
        self.host_package.as_deref() == Some(package_name)
            || self
                .excluded_third_party_packages
                .iter()
                .any(|excluded| excluded == package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_denylist() {
        let config = CatalogConfig::default();
        assert!(config.is_excluded_third_party("com.android.launcher"));
        assert!(config.is_excluded_third_party("com.android.wallpaper.livepicker"));
        assert!(!config.is_excluded_third_party("net.nurik.muzei"));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: CatalogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"host_package": "com.android.wallpaper", "labels": {{"on_device": {{"title": "Built-in", "collection_id": "builtin"}}}}}}"#
        )
        .unwrap();

        let config = CatalogConfig::load(file.path()).unwrap();
        assert!(config.is_excluded_third_party("com.android.wallpaper"));
        assert!(config.is_excluded_third_party("com.android.launcher"));
        assert_eq!(config.labels.on_device.collection_id, "builtin");
        assert_eq!(config.labels.my_photos.collection_id, "image_wallpapers");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CatalogConfig::load(dir.path().join("missing.json")).is_err());
        assert!(CatalogConfig::load_or_default(None).is_ok());
    }
}
