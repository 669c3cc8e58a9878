//! Device described by a JSON manifest
//!
//! Implements every collaborator trait from a static description, which is what
//! the binary runs against and what the tests use to stage devices. Network status
//! and locale can be changed at runtime to simulate environment drift.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde::Deserialize;

use crate::current_wallpaper::{RefreshedWallpapers, WallpaperRefresher};
use crate::model::WallpaperEntry;
use crate::platform::{
    DefinitionResource, FeatureFlags, LiveWallpaperService, LocaleSource, LocaleTag,
    NetworkStatus, NetworkStatusSource, PackageEnumerator, PartnerProvider, SystemFeature,
    WallpaperApp,
};

const DEFAULT_DEFINITION_RESOURCE: &str = "partner_wallpapers";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeviceFeatures {
    pub live_wallpaper: bool,
    pub creative_wallpapers: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PartnerDefinition {
    pub resource_name: Option<String>,
    /// XML file, relative to the manifest.
    pub path: Option<PathBuf>,
    pub inline: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PartnerManifest {
    pub package_name: String,
    #[serde(default)]
    pub definition: Option<PartnerDefinition>,
    #[serde(default)]
    pub hide_default_wallpaper: bool,
    #[serde(default)]
    pub wallpapers: Vec<WallpaperEntry>,
    #[serde(default)]
    pub legacy_wallpapers: Vec<WallpaperEntry>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeviceManifest {
    pub network: NetworkStatus,
    pub locale: LocaleTag,
    pub features: DeviceFeatures,
    pub partner: Option<PartnerManifest>,
    pub live_wallpapers: Vec<LiveWallpaperService>,
    pub wallpaper_apps: Vec<WallpaperApp>,
    pub current: Option<RefreshedWallpapers>,
}

#[derive(Debug)]
struct Environment {
    network: NetworkStatus,
    locale: LocaleTag,
    creative_wallpapers: bool,
}

#[derive(Debug)]
pub struct ManifestDevice {
    manifest: DeviceManifest,
    definition: Option<DefinitionResource>,
    environment: RwLock<Environment>,
}

impl ManifestDevice {
    /// Loads a manifest file; definition paths resolve against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading device manifest {}", path.display()))?;
        let manifest: DeviceManifest = serde_json::from_str(&content)
            .with_context(|| format!("parsing device manifest {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_manifest(manifest, base_dir)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: DeviceManifest =
            serde_json::from_str(json).context("parsing device manifest")?;
        Self::from_manifest(manifest, Path::new("."))
    }

    pub fn from_manifest(manifest: DeviceManifest, base_dir: &Path) -> Result<Self> {
        let definition = match &manifest.partner {
            Some(partner) => load_definition(partner, base_dir)?,
            None => None,
        };
        let environment = Environment {
            network: manifest.network,
            locale: manifest.locale.clone(),
            creative_wallpapers: manifest.features.creative_wallpapers,
        };
        tracing::debug!(
            has_definition = definition.is_some(),
            live_wallpapers = manifest.live_wallpapers.len(),
            wallpaper_apps = manifest.wallpaper_apps.len(),
            "Device manifest loaded"
        );
        Ok(Self {
            manifest,
            definition,
            environment: RwLock::new(environment),
        })
    }

    pub fn set_network_status(&self, status: NetworkStatus) {
        self.environment.write().network = status;
    }

    pub fn set_locale(&self, locale: LocaleTag) {
        self.environment.write().locale = locale;
    }

    pub fn set_creative_wallpapers(&self, enabled: bool) {
        self.environment.write().creative_wallpapers = enabled;
    }
}

fn load_definition(
    partner: &PartnerManifest,
    base_dir: &Path,
) -> Result<Option<DefinitionResource>> {
    let Some(definition) = &partner.definition else {
        return Ok(None);
    };

    let contents = match (&definition.inline, &definition.path) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => {
            let path = base_dir.join(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("reading partner definition {}", path.display()))?
        }
        (None, None) => String::new(),
    };

    Ok(Some(DefinitionResource {
        name: definition
            .resource_name
            .clone()
            .unwrap_or_else(|| DEFAULT_DEFINITION_RESOURCE.to_string()),
        package_name: partner.package_name.clone(),
        contents,
    }))
}

impl NetworkStatusSource for ManifestDevice {
    fn network_status(&self) -> NetworkStatus {
        self.environment.read().network
    }
}

impl LocaleSource for ManifestDevice {
    fn current_locale(&self) -> LocaleTag {
        self.environment.read().locale.clone()
    }
}

impl FeatureFlags for ManifestDevice {
    fn is_creative_wallpaper_enabled(&self) -> bool {
        self.environment.read().creative_wallpapers
    }
}

impl PartnerProvider for ManifestDevice {
    fn wallpaper_definition(&self) -> Option<DefinitionResource> {
        self.definition.clone()
    }

    fn should_hide_default_wallpaper(&self) -> bool {
        self.manifest
            .partner
            .as_ref()
            .is_some_and(|partner| partner.hide_default_wallpaper)
    }

    fn partner_wallpapers(&self) -> Vec<WallpaperEntry> {
        self.manifest
            .partner
            .as_ref()
            .map(|partner| partner.wallpapers.clone())
            .unwrap_or_default()
    }

    fn legacy_partner_wallpapers(&self) -> Vec<WallpaperEntry> {
        self.manifest
            .partner
            .as_ref()
            .map(|partner| partner.legacy_wallpapers.clone())
            .unwrap_or_default()
    }
}

impl PackageEnumerator for ManifestDevice {
    fn has_system_feature(&self, feature: SystemFeature) -> bool {
        match feature {
            SystemFeature::LiveWallpaper => self.manifest.features.live_wallpaper,
        }
    }

    fn live_wallpaper_services(&self) -> Vec<LiveWallpaperService> {
        self.manifest.live_wallpapers.clone()
    }

    fn wallpaper_apps(&self) -> Vec<WallpaperApp> {
        self.manifest.wallpaper_apps.clone()
    }
}

impl WallpaperRefresher for ManifestDevice {
    fn refresh(&self) -> BoxFuture<'_, Result<RefreshedWallpapers>> {
        let current = self.manifest.current.clone();
        Box::pin(async move { current.context("device manifest has no applied wallpaper") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_manifest_defaults() {
        let device = ManifestDevice::from_json("{}").unwrap();
        assert_eq!(device.network_status(), NetworkStatus::NotInitialized);
        assert_eq!(device.current_locale(), LocaleTag::new("en-US"));
        assert!(device.wallpaper_definition().is_none());
        assert!(!device.should_hide_default_wallpaper());
        assert!(!device.has_system_feature(SystemFeature::LiveWallpaper));
    }

    #[test]
    fn test_definition_path_resolves_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("wallpapers.xml"),
            r#"<wallpapers><category id="a"/></wallpapers>"#,
        )
        .unwrap();
        let manifest_path = dir.path().join("device.json");
        let mut file = std::fs::File::create(&manifest_path).unwrap();
        write!(
            file,
            r#"{{"partner": {{"package_name": "com.partner", "definition": {{"path": "wallpapers.xml"}}}}}}"#
        )
        .unwrap();

        let device = ManifestDevice::load(&manifest_path).unwrap();
        let definition = device.wallpaper_definition().unwrap();
        assert_eq!(definition.name, "partner_wallpapers");
        assert_eq!(definition.package_name, "com.partner");
        assert!(definition.contents.contains("category"));
    }

    #[test]
    fn test_missing_definition_file_fails() {
        let result = ManifestDevice::from_json(
            r#"{"partner": {"package_name": "com.partner", "definition": {"path": "/nonexistent/wallpapers.xml"}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_setters() {
        let device =
            ManifestDevice::from_json(r#"{"network": "reachable", "locale": "de-DE"}"#).unwrap();
        assert_eq!(device.network_status(), NetworkStatus::Reachable);
        device.set_network_status(NetworkStatus::Unreachable);
        device.set_locale(LocaleTag::new("fr-FR"));
        assert_eq!(device.network_status(), NetworkStatus::Unreachable);
        assert_eq!(device.current_locale().as_str(), "fr-FR");
    }
}
