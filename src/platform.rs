//! Collaborator interfaces the catalog consumes
//!
//! The catalog never talks to the OS directly. Network state, locale, feature
//! flags, partner resources and installed packages all come through these traits,
//! so embedders (and tests) decide where the answers come from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ComponentName, WallpaperEntry};

/// Network reachability as seen by the last poll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkStatus {
    #[default]
    NotInitialized,
    Unreachable,
    Reachable,
}

/// BCP-47 style locale tag, e.g. `en-US`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self::new("en-US")
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional platform capabilities queried by the fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemFeature {
    LiveWallpaper,
}

/// Partner-supplied wallpaper definition document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionResource {
    /// Resource name; empty means the partner ships no definition.
    pub name: String,
    pub package_name: String,
    pub contents: String,
}

/// Installed live wallpaper service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveWallpaperService {
    pub component: ComponentName,
    #[serde(default)]
    pub label: Option<String>,
}

/// Installed app that handles "set wallpaper" requests
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperApp {
    pub component: ComponentName,
    pub label: String,
}

impl WallpaperApp {
    pub fn package_name(&self) -> &str {
        &self.component.package_name
    }
}

pub trait NetworkStatusSource: Send + Sync {
    fn network_status(&self) -> NetworkStatus;
}

pub trait LocaleSource: Send + Sync {
    fn current_locale(&self) -> LocaleTag;
}

pub trait FeatureFlags: Send + Sync {
    /// Creative wallpapers push "my photos" further down the list.
    fn is_creative_wallpaper_enabled(&self) -> bool;
}

/// Partner customization package
pub trait PartnerProvider: Send + Sync {
    /// The structured wallpaper definition, if the partner ships one.
    fn wallpaper_definition(&self) -> Option<DefinitionResource>;

    fn should_hide_default_wallpaper(&self) -> bool;

    fn partner_wallpapers(&self) -> Vec<WallpaperEntry>;

    fn legacy_partner_wallpapers(&self) -> Vec<WallpaperEntry>;
}

/// Installed-package queries
pub trait PackageEnumerator: Send + Sync {
    fn has_system_feature(&self, feature: SystemFeature) -> bool;

    fn live_wallpaper_services(&self) -> Vec<LiveWallpaperService>;

    fn wallpaper_apps(&self) -> Vec<WallpaperApp>;

    /// Resolves a live wallpaper component to its installed service.
    fn find_live_wallpaper(&self, component: &ComponentName) -> Option<LiveWallpaperService> {
        self.live_wallpaper_services()
            .into_iter()
            .find(|service| &service.component == component)
    }
}
