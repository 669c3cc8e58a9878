//! Cache of the wallpapers currently applied to the device

use std::sync::Arc;

use anyhow::Result;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::model::{ComponentName, WallpaperEntry};
use crate::platform::PackageEnumerator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationMode {
    #[default]
    Static,
    /// The wallpaper changes on its own; cached copies go stale immediately.
    Rotating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallpaperDestination {
    Home,
    Lock,
}

/// Raw description of an applied wallpaper, as reported by the refresher
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AppliedWallpaperMetadata {
    Live {
        component: ComponentName,
    },
    Image {
        #[serde(default)]
        attributions: Vec<String>,
        #[serde(default)]
        action_url: Option<String>,
        #[serde(default)]
        collection_id: Option<String>,
    },
}

/// What the refresher found on the device
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshedWallpapers {
    pub home: AppliedWallpaperMetadata,
    #[serde(default)]
    pub lock: Option<AppliedWallpaperMetadata>,
    #[serde(default)]
    pub presentation_mode: PresentationMode,
}

/// Reads the applied wallpapers from the platform
pub trait WallpaperRefresher: Send + Sync {
    fn refresh(&self) -> BoxFuture<'_, Result<RefreshedWallpapers>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurrentWallpaper {
    Live {
        destination: WallpaperDestination,
        wallpaper: WallpaperEntry,
    },
    Image {
        destination: WallpaperDestination,
        attributions: Vec<String>,
        action_url: Option<String>,
        collection_id: Option<String>,
    },
}

impl CurrentWallpaper {
    pub fn destination(&self) -> WallpaperDestination {
        match self {
            CurrentWallpaper::Live { destination, .. }
            | CurrentWallpaper::Image { destination, .. } => *destination,
        }
    }

    pub fn collection_id(&self) -> Option<&str> {
        match self {
            CurrentWallpaper::Live { wallpaper, .. } => match wallpaper {
                WallpaperEntry::Live { collection_id, .. } => collection_id.as_deref(),
                _ => None,
            },
            CurrentWallpaper::Image { collection_id, .. } => collection_id.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentWallpapers {
    pub home: CurrentWallpaper,
    pub lock: Option<CurrentWallpaper>,
    pub presentation_mode: PresentationMode,
}

/// Resolves and caches the currently applied home and lock wallpapers
pub struct CurrentWallpaperFactory {
    refresher: Arc<dyn WallpaperRefresher>,
    packages: Arc<dyn PackageEnumerator>,
    cached: Mutex<Option<CurrentWallpapers>>,
}

impl CurrentWallpaperFactory {
    pub fn new(
        refresher: Arc<dyn WallpaperRefresher>,
        packages: Arc<dyn PackageEnumerator>,
    ) -> Self {
        Self {
            refresher,
            packages,
            cached: Mutex::new(None),
        }
    }

    /// Returns the applied wallpapers, refreshing when forced, when nothing is
    /// cached, or when the presentation mode is rotating.
    pub async fn current_wallpapers(&self, force_refresh: bool) -> Result<CurrentWallpapers> {
        let mut cached = self.cached.lock().await;

        if !force_refresh {
            if let Some(current) = cached.as_ref() {
                if current.presentation_mode != PresentationMode::Rotating {
                    return Ok(current.clone());
                }
            }
        }

        // A failed forced refresh must not leave the old copies behind.
        if force_refresh {
            *cached = None;
        }

        let refreshed = self.refresher.refresh().await?;
        let current = CurrentWallpapers {
            home: self.resolve(refreshed.home, WallpaperDestination::Home),
            lock: refreshed
                .lock
                .map(|lock| self.resolve(lock, WallpaperDestination::Lock)),
            presentation_mode: refreshed.presentation_mode,
        };
        tracing::debug!(
            has_lock = current.lock.is_some(),
            mode = ?current.presentation_mode,
            "Current wallpapers refreshed"
        );

        *cached = Some(current.clone());
        Ok(current)
    }

    pub async fn clear(&self) {
        *self.cached.lock().await = None;
    }

    fn resolve(
        &self,
        metadata: AppliedWallpaperMetadata,
        destination: WallpaperDestination,
    ) -> CurrentWallpaper {
        match metadata {
            AppliedWallpaperMetadata::Live { component } => {
                let title = self
                    .packages
                    .find_live_wallpaper(&component)
                    .and_then(|service| service.label);
                CurrentWallpaper::Live {
                    destination,
                    wallpaper: WallpaperEntry::Live {
                        component,
                        collection_id: None,
                        title,
                    },
                }
            }
            AppliedWallpaperMetadata::Image {
                attributions,
                action_url,
                collection_id,
            } => CurrentWallpaper::Image {
                destination,
                attributions,
                action_url,
                collection_id,
            },
        }
    }
}
