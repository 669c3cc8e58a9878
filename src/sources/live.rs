//! Installed live wallpaper enumeration

use std::collections::BTreeSet;

use crate::config::CategoryLabel;
use crate::model::{Category, CategoryKind, WallpaperEntry};
use crate::platform::{PackageEnumerator, SystemFeature};

use super::priority::PRIORITY_LIVE;

/// Lists installed live wallpapers whose package is not in `excluded`.
pub fn live_wallpapers(
    packages: &dyn PackageEnumerator,
    excluded: &BTreeSet<String>,
) -> Vec<WallpaperEntry> {
    packages
        .live_wallpaper_services()
        .into_iter()
        .filter(|service| !excluded.contains(&service.component.package_name))
        .map(|service| WallpaperEntry::Live {
            component: service.component,
            collection_id: None,
            title: service.label,
        })
        .collect()
}

/// Builds the live wallpaper category.
///
/// `None` when the device has no live wallpaper support or every installed live
/// wallpaper is already part of a system category.
pub fn live_wallpaper_category(
    label: &CategoryLabel,
    packages: &dyn PackageEnumerator,
    excluded: BTreeSet<String>,
) -> Option<Category> {
    if !packages.has_system_feature(SystemFeature::LiveWallpaper) {
        tracing::debug!("Device does not support live wallpapers");
        return None;
    }

    let wallpapers = live_wallpapers(packages, &excluded);
    if wallpapers.is_empty() {
        tracing::debug!(excluded = excluded.len(), "No remaining live wallpapers");
        return None;
    }

    tracing::debug!(count = wallpapers.len(), "Live wallpapers enumerated");
    Some(Category::new(
        label.title.clone(),
        label.collection_id.clone(),
        PRIORITY_LIVE,
        CategoryKind::ThirdPartyLiveWallpaper {
            wallpapers,
            excluded_packages: excluded,
        },
    ))
}
