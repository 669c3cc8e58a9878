//! On-device wallpaper aggregation

use crate::config::CategoryLabel;
use crate::model::{Category, WallpaperEntry};
use crate::platform::PartnerProvider;

use super::priority::PRIORITY_ON_DEVICE;

/// Builds the category combining the default, bundled and legacy partner wallpapers.
///
/// Order is fixed: default wallpaper (unless the partner hides it), partner
/// wallpapers, legacy partner wallpapers, then `private_wallpapers`. Returns `None`
/// when all of them are empty.
pub fn on_device_category(
    label: &CategoryLabel,
    partner: &dyn PartnerProvider,
    private_wallpapers: &[WallpaperEntry],
) -> Option<Category> {
    let mut wallpapers = Vec::new();

    if !partner.should_hide_default_wallpaper() {
        wallpapers.push(WallpaperEntry::Default);
    }
    wallpapers.extend(partner.partner_wallpapers());
    wallpapers.extend(partner.legacy_partner_wallpapers());
    wallpapers.extend_from_slice(private_wallpapers);

    if wallpapers.is_empty() {
        tracing::debug!("No on-device wallpapers");
        return None;
    }

    tracing::debug!(count = wallpapers.len(), "On-device wallpapers collected");
    Some(Category::wallpaper_backed(
        label.title.clone(),
        label.collection_id.clone(),
        PRIORITY_ON_DEVICE,
        wallpapers,
    ))
}
