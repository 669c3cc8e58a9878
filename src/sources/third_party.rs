//! Third-party wallpaper app enumeration

use std::collections::HashSet;

use crate::config::CatalogConfig;
use crate::model::Category;
use crate::platform::PackageEnumerator;

use super::priority::PRIORITY_THIRD_PARTY;

/// One category per installed wallpaper app, denylisted packages excluded.
///
/// An app exposing several wallpaper activities is listed once, through the first
/// activity reported.
pub fn third_party_app_categories(
    config: &CatalogConfig,
    packages: &dyn PackageEnumerator,
) -> Vec<Category> {
    let mut seen = HashSet::new();
    packages
        .wallpaper_apps()
        .into_iter()
        .filter(|app| {
            if config.is_excluded_third_party(app.package_name()) {
                tracing::trace!(package = app.package_name(), "Skipping excluded wallpaper app");
                return false;
            }
            seen.insert(app.package_name().to_string())
        })
        .map(|app| Category::third_party_app(app.label, PRIORITY_THIRD_PARTY, app.component))
        .collect()
}
