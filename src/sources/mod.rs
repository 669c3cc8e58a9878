//! Source readers - Independent producers of candidate categories
//!
//! - `definition`: Partner XML definition (system categories)
//! - `on_device`: Default, partner and legacy partner wallpapers
//! - `live`: Installed live wallpapers
//! - `third_party`: Installed wallpaper apps
//! - `priority`: Relative category priorities

pub mod definition;
pub mod live;
pub mod on_device;
pub mod priority;
pub mod third_party;

use crate::config::CategoryLabels;
use crate::model::Category;

pub use definition::{live_wallpaper_packages, read_system_categories};
pub use live::live_wallpaper_category;
pub use on_device::on_device_category;
pub use third_party::third_party_app_categories;

/// The synthetic "my photos" category.
pub fn my_photos_category(labels: &CategoryLabels, creative_wallpapers_enabled: bool) -> Category {
    Category::image(
        labels.my_photos.title.clone(),
        labels.my_photos.collection_id.clone(),
        priority::my_photos_priority(creative_wallpapers_enabled),
        labels.my_photos_overlay_icon.clone(),
    )
}
