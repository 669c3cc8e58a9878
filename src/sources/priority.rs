//! Relative category priorities
//!
//! Lower numbers correspond to higher priorities, i.e. they appear higher in the
//! categories list.

pub const PRIORITY_MY_PHOTOS_WHEN_CREATIVE_WALLPAPERS_DISABLED: i32 = 1;
pub const PRIORITY_MY_PHOTOS_WHEN_CREATIVE_WALLPAPERS_ENABLED: i32 = 51;
pub const PRIORITY_SYSTEM: i32 = 100;
pub const PRIORITY_ON_DEVICE: i32 = 200;
pub const PRIORITY_LIVE: i32 = 300;
pub const PRIORITY_THIRD_PARTY: i32 = 400;

/// Priority of the "my photos" category for the current feature flags.
pub fn my_photos_priority(creative_wallpapers_enabled: bool) -> i32 {
    if creative_wallpapers_enabled {
        PRIORITY_MY_PHOTOS_WHEN_CREATIVE_WALLPAPERS_ENABLED
    } else {
        PRIORITY_MY_PHOTOS_WHEN_CREATIVE_WALLPAPERS_DISABLED
    }
}
