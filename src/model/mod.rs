//! Model module - Category and wallpaper value types
//!
//! Everything here is immutable once built and shared through `Arc`.
//! It is organized into submodules by responsibility:
//!
//! - `category`: Categories, their kinds, and the wallpaper category builder
//! - `wallpaper`: Wallpaper entries and component references

mod category;
mod wallpaper;

pub use category::{
    sorted_by_priority, Category, CategoryKind, CategoryRef, WallpaperCategoryBuilder,
};

pub use wallpaper::{ComponentName, WallpaperEntry, WallpaperMetadata};
