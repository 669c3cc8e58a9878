//! Category types and the wallpaper category builder

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use super::wallpaper::{ComponentName, WallpaperEntry};

/// Shared handle to an immutable category.
///
/// The same instance is held by the system category set, the provider cache and
/// whatever receiver it was delivered to.
pub type CategoryRef = Arc<Category>;

/// The closed set of category kinds
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CategoryKind {
    /// Pick an image from the user's photos.
    Image { overlay_icon: Option<String> },
    /// System or on-device wallpapers.
    Wallpapers { wallpapers: Vec<WallpaperEntry> },
    /// Installed live wallpapers not already listed elsewhere.
    ThirdPartyLiveWallpaper {
        wallpapers: Vec<WallpaperEntry>,
        excluded_packages: BTreeSet<String>,
    },
    /// An installed app that can set wallpapers on its own.
    ThirdPartyApp { component: ComponentName },
}

/// A named, prioritized grouping of wallpapers or wallpaper-producing apps
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    title: String,
    collection_id: String,
    priority: i32,
    kind: CategoryKind,
}

impl Category {
    pub fn new(
        title: impl Into<String>,
        collection_id: impl Into<String>,
        priority: i32,
        kind: CategoryKind,
    ) -> Self {
        Self {
            title: title.into(),
            collection_id: collection_id.into(),
            priority,
            kind,
        }
    }

    pub fn image(
        title: impl Into<String>,
        collection_id: impl Into<String>,
        priority: i32,
        overlay_icon: Option<String>,
    ) -> Self {
        Self::new(title, collection_id, priority, CategoryKind::Image { overlay_icon })
    }

    pub fn wallpaper_backed(
        title: impl Into<String>,
        collection_id: impl Into<String>,
        priority: i32,
        wallpapers: Vec<WallpaperEntry>,
    ) -> Self {
        Self::new(title, collection_id, priority, CategoryKind::Wallpapers { wallpapers })
    }

    pub fn third_party_app(
        title: impl Into<String>,
        priority: i32,
        component: ComponentName,
    ) -> Self {
        // Apps are keyed by package; the provider looks them up that way.
        let collection_id = component.package_name.clone();
        Self::new(
            title,
            collection_id,
            priority,
            CategoryKind::ThirdPartyApp { component },
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn kind(&self) -> &CategoryKind {
        &self.kind
    }

    /// Wallpapers carried by wallpaper-backed kinds; empty for the others.
    pub fn wallpapers(&self) -> &[WallpaperEntry] {
        match &self.kind {
            CategoryKind::Wallpapers { wallpapers }
            | CategoryKind::ThirdPartyLiveWallpaper { wallpapers, .. } => wallpapers,
            CategoryKind::Image { .. } | CategoryKind::ThirdPartyApp { .. } => &[],
        }
    }

    /// True for system and on-device wallpaper categories.
    pub fn is_wallpaper_backed(&self) -> bool {
        matches!(self.kind, CategoryKind::Wallpapers { .. })
    }
}

/// Returns the categories in presentation order.
///
/// The provider keeps arrival order; display code sorts with this. The sort is
/// stable so categories sharing a priority stay in arrival order.
pub fn sorted_by_priority(categories: &[CategoryRef]) -> Vec<CategoryRef> {
    let mut sorted = categories.to_vec();
    sorted.sort_by_key(|category| category.priority());
    sorted
}

/// Incrementally assembles a wallpaper category from a partner definition
#[derive(Debug, Default)]
pub struct WallpaperCategoryBuilder {
    id: String,
    title: String,
    priority: Option<i32>,
    wallpapers: Vec<WallpaperEntry>,
}

impl WallpaperCategoryBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: Option<i32>) -> Self {
        self.priority = priority;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Applies `priority` unless the definition already declared one.
    pub fn set_priority_if_empty(&mut self, priority: i32) {
        if self.priority.is_none() {
            self.priority = Some(priority);
        }
    }

    pub fn add_wallpaper(&mut self, wallpaper: WallpaperEntry) {
        self.wallpapers.push(wallpaper);
    }

    /// Finalizes the category, or `None` when no wallpaper was accumulated.
    pub fn build(self) -> Option<Category> {
        if self.wallpapers.is_empty() {
            return None;
        }
        Some(Category::wallpaper_backed(
            self.title,
            self.id,
            self.priority.unwrap_or_default(),
            self.wallpapers,
        ))
    }
}
