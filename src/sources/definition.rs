//! Partner wallpaper definition reader
//!
//! The partner package ships an XML document shaped like:
//!
//! ```xml
//! <wallpapers>
//!     <category id="nature" title="Nature" priority="3">
//!         <static-wallpaper id="forest" title="Forest" src="forest.jpg"/>
//!         <live-wallpaper packageName="com.example.waves" serviceName=".WaveService"/>
//!     </category>
//! </wallpapers>
//! ```
//!
//! Each finalized category is published as soon as its closing tag is read, so a
//! fetch shows system categories while the rest of the document is still parsed.

use std::collections::{BTreeSet, HashMap};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::model::{
    CategoryRef, ComponentName, WallpaperCategoryBuilder, WallpaperEntry, WallpaperMetadata,
};
use crate::platform::{DefinitionResource, PackageEnumerator};

use super::priority::PRIORITY_SYSTEM;

pub const CATEGORY_TAG: &str = "category";
pub const STATIC_WALLPAPER_TAG: &str = "static-wallpaper";
pub const LIVE_WALLPAPER_TAG: &str = "live-wallpaper";

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("malformed wallpaper definition: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
}

/// Reads the partner definition into system categories.
///
/// `publish` sees every category the moment it is finalized. The returned list is
/// what gets memoized: on a parse error it is empty, even though the categories
/// read before the error have already been published.
pub fn read_system_categories(
    resource: Option<DefinitionResource>,
    packages: &dyn PackageEnumerator,
    publish: &mut dyn FnMut(CategoryRef),
) -> Vec<CategoryRef> {
    let Some(resource) = resource else {
        tracing::debug!("No partner wallpaper definition");
        return Vec::new();
    };
    if resource.name.is_empty() {
        tracing::debug!(package = %resource.package_name, "Partner ships no wallpaper definition");
        return Vec::new();
    }

    let mut walk = DefinitionWalk::new(&resource.package_name, packages);
    match walk.run(&resource.contents, publish) {
        Ok(()) => {
            tracing::info!(
                resource = %resource.name,
                count = walk.categories.len(),
                "System wallpaper definition read"
            );
            walk.categories
        }
        Err(e) => {
            tracing::warn!(
                resource = %resource.name,
                error = %e,
                published = walk.categories.len(),
                "Couldn't read system wallpapers definition"
            );
            Vec::new()
        }
    }
}

struct OpenCategory {
    builder: WallpaperCategoryBuilder,
    depth: usize,
}

struct DefinitionWalk<'a> {
    package_name: &'a str,
    packages: &'a dyn PackageEnumerator,
    depth: usize,
    priority_tracker: i32,
    current: Option<OpenCategory>,
    categories: Vec<CategoryRef>,
}

impl<'a> DefinitionWalk<'a> {
    fn new(package_name: &'a str, packages: &'a dyn PackageEnumerator) -> Self {
        Self {
            package_name,
            packages,
            depth: 0,
            priority_tracker: 0,
            current: None,
            categories: Vec::new(),
        }
    }

    fn run(
        &mut self,
        contents: &str,
        publish: &mut dyn FnMut(CategoryRef),
    ) -> Result<(), DefinitionError> {
        let mut reader = Reader::from_str(contents);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    self.depth += 1;
                    self.open_tag(&start)?;
                }
                Event::Empty(empty) => {
                    self.depth += 1;
                    self.open_tag(&empty)?;
                    self.close_tag(publish);
                }
                Event::End(_) => self.close_tag(publish),
                Event::Eof => break,
                _ => {}
            }
        }

        // End of document closes whatever category is still open.
        if let Some(open) = self.current.take() {
            self.finish(open.builder, publish);
        }
        Ok(())
    }

    fn open_tag(&mut self, tag: &BytesStart<'_>) -> Result<(), DefinitionError> {
        let name = tag.name();
        let name = String::from_utf8_lossy(name.as_ref());

        if self.current.is_none() {
            if name == CATEGORY_TAG {
                let attrs = parse_attributes(tag)?;
                let mut builder = category_builder(&attrs);
                builder.set_priority_if_empty(PRIORITY_SYSTEM + self.priority_tracker);
                self.priority_tracker += 1;
                self.current = Some(OpenCategory {
                    builder,
                    depth: self.depth,
                });
            }
            return Ok(());
        }

        let wallpaper = match &*name {
            STATIC_WALLPAPER_TAG => {
                let attrs = parse_attributes(tag)?;
                self.static_wallpaper(&attrs)
            }
            LIVE_WALLPAPER_TAG => {
                let attrs = parse_attributes(tag)?;
                self.live_wallpaper(&attrs)
            }
            _ => None,
        };
        if let (Some(wallpaper), Some(open)) = (wallpaper, self.current.as_mut()) {
            open.builder.add_wallpaper(wallpaper);
        }
        Ok(())
    }

    fn close_tag(&mut self, publish: &mut dyn FnMut(CategoryRef)) {
        if self
            .current
            .as_ref()
            .is_some_and(|open| open.depth == self.depth)
        {
            if let Some(open) = self.current.take() {
                self.finish(open.builder, publish);
            }
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn finish(&mut self, builder: WallpaperCategoryBuilder, publish: &mut dyn FnMut(CategoryRef)) {
        if builder.id().is_empty() {
            tracing::warn!("Skipping system category without an id");
            return;
        }
        let id = builder.id().to_string();
        match builder.build() {
            Some(category) => {
                let category = CategoryRef::new(category);
                self.categories.push(category.clone());
                publish(category);
            }
            None => tracing::debug!(category = %id, "Dropping system category without wallpapers"),
        }
    }

    fn current_id(&self) -> String {
        self.current
            .as_ref()
            .map(|open| open.builder.id().to_string())
            .unwrap_or_default()
    }

    fn static_wallpaper(&self, attrs: &HashMap<String, String>) -> Option<WallpaperEntry> {
        let Some(wallpaper_id) = attrs.get("id").filter(|id| !id.is_empty()) else {
            tracing::warn!(category = %self.current_id(), "Static wallpaper without an id");
            return None;
        };

        let attributions = ["title", "subtitle1", "subtitle2"]
            .iter()
            .filter_map(|key| attrs.get(*key).cloned())
            .collect();

        Some(WallpaperEntry::SystemStatic {
            package_name: self.package_name.to_string(),
            collection_id: self.current_id(),
            wallpaper_id: wallpaper_id.clone(),
            metadata: WallpaperMetadata {
                title: attrs.get("title").cloned(),
                attributions,
                action_url: attrs.get("actionUrl").cloned(),
                asset: attrs.get("src").cloned(),
            },
        })
    }

    fn live_wallpaper(&self, attrs: &HashMap<String, String>) -> Option<WallpaperEntry> {
        let (Some(package), Some(service)) = (attrs.get("packageName"), attrs.get("serviceName"))
        else {
            tracing::warn!(category = %self.current_id(), "Live wallpaper without a component");
            return None;
        };
        if package.is_empty() || service.is_empty() {
            return None;
        }

        let component = ComponentName::new(package.as_str(), service.as_str());
        let Some(service) = self.packages.find_live_wallpaper(&component) else {
            tracing::debug!(component = %component, "Declared live wallpaper is not installed");
            return None;
        };

        Some(WallpaperEntry::Live {
            component: service.component,
            collection_id: Some(self.current_id()),
            title: attrs.get("title").cloned().or(service.label),
        })
    }
}

fn category_builder(attrs: &HashMap<String, String>) -> WallpaperCategoryBuilder {
    let id = attrs.get("id").cloned().unwrap_or_default();
    let title = attrs.get("title").cloned().unwrap_or_else(|| id.clone());
    let priority = attrs.get("priority").and_then(|raw| match raw.trim().parse::<i32>() {
        Ok(priority) => Some(priority),
        Err(_) => {
            tracing::warn!(
                category = %id,
                priority = %raw,
                "Ignoring unparsable category priority"
            );
            None
        }
    });
    WallpaperCategoryBuilder::new(id, title).with_priority(priority)
}

fn parse_attributes(tag: &BytesStart<'_>) -> Result<HashMap<String, String>, DefinitionError> {
    let mut attrs = HashMap::new();
    for attr in tag.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.to_string();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Collects the packages of every live wallpaper inside the given wallpaper categories.
pub fn live_wallpaper_packages<'a>(
    categories: impl IntoIterator<Item = &'a CategoryRef>,
) -> BTreeSet<String> {
    categories
        .into_iter()
        .filter(|category| category.is_wallpaper_backed())
        .flat_map(|category| category.wallpapers())
        .filter_map(WallpaperEntry::component)
        .map(|component| component.package_name.clone())
        .collect()
}
