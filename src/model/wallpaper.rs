//! Wallpaper entries belonging to wallpaper-backed categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reference to an installed component, written as `package/class`.
///
/// A class starting with `.` is relative to the package, matching the short form
/// used in partner definitions (`com.example/.WaveService`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName {
    pub package_name: String,
    pub class_name: String,
}

impl ComponentName {
    pub fn new(package_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        let package_name = package_name.into();
        let class_name = class_name.into();
        let class_name = match class_name.strip_prefix('.') {
            Some(rest) => format!("{package_name}.{rest}"),
            None => class_name,
        };
        Self {
            package_name,
            class_name,
        }
    }

    pub fn flatten(&self) -> String {
        format!("{}/{}", self.package_name, self.class_name)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package_name, self.class_name)
    }
}

impl FromStr for ComponentName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((package, class)) if !package.is_empty() && !class.is_empty() => {
                Ok(Self::new(package, class))
            }
            _ => Err(format!("invalid component name: {s:?}")),
        }
    }
}

impl TryFrom<String> for ComponentName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentName> for String {
    fn from(value: ComponentName) -> Self {
        value.flatten()
    }
}

/// Preview metadata shared by the static wallpaper kinds
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub attributions: Vec<String>,
    #[serde(default)]
    pub action_url: Option<String>,
    /// Asset reference handed to the preview renderer (resource name or path).
    #[serde(default)]
    pub asset: Option<String>,
}

/// A single selectable wallpaper
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WallpaperEntry {
    /// Static wallpaper declared in the partner definition.
    SystemStatic {
        package_name: String,
        collection_id: String,
        wallpaper_id: String,
        #[serde(flatten)]
        metadata: WallpaperMetadata,
    },
    /// Installed live wallpaper service.
    Live {
        component: ComponentName,
        #[serde(default)]
        collection_id: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
    /// The device's built-in default wallpaper.
    Default,
    /// Wallpaper bundled by the partner package.
    Partner {
        package_name: String,
        #[serde(flatten)]
        metadata: WallpaperMetadata,
    },
    /// Wallpaper exposed through the older partner resource layout.
    LegacyPartner {
        package_name: String,
        #[serde(flatten)]
        metadata: WallpaperMetadata,
    },
    /// App-private wallpaper supplied by the embedding application.
    Private {
        id: String,
        #[serde(flatten)]
        metadata: WallpaperMetadata,
    },
}

impl WallpaperEntry {
    /// Package the wallpaper comes from, `None` for purely local assets.
    pub fn package_name(&self) -> Option<&str> {
        match self {
            WallpaperEntry::SystemStatic { package_name, .. }
            | WallpaperEntry::Partner { package_name, .. }
            | WallpaperEntry::LegacyPartner { package_name, .. } => Some(package_name),
            WallpaperEntry::Live { component, .. } => Some(&component.package_name),
            WallpaperEntry::Default | WallpaperEntry::Private { .. } => None,
        }
    }

    pub fn component(&self) -> Option<&ComponentName> {
        match self {
            WallpaperEntry::Live { component, .. } => Some(component),
            _ => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, WallpaperEntry::Live { .. })
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            WallpaperEntry::SystemStatic { metadata, .. }
            | WallpaperEntry::Partner { metadata, .. }
            | WallpaperEntry::LegacyPartner { metadata, .. }
            | WallpaperEntry::Private { metadata, .. } => metadata.title.as_deref(),
            WallpaperEntry::Live { title, .. } => title.as_deref(),
            WallpaperEntry::Default => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_expands_relative_class() {
        let component: ComponentName = "com.example.waves/.WaveService".parse().unwrap();
        assert_eq!(component.package_name, "com.example.waves");
        assert_eq!(component.class_name, "com.example.waves.WaveService");
        assert_eq!(
            component.to_string(),
            "com.example.waves/com.example.waves.WaveService"
        );
    }

    #[test]
    fn test_component_name_rejects_missing_class() {
        assert!("com.example.waves".parse::<ComponentName>().is_err());
        assert!("com.example.waves/".parse::<ComponentName>().is_err());
    }

    #[test]
    fn test_package_name_by_kind() {
        let live = WallpaperEntry::Live {
            component: ComponentName::new("com.example.waves", ".WaveService"),
            collection_id: None,
            title: None,
        };
        assert_eq!(live.package_name(), Some("com.example.waves"));
        assert!(live.component().is_some());
        assert_eq!(WallpaperEntry::Default.package_name(), None);
    }

    #[test]
    fn test_entry_deserializes_from_manifest_json() {
        let entry: WallpaperEntry = serde_json::from_str(
            r#"{"kind": "partner", "package_name": "com.partner", "title": "Dunes", "asset": "dunes.png"}"#,
        )
        .unwrap();
        assert_eq!(entry.package_name(), Some("com.partner"));
        assert_eq!(entry.title(), Some("Dunes"));
    }
}
