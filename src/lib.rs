//! Wallpaper category catalog
//!
//! Discovers the wallpaper categories available on a device (system sets from the
//! partner definition, on-device wallpapers, live wallpapers, third-party apps and
//! a "my photos" entry), streams them to a receiver as they are found, and caches
//! them until the network status or locale changes.
//!
//! - `model`: Category and wallpaper value types
//! - `platform`: Collaborator traits (network, locale, partner, packages)
//! - `sources`: Source readers producing candidate categories
//! - `fetch`: Fixed-order traversal and the memoized system categories
//! - `provider`: Cached provider exposed to the UI
//! - `receiver`: Receiver trait and channel/stream adapters
//! - `current_wallpaper`: Cache of the applied home/lock wallpapers
//! - `device`: JSON manifest implementation of the collaborators
//! - `config`, `logging`, `error`: Ambient plumbing

pub mod config;
pub mod current_wallpaper;
pub mod device;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod platform;
pub mod provider;
pub mod receiver;
pub mod sources;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use fetch::{CatalogServices, FetchCategoriesTask, SystemCategorySet};
pub use model::{Category, CategoryKind, CategoryRef, WallpaperEntry};
pub use provider::{CategoryProvider, DefaultCategoryProvider, FetchHandle};
pub use receiver::{category_stream, CategoryEvent, CategoryReceiver, ChannelReceiver};
