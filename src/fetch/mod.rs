//! Fetch module - Category traversal and the shared services it reads from
//!
//! - `orchestrator`: The fixed-order traversal over all sources
//! - `system_set`: Memoized partner definition categories

mod orchestrator;
mod system_set;

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::config::CatalogConfig;
use crate::model::WallpaperEntry;
use crate::platform::{
    FeatureFlags, LocaleSource, NetworkStatusSource, PackageEnumerator, PartnerProvider,
};

pub use orchestrator::FetchCategoriesTask;
pub use system_set::SystemCategorySet;

/// Everything a fetch reads from, passed explicitly instead of through globals
#[derive(Clone)]
pub struct CatalogServices {
    pub config: Arc<CatalogConfig>,
    pub network: Arc<dyn NetworkStatusSource>,
    pub locale: Arc<dyn LocaleSource>,
    pub flags: Arc<dyn FeatureFlags>,
    pub partner: Arc<dyn PartnerProvider>,
    pub packages: Arc<dyn PackageEnumerator>,
    pub system_categories: Arc<SystemCategorySet>,
    /// App-private wallpapers appended to the on-device category.
    pub private_wallpapers: Arc<Vec<WallpaperEntry>>,
    /// Runtime fetches are spawned on; the caller's current runtime when `None`.
    pub runtime: Option<Handle>,
}

impl CatalogServices {
    /// Wires every collaborator to one object implementing all of them.
    pub fn from_device<D>(device: Arc<D>, config: CatalogConfig) -> Self
    where
        D: NetworkStatusSource
            + LocaleSource
            + FeatureFlags
            + PartnerProvider
            + PackageEnumerator
            + 'static,
    {
        Self {
            config: Arc::new(config),
            network: device.clone(),
            locale: device.clone(),
            flags: device.clone(),
            partner: device.clone(),
            packages: device,
            system_categories: Arc::new(SystemCategorySet::new()),
            private_wallpapers: Arc::new(Vec::new()),
            runtime: Handle::try_current().ok(),
        }
    }

    /// Shares an existing system category set, e.g. with another provider.
    pub fn with_system_categories(mut self, system_categories: Arc<SystemCategorySet>) -> Self {
        self.system_categories = system_categories;
        self
    }

    /// Pins fetches to `runtime`, so `fetch` can be called from threads outside it.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_private_wallpapers(mut self, wallpapers: Vec<WallpaperEntry>) -> Self {
        self.private_wallpapers = Arc::new(wallpapers);
        self
    }
}
