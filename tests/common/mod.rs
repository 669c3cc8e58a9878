//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use wallpaper_catalog::device::ManifestDevice;
use wallpaper_catalog::model::WallpaperEntry;
use wallpaper_catalog::platform::{DefinitionResource, PartnerProvider};
use wallpaper_catalog::{
    CatalogConfig, CatalogServices, CategoryEvent, CategoryProvider, ChannelReceiver,
    DefaultCategoryProvider,
};

/// Partner definition with two undeclared-priority categories and one live wallpaper.
pub const TWO_CATEGORY_DEFINITION: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<wallpapers>
    <category id="nature" title="Nature">
        <static-wallpaper id="forest" title="Forest" subtitle1="Photo by A" src="forest.jpg"/>
        <live-wallpaper packageName="com.example.waves" serviceName=".WaveService"/>
    </category>
    <category id="cities" title="Cities">
        <static-wallpaper id="skyline" title="Skyline"/>
    </category>
</wallpapers>
"#;

pub fn device_json(definition: Option<&str>, extra: &str) -> String {
    let partner = match definition {
        Some(xml) => format!(
            r#""partner": {{"package_name": "com.partner", "definition": {{"inline": {}}}}},"#,
            serde_json::to_string(xml).unwrap()
        ),
        None => String::new(),
    };
    format!(r#"{{{partner} "network": "reachable", "locale": "en-US" {extra}}}"#)
}

pub fn device(definition: Option<&str>, extra: &str) -> Arc<ManifestDevice> {
    Arc::new(ManifestDevice::from_json(&device_json(definition, extra)).unwrap())
}

pub fn provider_for(device: Arc<ManifestDevice>) -> DefaultCategoryProvider {
    DefaultCategoryProvider::new(CatalogServices::from_device(device, CatalogConfig::default()))
}

/// Counts how often the partner definition is requested, i.e. how often it is parsed.
pub struct CountingPartner {
    pub device: Arc<ManifestDevice>,
    pub definition_reads: AtomicUsize,
    /// Blocks every definition read, keeping the first parse in progress.
    pub read_delay: Duration,
}

impl CountingPartner {
    pub fn new(device: Arc<ManifestDevice>) -> Arc<Self> {
        Self::slow(device, Duration::ZERO)
    }

    pub fn slow(device: Arc<ManifestDevice>, read_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            device,
            definition_reads: AtomicUsize::new(0),
            read_delay,
        })
    }

    pub fn reads(&self) -> usize {
        self.definition_reads.load(Ordering::SeqCst)
    }
}

impl PartnerProvider for CountingPartner {
    fn wallpaper_definition(&self) -> Option<DefinitionResource> {
        self.definition_reads.fetch_add(1, Ordering::SeqCst);
        if !self.read_delay.is_zero() {
            std::thread::sleep(self.read_delay);
        }
        self.device.wallpaper_definition()
    }

    fn should_hide_default_wallpaper(&self) -> bool {
        self.device.should_hide_default_wallpaper()
    }

    fn partner_wallpapers(&self) -> Vec<WallpaperEntry> {
        self.device.partner_wallpapers()
    }

    fn legacy_partner_wallpapers(&self) -> Vec<WallpaperEntry> {
        self.device.legacy_partner_wallpapers()
    }
}

/// Result of one fetch as seen by its receiver
pub struct FetchOutcome {
    pub ids: Vec<String>,
    pub done_count: usize,
    pub from_cache: bool,
}

pub async fn fetch(provider: &DefaultCategoryProvider, force_refresh: bool) -> FetchOutcome {
    let (receiver, events) = ChannelReceiver::new();
    let handle = provider.fetch(Arc::new(receiver), force_refresh);
    let from_cache = handle.is_cached();
    handle.wait().await;
    outcome(events.collect::<Vec<_>>().await, from_cache)
}

pub fn outcome(events: Vec<CategoryEvent>, from_cache: bool) -> FetchOutcome {
    let mut ids = Vec::new();
    let mut done_count = 0;
    for event in events {
        match event {
            CategoryEvent::Received(category) => {
                assert_eq!(done_count, 0, "category delivered after done");
                ids.push(category.collection_id().to_string());
            }
            CategoryEvent::Done => done_count += 1,
        }
    }
    FetchOutcome {
        ids,
        done_count,
        from_cache,
    }
}
