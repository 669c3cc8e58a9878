//! Drives the source readers in their fixed order

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::model::CategoryRef;
use crate::receiver::CategoryReceiver;
use crate::sources::{
    live_wallpaper_category, live_wallpaper_packages, my_photos_category, on_device_category,
    third_party_app_categories,
};

use super::CatalogServices;

/// Runs one full category traversal against the shared services
#[derive(Clone)]
pub struct FetchCategoriesTask {
    services: CatalogServices,
}

impl FetchCategoriesTask {
    pub fn new(services: CatalogServices) -> Self {
        Self { services }
    }

    /// Publishes every category in order, then signals completion.
    ///
    /// Steps: my photos, system categories, on-device wallpapers, live wallpapers,
    /// third-party apps. A step that has nothing to contribute is skipped; none of
    /// them can stop the ones after it. Collection ids already published during this
    /// run are dropped.
    #[tracing::instrument(name = "fetch_categories", skip_all)]
    pub async fn run(&self, receiver: Arc<dyn CategoryReceiver>) {
        let started = Instant::now();
        let services = &self.services;
        let config = services.config.as_ref();

        let mut published_ids = HashSet::new();
        let mut count = 0usize;
        let receiver_ref = receiver.as_ref();
        let mut publish = |category: CategoryRef| {
            if !published_ids.insert(category.collection_id().to_string()) {
                tracing::warn!(
                    collection_id = category.collection_id(),
                    "Dropping category with duplicate collection id"
                );
                return;
            }
            count += 1;
            receiver_ref.on_category_received(category);
        };

        // "My photos" wallpapers
        let creative = services.flags.is_creative_wallpaper_enabled();
        publish(Arc::new(my_photos_category(&config.labels, creative)));

        let system = services
            .system_categories
            .publish(
                services.partner.as_ref(),
                services.packages.as_ref(),
                &mut publish,
            )
            .await;
        let excluded_live_packages = live_wallpaper_packages(system);

        if let Some(category) = on_device_category(
            &config.labels.on_device,
            services.partner.as_ref(),
            &services.private_wallpapers,
        ) {
            publish(Arc::new(category));
        }

        if let Some(category) = live_wallpaper_category(
            &config.labels.live_wallpapers,
            services.packages.as_ref(),
            excluded_live_packages,
        ) {
            publish(Arc::new(category));
        }

        for category in third_party_app_categories(config, services.packages.as_ref()) {
            publish(Arc::new(category));
        }

        tracing::info!(
            count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Done fetching categories"
        );
        receiver.done_fetching_categories();
    }
}
