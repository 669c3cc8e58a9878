use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::StreamExt;

use wallpaper_catalog::current_wallpaper::CurrentWallpaperFactory;
use wallpaper_catalog::device::ManifestDevice;
use wallpaper_catalog::model::sorted_by_priority;
use wallpaper_catalog::{
    category_stream, logging, CatalogConfig, CatalogServices, Category, CategoryKind,
    CategoryProvider, ChannelReceiver, DefaultCategoryProvider,
};

const USAGE: &str = "usage: wallpaper-catalog <device-manifest.json> [config.json]";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let manifest_path = PathBuf::from(args.next().context(USAGE)?);
    let config_path = args.next().map(PathBuf::from);

    let config = CatalogConfig::load_or_default(config_path.as_deref())?;
    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Wallpaper Catalog Starting ===");

    let device = Arc::new(ManifestDevice::load(&manifest_path)?);
    let services = CatalogServices::from_device(device.clone(), config);
    let provider = DefaultCategoryProvider::new(services);

    // Stream the first fetch as it arrives
    let (receiver, events) = ChannelReceiver::new();
    let handle = provider.fetch(Arc::new(receiver), false);

    println!("Categories (arrival order):");
    let mut categories = std::pin::pin!(category_stream(events));
    while let Some(category) = categories.next().await {
        println!("  {}", describe(&category));
    }
    handle.wait().await;

    println!();
    println!("Categories (presentation order):");
    for category in sorted_by_priority(&provider.categories()) {
        println!("  {}", describe(&category));
    }

    let current = CurrentWallpaperFactory::new(device.clone(), device.clone());
    match current.current_wallpapers(false).await {
        Ok(current) => {
            println!();
            println!("Home wallpaper: {:?}", current.home);
            if let Some(lock) = current.lock {
                println!("Lock wallpaper: {:?}", lock);
            }
        }
        Err(e) => tracing::debug!(error = %e, "No current wallpaper to show"),
    }

    tracing::info!(count = provider.size(), "Wallpaper Catalog shutting down");
    Ok(())
}

fn describe(category: &Category) -> String {
    let detail = match category.kind() {
        CategoryKind::Image { .. } => "photo picker".to_string(),
        CategoryKind::Wallpapers { wallpapers } => format!("{} wallpapers", wallpapers.len()),
        CategoryKind::ThirdPartyLiveWallpaper { wallpapers, .. } => {
            format!("{} live wallpapers", wallpapers.len())
        }
        CategoryKind::ThirdPartyApp { component } => format!("app {}", component),
    };
    format!(
        "[{:>3}] {} ({}) - {}",
        category.priority(),
        category.title(),
        category.collection_id(),
        detail
    )
}
