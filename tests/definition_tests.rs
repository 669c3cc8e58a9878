//! Partner definition reader tests.

mod common;

use wallpaper_catalog::device::ManifestDevice;
use wallpaper_catalog::platform::DefinitionResource;
use wallpaper_catalog::sources::priority::PRIORITY_SYSTEM;
use wallpaper_catalog::sources::{live_wallpaper_packages, read_system_categories};
use wallpaper_catalog::{CategoryRef, WallpaperEntry};

use common::TWO_CATEGORY_DEFINITION;

fn resource(contents: &str) -> Option<DefinitionResource> {
    Some(DefinitionResource {
        name: "partner_wallpapers".to_string(),
        package_name: "com.partner".to_string(),
        contents: contents.to_string(),
    })
}

fn packages() -> ManifestDevice {
    ManifestDevice::from_json(
        r#"{"live_wallpapers": [{"component": "com.example.waves/.WaveService", "label": "Waves"}]}"#,
    )
    .unwrap()
}

/// Returns (published, returned) collection ids.
fn read(contents: &str) -> (Vec<CategoryRef>, Vec<CategoryRef>) {
    let mut published = Vec::new();
    let returned = read_system_categories(resource(contents), &packages(), &mut |category| {
        published.push(category)
    });
    (published, returned)
}

fn ids(categories: &[CategoryRef]) -> Vec<&str> {
    categories.iter().map(|c| c.collection_id()).collect()
}

#[test]
fn test_document_order_priorities() {
    let (published, returned) = read(TWO_CATEGORY_DEFINITION);
    assert_eq!(ids(&published), vec!["nature", "cities"]);
    assert_eq!(ids(&returned), ids(&published));
    assert_eq!(returned[0].priority(), PRIORITY_SYSTEM);
    assert_eq!(returned[1].priority(), PRIORITY_SYSTEM + 1);
    assert_eq!(returned[0].title(), "Nature");
}

#[test]
fn test_explicit_priority_still_advances_counter() {
    let (_, returned) = read(
        r#"<wallpapers>
            <category id="a" priority="7"><static-wallpaper id="1"/></category>
            <category id="b"><static-wallpaper id="2"/></category>
        </wallpapers>"#,
    );
    assert_eq!(returned[0].priority(), 7);
    assert_eq!(returned[1].priority(), PRIORITY_SYSTEM + 1);
}

#[test]
fn test_empty_categories_are_discarded_but_counted() {
    let (published, returned) = read(
        r#"<wallpapers>
            <category id="empty"></category>
            <category id="self-closing"/>
            <category id="kept"><static-wallpaper id="1"/></category>
        </wallpapers>"#,
    );
    assert_eq!(ids(&published), vec!["kept"]);
    assert_eq!(returned[0].priority(), PRIORITY_SYSTEM + 2);
}

#[test]
fn test_static_wallpaper_metadata() {
    let (_, returned) = read(TWO_CATEGORY_DEFINITION);
    match &returned[0].wallpapers()[0] {
        WallpaperEntry::SystemStatic {
            package_name,
            collection_id,
            wallpaper_id,
            metadata,
        } => {
            assert_eq!(package_name, "com.partner");
            assert_eq!(collection_id, "nature");
            assert_eq!(wallpaper_id, "forest");
            assert_eq!(metadata.attributions, vec!["Forest", "Photo by A"]);
            assert_eq!(metadata.asset.as_deref(), Some("forest.jpg"));
        }
        other => panic!("unexpected entry {other:?}"),
    }
}

#[test]
fn test_installed_live_wallpaper_uses_service_label() {
    let (_, returned) = read(TWO_CATEGORY_DEFINITION);
    let live = &returned[0].wallpapers()[1];
    assert!(live.is_live());
    assert_eq!(live.title(), Some("Waves"));
    assert_eq!(
        live_wallpaper_packages(&returned),
        ["com.example.waves".to_string()].into_iter().collect()
    );
}

#[test]
fn test_uninstalled_live_wallpaper_is_skipped() {
    let (published, _) = read(
        r#"<wallpapers>
            <category id="only-missing">
                <live-wallpaper packageName="com.example.gone" serviceName=".Gone"/>
            </category>
        </wallpapers>"#,
    );
    assert!(published.is_empty());
}

#[test]
fn test_unknown_tags_are_ignored() {
    let (published, _) = read(
        r#"<wallpapers>
            <banner id="promo"/>
            <category id="a">
                <video-wallpaper id="v"/>
                <static-wallpaper id="1"/>
            </category>
        </wallpapers>"#,
    );
    assert_eq!(ids(&published), vec!["a"]);
    assert_eq!(published[0].wallpapers().len(), 1);
}

#[test]
fn test_category_without_id_is_skipped() {
    let (published, _) = read(
        r#"<wallpapers><category title="Nameless"><static-wallpaper id="1"/></category></wallpapers>"#,
    );
    assert!(published.is_empty());
}

#[test]
fn test_malformed_document_publishes_then_returns_nothing() {
    let (published, returned) = read(
        r#"<wallpapers>
            <category id="first"><static-wallpaper id="1"/></category>
            <category id="second"><static-wallpaper id="2"/></mismatch>
        </wallpapers>"#,
    );
    assert_eq!(ids(&published), vec!["first"]);
    assert!(returned.is_empty());
}

#[test]
fn test_missing_or_unnamed_resource_yields_nothing() {
    let mut published = 0;
    let returned = read_system_categories(None, &packages(), &mut |_| published += 1);
    assert!(returned.is_empty());

    let unnamed = DefinitionResource {
        name: String::new(),
        package_name: "com.partner".to_string(),
        contents: TWO_CATEGORY_DEFINITION.to_string(),
    };
    let returned = read_system_categories(Some(unnamed), &packages(), &mut |_| published += 1);
    assert!(returned.is_empty());
    assert_eq!(published, 0);
}
