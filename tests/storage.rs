use std::path::PathBuf;

use listing_studio::store::{self, SAVED_PRODUCT_KEY};
use listing_studio::tests::util::sample_input;
use listing_studio::{
    CompetitorInput, FileStore, ImageAttachment, KeyValueStore, MemoryStore, StorageError,
};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("listing-studio-it-{name}-{}", std::process::id()))
}

#[test]
fn round_trip_through_files_drops_image() {
    let dir = temp_dir("round-trip");
    let mut backing = FileStore::new(&dir);

    let mut input = sample_input();
    input.cost_price = Some("3800".into());
    input.image = Some(ImageAttachment::new("image/png", vec![1, 2, 3]));
    store::save_product(&mut backing, &input).unwrap();
    assert!(store::has_saved_product(&backing).unwrap());

    let loaded = store::load_product(&FileStore::new(&dir)).unwrap().unwrap();
    assert_eq!(loaded.image, None);
    assert_eq!(loaded.competitors, input.competitors);
    assert_eq!(loaded.cost_price.as_deref(), Some("3800"));
    assert_eq!(loaded.oem_label_data, input.oem_label_data);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn saving_overwrites_previous_slot() {
    let mut backing = MemoryStore::new();
    let mut input = sample_input();
    store::save_product(&mut backing, &input).unwrap();

    input.remove_competitor(0);
    store::save_product(&mut backing, &input).unwrap();
    let loaded = store::load_product(&backing).unwrap().unwrap();
    assert_eq!(loaded.competitors, vec![CompetitorInput::new("Evetech", "5150")]);
}

#[test]
fn legacy_shape_is_converted() {
    let mut backing = MemoryStore::new();
    backing
        .set(
            SAVED_PRODUCT_KEY,
            r#"{"oem_label_data":{"brand":"Lenovo"},"price":"4999","competitor_pricing_data":"Takealot: 5500, Evetech: 5150"}"#,
        )
        .unwrap();

    let loaded = store::load_product(&backing).unwrap().unwrap();
    assert_eq!(loaded.oem_label_data.brand, "Lenovo");
    assert_eq!(
        loaded.competitors,
        vec![
            CompetitorInput::new("Takealot", "5500"),
            CompetitorInput::new("Evetech", "5150"),
        ]
    );
}

#[test]
fn unreadable_slot_is_reported_not_hidden() {
    let dir = temp_dir("unreadable");
    std::fs::create_dir_all(dir.join(format!("{SAVED_PRODUCT_KEY}.json"))).unwrap();
    let backing = FileStore::new(&dir);

    let err = store::has_saved_product(&backing).unwrap_err();
    assert!(matches!(err, StorageError::Read(_)));
    let err = store::load_product(&backing).unwrap_err();
    assert_eq!(err.user_message(), "Could not load product data.");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn corrupt_slot_reports_load_message() {
    let mut backing = MemoryStore::new();
    backing.set(SAVED_PRODUCT_KEY, "not json at all").unwrap();
    let err = store::load_product(&backing).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt(_)));
    assert_eq!(
        err.user_message(),
        "Could not load product data. It may be corrupted."
    );
}
