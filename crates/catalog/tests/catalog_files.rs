use std::fs;

use catalog::{Catalog, CatalogError};
use shared::domain::{PartId, View};

#[test]
fn loads_json_catalog_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{
            "parts": [
                {"id": 4, "name": "Seat", "back_position": {"x": 10.0, "y": 20.0},
                 "media": {"kind": "video", "src": "/seat.mp4"}}
            ],
            "features": [
                {"icon": "*", "title": "Levelling", "description": "Keeps level"}
            ]
        }"#,
    )
    .expect("write catalog");

    let catalog = Catalog::load(&path).expect("load json");
    assert_eq!(catalog.visible_count(View::Back), 1);
    assert_eq!(catalog.visible_count(View::Front), 0);
    let seat = catalog.part(PartId(4)).expect("seat");
    assert!(seat.media.as_ref().is_some_and(|m| m.is_video()));
}

#[test]
fn rejects_unknown_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.yaml");
    fs::write(&path, "parts: []").expect("write catalog");

    assert!(matches!(
        Catalog::load(&path),
        Err(CatalogError::UnsupportedFormat(_))
    ));
}

#[test]
fn reports_missing_file_with_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.toml");

    let err = Catalog::load(&path).expect_err("missing file");
    assert!(err.to_string().contains("missing.toml"));
}
