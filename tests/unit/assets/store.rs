use std::path::PathBuf;

use super::*;

fn tmp_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_store").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn solid(v: u8) -> image::RgbaImage {
    image::RgbaImage::from_pixel(2, 2, image::Rgba([v, v, v, 255]))
}

#[test]
fn day_366_maps_to_365() {
    assert_eq!(overlay_day_for(1), 1);
    assert_eq!(overlay_day_for(200), 200);
    assert_eq!(overlay_day_for(365), 365);
    assert_eq!(overlay_day_for(366), 365);
}

#[test]
fn file_names_are_zero_padded() {
    assert_eq!(overlay_file_name(1), "001.png");
    assert_eq!(overlay_file_name(42), "042.png");
    assert_eq!(overlay_file_name(365), "365.png");
}

#[test]
fn memory_store_fallback_yields_identical_raster() {
    let mut store = MemoryOverlayStore::new();
    store.insert(364, solid(1));
    store.insert(365, solid(2));
    let a = store.load_overlay(overlay_day_for(366)).unwrap();
    let b = store.load_overlay(overlay_day_for(365)).unwrap();
    assert_eq!(a, b);
    assert_eq!(store.len(), 2);
}

#[test]
fn memory_store_missing_day_is_asset_error() {
    let store = MemoryOverlayStore::new();
    assert!(store.is_empty());
    let err = store.load_overlay(12).unwrap_err();
    assert!(matches!(err, YearGridError::Asset(_)));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn dir_store_reads_png_and_reports_missing() {
    let dir = tmp_dir("dir_store");
    solid(77).save(dir.join("365.png")).unwrap();

    let store = DirOverlayStore::new(&dir);
    assert_eq!(store.root(), dir.as_path());
    let img = store.load_overlay(overlay_day_for(366)).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [77, 77, 77, 255]);

    let err = store.load_overlay(1).unwrap_err();
    assert!(matches!(err, YearGridError::Asset(_)));

    let missing = store.missing_days();
    assert_eq!(missing.len(), 364);
    assert_eq!(missing[0], 1);
    let err = store.verify().unwrap_err();
    assert!(err.to_string().contains("001.png"));
}

#[test]
fn dir_store_corrupt_file_is_internal_error() {
    let dir = tmp_dir("corrupt");
    std::fs::write(dir.join("010.png"), b"not a png").unwrap();
    let err = DirOverlayStore::new(&dir).load_overlay(10).unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(format!("{err:#}").contains("decode image"));
}
