use super::*;
use crate::assets::store::{DirOverlayStore, OverlaySource as _};

fn small_spec(mode: GridMode) -> GridSpec {
    GridSpec {
        canvas_width: 120,
        canvas_height: 200,
        left_margin: 10,
        right_margin: 10,
        grid_top: 20,
        grid_height: 144,
        dot_radius: 2.0,
        ..GridSpec::for_mode(mode)
    }
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_generate").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn px(img: &image::RgbaImage, spec: &GridSpec, i: u32) -> [u8; 4] {
    let p = spec.dot_center(i);
    img.get_pixel(p.x as u32, p.y as u32).0
}

#[test]
fn day_n_fills_exactly_n_dots_over_background() {
    let spec = small_spec(GridMode::Overlay);
    let bg = image::RgbaImage::from_pixel(60, 100, image::Rgba([0, 90, 180, 255]));
    let generator = OverlayGenerator::new(spec.clone(), Some(&bg)).unwrap();

    let img = generator.render_day(100).unwrap();
    assert_eq!(img.dimensions(), (120, 200));
    assert_eq!(img.get_pixel(0, 0).0, [0, 90, 180, 255]);
    assert!(px(&img, &spec, 99)[0] < 40);
    let empty = px(&img, &spec, 100);
    // Translucent white lifts the background.
    assert!(empty[0] > 60 && empty[2] > 180);
    assert_eq!(empty[3], 255);
}

#[test]
fn opaque_mode_ignores_background() {
    let spec = small_spec(GridMode::OpaqueCanvas);
    let bg = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 0, 0, 255]));
    let generator = OverlayGenerator::new(spec, Some(&bg)).unwrap();
    let img = generator.render_day(1).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn missing_background_uses_fallback_fill() {
    let generator = OverlayGenerator::new(small_spec(GridMode::Overlay), None).unwrap();
    let img = generator.render_day(5).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, FALLBACK_BACKGROUND.to_array());
}

#[test]
fn out_of_range_days_are_rejected() {
    let generator = OverlayGenerator::new(small_spec(GridMode::Overlay), None).unwrap();
    assert!(generator.render_day(0).is_err());
    assert!(generator.render_day(366).is_err());
    assert!(generator.render_day(365).is_ok());
}

#[test]
fn generate_all_writes_365_files_and_reruns_identically() {
    let generator = OverlayGenerator::new(small_spec(GridMode::Overlay), None).unwrap();
    let seq_dir = out_dir("sequential");
    let stats = generator
        .generate_all(&seq_dir, &GeneratorOpts::default())
        .unwrap();
    assert_eq!(stats.written, 365);
    assert_eq!(stats.mode, GridMode::Overlay);

    let store = DirOverlayStore::new(&seq_dir);
    store.verify().unwrap();
    assert!(!seq_dir.join("366.png").exists());

    let par_dir = out_dir("parallel");
    generator
        .generate_all(
            &par_dir,
            &GeneratorOpts {
                parallel: true,
                threads: Some(2),
            },
        )
        .unwrap();
    for day in [1u32, 64, 200, 365] {
        let a = std::fs::read(seq_dir.join(overlay_file_name(day))).unwrap();
        let b = std::fs::read(par_dir.join(overlay_file_name(day))).unwrap();
        assert_eq!(a, b, "day {day}");
    }

    let before = std::fs::read(seq_dir.join("123.png")).unwrap();
    generator
        .generate_all(&seq_dir, &GeneratorOpts::default())
        .unwrap();
    assert_eq!(std::fs::read(seq_dir.join("123.png")).unwrap(), before);

    let loaded = store.load_overlay(42).unwrap();
    assert_eq!(loaded, generator.render_day(42).unwrap());
}

#[test]
fn render_all_fills_memory_store() {
    let generator = OverlayGenerator::new(small_spec(GridMode::OpaqueCanvas), None).unwrap();
    let store = generator.render_all().unwrap();
    assert_eq!(store.len(), 365);
    assert_eq!(generator.spec().mode, GridMode::OpaqueCanvas);
}
