use super::*;

#[test]
fn default_layout_is_20_by_19() {
    let spec = GridSpec::default();
    spec.validate().unwrap();
    assert_eq!(spec.columns, 20);
    assert_eq!(spec.rows(), 19);
    assert!(spec.columns * spec.rows() >= 365);
    assert_eq!(spec.canvas(), Resolution::new(1290, 2796).unwrap());
}

#[test]
fn spacing_divides_extent_by_gaps() {
    let spec = GridSpec::default();
    assert_eq!(spec.grid_width(), 960);
    assert_eq!(spec.h_spacing(), (960.0f64 / 19.0).round() as u32);
    assert_eq!(spec.v_spacing(), (1440.0f64 / 18.0).round() as u32);
}

#[test]
fn dot_centers_are_row_major() {
    let spec = GridSpec::default();
    let first = spec.dot_center(0);
    assert_eq!((first.x, first.y), (165.0, 760.0));

    let second = spec.dot_center(1);
    assert_eq!(second.x - first.x, f64::from(spec.h_spacing()));
    assert_eq!(second.y, first.y);

    let next_row = spec.dot_center(20);
    assert_eq!(next_row.x, first.x);
    assert_eq!(next_row.y - first.y, f64::from(spec.v_spacing()));

    let last = spec.dot_center(364);
    assert_eq!(last.y, f64::from(spec.grid_top + 18 * spec.v_spacing()));
    assert_eq!(last.x, f64::from(spec.left_margin + 4 * spec.h_spacing()));
}

#[test]
fn every_dot_stays_on_canvas() {
    let spec = GridSpec::default();
    for i in 0..spec.total_slots {
        let p = spec.dot_center(i);
        assert!(p.x - spec.dot_radius >= 0.0);
        assert!(p.x + spec.dot_radius <= f64::from(spec.canvas_width));
        assert!(p.y + spec.dot_radius <= f64::from(spec.canvas_height));
    }
}

#[test]
fn fill_predicate_is_strict_prefix() {
    for i in 0..365 {
        assert!(!GridSpec::is_filled(i, 0));
        assert!(GridSpec::is_filled(i, 365));
    }
    assert!(GridSpec::is_filled(99, 100));
    assert!(!GridSpec::is_filled(100, 100));
}

#[test]
fn palette_depends_on_mode() {
    let overlay = GridSpec::for_mode(GridMode::Overlay);
    assert_eq!(overlay.canvas_fill(), None);
    let empty = overlay.dot_color(10, 0);
    assert_eq!((empty.r, empty.g, empty.b), (255, 255, 255));
    assert!(empty.a < 128);
    assert_eq!(overlay.dot_color(0, 1), overlay.filled_color);

    let opaque = GridSpec::for_mode(GridMode::OpaqueCanvas);
    assert_eq!(opaque.canvas_fill(), Some(Rgba8::opaque(255, 255, 255)));
    assert_eq!(opaque.dot_color(10, 0).a, 255);
}

#[test]
fn validate_rejects_broken_layouts() {
    let mut s = GridSpec::default();
    s.columns = 10;
    s.total_slots = 365;
    // 10 columns -> 37 rows; still valid capacity but grid must fit.
    s.validate().unwrap();

    let mut s = GridSpec::default();
    s.total_slots = 300;
    assert!(s.validate().is_err());

    let mut s = GridSpec::default();
    s.left_margin = 700;
    s.right_margin = 700;
    assert!(s.validate().is_err());

    let mut s = GridSpec::default();
    s.grid_height = 3000;
    assert!(s.validate().is_err());

    let mut s = GridSpec::default();
    s.dot_radius = f64::NAN;
    assert!(s.validate().is_err());
}

#[test]
fn spec_deserializes_with_defaults() {
    let s: GridSpec = serde_json::from_str(r#"{ "mode": "opaque_canvas", "dot_radius": 12.0 }"#)
        .unwrap();
    assert_eq!(s.mode, GridMode::OpaqueCanvas);
    assert_eq!(s.dot_radius, 12.0);
    assert_eq!(s.columns, 20);
}
