use super::*;
use crate::grid::spec::GridMode;

fn small_spec(mode: GridMode) -> GridSpec {
    GridSpec {
        canvas_width: 240,
        canvas_height: 320,
        left_margin: 20,
        right_margin: 20,
        grid_top: 40,
        grid_height: 216,
        dot_radius: 4.0,
        ..GridSpec::for_mode(mode)
    }
}

fn center_px(spec: &GridSpec, frame: &FrameRGBA, i: u32) -> [u8; 4] {
    let p = spec.dot_center(i);
    frame.pixel(p.x as u32, p.y as u32).unwrap()
}

fn is_filled_px(px: [u8; 4]) -> bool {
    px[3] >= 250 && px[0] < 40
}

fn is_empty_overlay_px(px: [u8; 4]) -> bool {
    (80..=100).contains(&px[3]) && px[0].abs_diff(px[3]) <= 3
}

#[test]
fn zero_filled_renders_all_empty() {
    let spec = small_spec(GridMode::Overlay);
    let frame = render_dot_grid(&spec, 0).unwrap();
    for i in 0..365 {
        assert!(is_empty_overlay_px(center_px(&spec, &frame, i)), "dot {i}");
    }
}

#[test]
fn all_filled_renders_all_filled() {
    let spec = small_spec(GridMode::Overlay);
    let frame = render_dot_grid(&spec, 365).unwrap();
    for i in 0..365 {
        assert!(is_filled_px(center_px(&spec, &frame, i)), "dot {i}");
    }
}

#[test]
fn dot_is_filled_iff_index_below_count() {
    let spec = small_spec(GridMode::Overlay);
    for filled in [1u32, 59, 183, 364] {
        let frame = render_dot_grid(&spec, filled).unwrap();
        for i in 0..365 {
            let px = center_px(&spec, &frame, i);
            if i < filled {
                assert!(is_filled_px(px), "filled={filled} dot {i} {px:?}");
            } else {
                assert!(is_empty_overlay_px(px), "filled={filled} dot {i} {px:?}");
            }
        }
    }
}

#[test]
fn overlay_mode_leaves_gaps_transparent() {
    let spec = small_spec(GridMode::Overlay);
    let frame = render_dot_grid(&spec, 200).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
    let a = spec.dot_center(0);
    let b = spec.dot_center(1);
    let mid_x = ((a.x + b.x) / 2.0) as u32;
    assert_eq!(frame.pixel(mid_x, a.y as u32), Some([0, 0, 0, 0]));
}

#[test]
fn opaque_mode_paints_white_canvas() {
    let spec = small_spec(GridMode::OpaqueCanvas);
    let frame = render_dot_grid(&spec, 10).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
    let empty = center_px(&spec, &frame, 300);
    assert_eq!(empty[3], 255);
    assert!(empty[0] > 180 && empty[0] < 240);
    assert!(is_filled_px(center_px(&spec, &frame, 0)));
}

#[test]
fn reference_canvas_renders_at_full_size() {
    let spec = GridSpec::default();
    let frame = render_dot_grid(&spec, 42).unwrap();
    assert_eq!((frame.width, frame.height), (1290, 2796));
    assert!(is_filled_px(center_px(&spec, &frame, 41)));
    assert!(is_empty_overlay_px(center_px(&spec, &frame, 42)));
}

#[test]
fn filled_count_above_slots_is_rejected() {
    let spec = small_spec(GridMode::Overlay);
    assert!(render_dot_grid(&spec, 366).is_err());
}

#[test]
fn rendering_is_deterministic() {
    let spec = small_spec(GridMode::Overlay);
    let a = render_dot_grid(&spec, 77).unwrap();
    let b = render_dot_grid(&spec, 77).unwrap();
    assert_eq!(a, b);
}
