use super::*;

#[test]
fn resolution_rejects_zero_and_formats() {
    assert!(Resolution::new(0, 10).is_err());
    assert!(Resolution::new(10, 0).is_err());
    let r = Resolution::new(1290, 2796).unwrap();
    assert_eq!(r.to_string(), "1290x2796");
    assert_eq!(r.rgba_len(), 1290 * 2796 * 4);
    assert_eq!(r.as_u16().unwrap(), (1290, 2796));
    assert!(
        Resolution::new(70_000, 1)
            .unwrap()
            .as_u16()
            .is_err()
    );
}

#[test]
fn with_opacity_scales_alpha_only() {
    let c = Rgba8::opaque(255, 255, 255).with_opacity(0.5);
    assert_eq!(c, Rgba8::new(255, 255, 255, 128));
    assert_eq!(Rgba8::opaque(1, 2, 3).with_opacity(2.0).a, 255);
    assert_eq!(Rgba8::opaque(1, 2, 3).with_opacity(-1.0).a, 0);
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![200u8, 100, 50, 128, 10, 20, 30, 0, 9, 8, 7, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[9, 8, 7, 255]);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
    }
}

#[test]
fn premultiplied_color_matches_buffer_helper() {
    let c = Rgba8::new(255, 255, 255, 89);
    let mut buf = c.to_array().to_vec();
    premultiply_rgba8_in_place(&mut buf);
    assert_eq!(buf.as_slice(), &c.premultiplied());
}

#[test]
fn frame_fill_and_pixel_lookup() {
    let size = Resolution::new(3, 2).unwrap();
    let f = FrameRGBA::filled(size, Rgba8::new(255, 255, 255, 128));
    assert_eq!(f.data.len(), 24);
    assert_eq!(f.pixel(2, 1), Some([128, 128, 128, 128]));
    assert_eq!(f.pixel(3, 0), None);
    assert_eq!(FrameRGBA::transparent(size).pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn frame_image_round_trip_keeps_opaque_pixels() {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([12, 34, 56, 255]));
    let frame = FrameRGBA::from_rgba_image(img.clone());
    assert!(frame.premultiplied);
    assert_eq!(frame.size(), Resolution::new(4, 4).unwrap());
    assert_eq!(frame.into_rgba_image().unwrap(), img);
}
