use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((prepared.width, prepared.height), (1, 1));
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_svg_rasterizes_at_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
        <rect width="4" height="2" fill="#ff0000"/></svg>"##;
    let prepared = decode_image(svg).unwrap();
    assert_eq!((prepared.width, prepared.height), (4, 2));
    assert_eq!(&prepared.rgba8_premul[..4], &[255, 0, 0, 255]);
}

#[test]
fn garbage_is_a_load_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(err.to_string().starts_with("load error"), "{err}");
    assert!(decode_image(br#"<svg"#).is_err());
}

#[test]
fn premultiply_and_back_is_close() {
    let mut px = vec![200, 100, 50, 128, 10, 20, 30, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..], &[1, 2, 3, 255]);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!((*got as i16 - want as i16).abs() <= 2, "{got} vs {want}");
    }
}

#[test]
fn from_premul_checks_length() {
    assert!(PreparedImage::from_premul(2, 2, vec![0; 16]).is_ok());
    assert!(PreparedImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul(0, 2, vec![]).is_err());
}

#[test]
fn oversized_sides_are_load_errors() {
    let side = MAX_IMAGE_SIDE + 1;
    let err = PreparedImage::from_premul(side, 1, vec![0; side as usize * 4]).unwrap_err();
    assert!(matches!(err, StayframeError::Load(_)), "{err}");

    let wide = image::RgbaImage::from_pixel(70_000, 1, image::Rgba([9, 9, 9, 255]));
    assert!(matches!(decode_image(&png_bytes(wide)), Err(StayframeError::Load(_))));

    let edge = image::RgbaImage::from_pixel(MAX_IMAGE_SIDE, 1, image::Rgba([9, 9, 9, 255]));
    assert_eq!(decode_image(&png_bytes(edge)).unwrap().width, MAX_IMAGE_SIDE);
}
