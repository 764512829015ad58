use super::*;
use crate::assets::data_url::decode_data_url;

#[test]
fn png_data_url_decodes_to_same_pixels() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 64, 64, 64, 128],
        premultiplied: true,
    };
    let url = encode_png_data_url(&frame).unwrap();
    assert!(url.starts_with("data:image/png;base64,"));

    let (mime, bytes) = decode_data_url(&url).unwrap();
    assert_eq!(mime, "image/png");
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [128, 128, 128, 128]);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 3],
        premultiplied: false,
    };
    assert!(encode_png(&frame).is_err());
}
