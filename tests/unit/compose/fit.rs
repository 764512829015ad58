use super::*;

#[test]
fn wide_image_overflows_horizontally() {
    let r = cover_fit(2000.0, 1000.0, 1080.0, 1080.0);
    assert_eq!(r.height(), 1080.0);
    assert_eq!(r.width(), 2160.0);
    assert_eq!(r.x0, -540.0);
    assert_eq!(r.y0, 0.0);
}

#[test]
fn tall_image_overflows_vertically() {
    let r = cover_fit(500.0, 1000.0, 1024.0, 512.0);
    assert_eq!(r.width(), 1024.0);
    assert_eq!(r.height(), 2048.0);
    assert_eq!(r.y0, -768.0);
}

#[test]
fn same_ratio_is_exact() {
    let r = cover_fit(512.0, 256.0, 1024.0, 512.0);
    assert_eq!(r, Rect::new(0.0, 0.0, 1024.0, 512.0));
}

#[test]
fn always_covers_canvas() {
    for (iw, ih) in [(1.0, 1.0), (3.0, 7.0), (1920.0, 1080.0), (10.0, 9000.0)] {
        let r = cover_fit(iw, ih, 1500.0, 500.0);
        assert!(r.x0 <= 1e-9 && r.y0 <= 1e-9);
        assert!(r.x1 >= 1500.0 - 1e-9 && r.y1 >= 500.0 - 1e-9);
        assert!(((r.width() / r.height()) - iw / ih).abs() < 1e-9);
    }
    assert_eq!(cover_fit(0.0, 10.0, 10.0, 10.0), Rect::ZERO);
}
