use super::*;

#[test]
fn every_preset_resolves_to_its_documented_size() {
    let expected = [
        ("twitter-post", 1024, 512),
        ("twitter-header", 1500, 500),
        ("facebook-post", 1200, 630),
        ("facebook-cover", 851, 315),
        ("instagram-square", 1080, 1080),
        ("instagram-portrait", 1080, 1350),
        ("instagram-story", 1080, 1920),
        ("instagram-reels", 1080, 1920),
        ("linkedin-post", 1200, 627),
        ("linkedin-cover", 1584, 396),
        ("pinterest-pin", 1000, 1500),
        ("youtube-thumbnail", 1280, 720),
        ("tiktok-video", 1080, 1920),
    ];
    assert_eq!(expected.len(), ASPECT_PRESETS.len());
    for (id, w, h) in expected {
        assert_eq!(
            resolve_dimensions(id),
            CanvasDimensions {
                width: w,
                height: h
            },
            "{id}"
        );
    }
}

#[test]
fn unknown_ids_fall_back_to_instagram_square() {
    for id in ["", "twitter", "INSTAGRAM-SQUARE", "instagram-landscape", "nope"] {
        let d = resolve_dimensions(id);
        assert_eq!((d.width, d.height), (1080, 1080), "{id}");
    }
    assert_eq!(
        resolve_dimensions(DEFAULT_ASPECT_RATIO),
        resolve_dimensions("unknown")
    );
}

#[test]
fn display_size_caps_width_and_keeps_ratio() {
    let d = compute_display_size(resolve_dimensions("twitter-post"), 600.0);
    assert_eq!(d.width, 600.0);
    assert!((d.height - 300.0).abs() < 1e-9);

    let story = compute_display_size(resolve_dimensions("instagram-story"), 600.0);
    assert!((story.width / story.height - 1080.0 / 1920.0).abs() < 1e-9);
}

#[test]
fn display_size_is_identity_when_within_bounds() {
    let dims = CanvasDimensions {
        width: 400,
        height: 300,
    };
    let d = compute_display_size(dims, EDITOR_MAX_DISPLAY_WIDTH);
    assert_eq!((d.width, d.height), (400.0, 300.0));
}

#[test]
fn fit_size_respects_both_bounds_and_floors() {
    let (mw, mh) = GIF_EDITOR_MAX_DISPLAY;
    let square = compute_fit_size(resolve_dimensions("instagram-square"), mw, mh);
    assert_eq!((square.width, square.height), (600.0, 600.0));

    let wide = compute_fit_size(resolve_dimensions("twitter-header"), mw, mh);
    assert_eq!(wide.width, 800.0);
    assert!(wide.height <= 600.0);
    assert_eq!(wide.height, wide.height.floor());
}
