use serde_json::json;

use super::*;

#[test]
fn position_is_clamped_on_every_path() {
    let p = TextPosition::new(-40.0, 400.0);
    assert_eq!((p.x(), p.y()), (10.0, 90.0));

    let p = TextPosition::CENTER.offset(1000.0, -1000.0);
    assert_eq!((p.x(), p.y()), (90.0, 10.0));

    let p = TextPosition::new(f64::NAN, f64::INFINITY);
    assert_eq!(p, TextPosition::CENTER);

    let p: TextPosition = serde_json::from_value(json!({"x": 5.0, "y": 95.0})).unwrap();
    assert_eq!((p.x(), p.y()), (10.0, 90.0));
}

#[test]
fn position_to_pixels_uses_percentages() {
    let (x, y) = TextPosition::new(25.0, 75.0).to_pixels(1024.0, 512.0);
    assert_eq!((x, y), (256.0, 384.0));
}

#[test]
fn style_patch_clamps_font_size() {
    let mut style = TextStyle::editor_default();
    style.apply(&TextStylePatch {
        font_size_px: Some(200),
        ..TextStylePatch::default()
    });
    assert_eq!(style.font_size_px, MAX_FONT_SIZE_PX);

    style.apply(&TextStylePatch {
        font_size_px: Some(1),
        color: Some(CssColor::BLACK),
        ..TextStylePatch::default()
    });
    assert_eq!(style.font_size_px, MIN_FONT_SIZE_PX);
    assert_eq!(style.color, CssColor::BLACK);
    assert_eq!(style.font_weight, FontWeight::Bold);
}

#[test]
fn style_patch_accepts_host_control_aliases() {
    let patch: TextStylePatch = serde_json::from_value(json!({
        "color": "#ffeb3b",
        "size": 48,
        "alignment": "right"
    }))
    .unwrap();
    assert_eq!(patch.font_size_px, Some(48));
    assert_eq!(patch.text_align, Some(TextAlign::Right));
    assert_eq!(patch.color, Some(CssColor::rgb(0xff, 0xeb, 0x3b)));
    assert!(TextStylePatch::default().is_empty());
    assert!(!patch.is_empty());
}

#[test]
fn defaults_match_editor_and_gif_flows() {
    let e = TextStyle::editor_default();
    assert_eq!(e.font_style, FontStyle::Italic);
    assert_eq!(e.font_weight, FontWeight::Bold);
    assert_eq!(e.font_family, "Arial, sans-serif");

    let g = TextStyle::gif_default();
    assert_eq!(g.font_style, FontStyle::Normal);
    assert_eq!(g.font_weight, FontWeight::Normal);
    assert_eq!(g.font_size_px, 32);
}

#[test]
fn frame_patch_updates_only_given_fields() {
    let mut frame = Frame::new(FrameId(3), ImageSource::None, "a", TextStyle::gif_default());
    frame.apply(&FramePatch {
        quote_text: Some("b".into()),
        display_duration_ms: Some(900),
        ..FramePatch::default()
    });
    assert_eq!(frame.quote_text, "b");
    assert_eq!(frame.display_duration_ms, 900);
    assert_eq!(frame.text_position, TextPosition::CENTER);
    assert_eq!(frame.id.to_string(), "frame-3");
}

#[test]
fn toggles_flip() {
    assert_eq!(FontWeight::Normal.toggled(), FontWeight::Bold);
    assert_eq!(FontStyle::Italic.toggled(), FontStyle::Normal);
    assert_eq!(FontWeight::Bold.value(), 700);
}
