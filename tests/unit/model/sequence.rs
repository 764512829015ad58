use serde_json::json;

use super::*;
use crate::model::frame::{TextPosition, TextStylePatch};

fn quotes(seq: &FrameSequence) -> Vec<&str> {
    seq.frames().iter().map(|f| f.quote_text.as_str()).collect()
}

#[test]
fn add_uses_gif_defaults_and_current_duration() {
    let mut seq = FrameSequence::new();
    let a = seq.add_frame(ImageSource::None, "a");
    seq.set_frame_duration(250);
    let b = seq.add_frame(ImageSource::None, "b");

    assert_ne!(a, b);
    assert_eq!(seq.get(a).unwrap().display_duration_ms, 500);
    assert_eq!(seq.get(b).unwrap().display_duration_ms, 250);
    assert_eq!(seq.get(a).unwrap().text_style, TextStyle::gif_default());
    assert_eq!(seq.get(a).unwrap().text_position, TextPosition::CENTER);
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut seq = FrameSequence::new();
    let a = seq.add_frame(ImageSource::None, "a");
    assert!(seq.remove_frame(a));
    assert!(!seq.remove_frame(a));
    let b = seq.add_frame(ImageSource::None, "b");
    assert_ne!(a, b);
    assert!(seq.get(a).is_none());
}

#[test]
fn update_touches_only_the_target() {
    let mut seq = FrameSequence::from_pairs([(ImageSource::None, "a"), (ImageSource::None, "b")]);
    let ids: Vec<_> = seq.frames().iter().map(|f| f.id).collect();
    seq.update_frame(
        ids[1],
        &FramePatch {
            quote_text: Some("B".into()),
            style: TextStylePatch {
                font_size_px: Some(40),
                ..TextStylePatch::default()
            },
            ..FramePatch::default()
        },
    )
    .unwrap();
    assert_eq!(quotes(&seq), ["a", "B"]);
    assert_eq!(seq.frames()[0].text_style.font_size_px, 32);
    assert_eq!(seq.frames()[1].text_style.font_size_px, 40);

    let err = seq.update_frame(FrameId(999), &FramePatch::default()).unwrap_err();
    assert!(err.to_string().contains("unknown frame id"));
}

#[test]
fn reorder_moves_frames() {
    let mut seq = FrameSequence::from_pairs([
        (ImageSource::None, "a"),
        (ImageSource::None, "b"),
        (ImageSource::None, "c"),
    ]);
    seq.reorder_frames(0, 2).unwrap();
    assert_eq!(quotes(&seq), ["b", "c", "a"]);
    seq.reorder_frames(2, 0).unwrap();
    assert_eq!(quotes(&seq), ["a", "b", "c"]);
    seq.reorder_frames(0, 99).unwrap();
    assert_eq!(quotes(&seq), ["b", "c", "a"]);
    assert!(seq.reorder_frames(3, 0).is_err());
}

#[test]
fn quote_text_resolution_order() {
    assert_eq!(resolve_quote_text(&json!("plain")), "plain");
    assert_eq!(resolve_quote_text(&json!({"text": "t", "quote": "q"})), "t");
    assert_eq!(resolve_quote_text(&json!({"quote": "q"})), "q");
    assert_eq!(resolve_quote_text(&json!({"other": 1})), r#"{"other":1}"#);
    assert_eq!(resolve_quote_text(&json!(42)), "42");
    assert_eq!(resolve_quote_text(&json!(null)), "");
}
