use serde_json::json;

use super::*;

#[test]
fn resolves_known_shapes_in_order() {
    assert_eq!(
        resolve_image_url(&json!("https://x/a.jpg")).as_deref(),
        Some("https://x/a.jpg")
    );
    assert_eq!(
        resolve_image_url(&json!({"src": "s", "url": "u"})).as_deref(),
        Some("u")
    );
    assert_eq!(resolve_image_url(&json!({"src": "s"})).as_deref(), Some("s"));
    assert_eq!(
        resolve_image_url(&json!({"urls": {"full": "f", "regular": "r"}})).as_deref(),
        Some("r")
    );
    assert_eq!(
        resolve_image_url(&json!({"urls": {"full": "f"}})).as_deref(),
        Some("f")
    );
}

#[test]
fn search_result_shape_resolves_via_url() {
    let hit = json!({
        "id": "abc",
        "url": "https://images.example/abc.jpg",
        "download_url": "https://images.example/abc/download",
        "photographer": "Someone",
        "photographer_url": "https://example/someone",
        "alt": "a lake"
    });
    assert_eq!(
        normalize_image_ref(&hit),
        ImageSource::Url("https://images.example/abc.jpg".into())
    );
}

#[test]
fn unrecognized_shapes_are_none() {
    assert_eq!(resolve_image_url(&json!(null)), None);
    assert_eq!(resolve_image_url(&json!(17)), None);
    assert_eq!(resolve_image_url(&json!({"href": "x"})), None);
    assert_eq!(resolve_image_url(&json!({"url": 5})), None);
    assert_eq!(resolve_image_url(&json!("   ")), None);
    assert_eq!(normalize_image_ref(&json!([1, 2])), ImageSource::None);
}

#[test]
fn classification_by_scheme() {
    assert!(matches!(
        ImageSource::from_ref("DATA:image/png;base64,AAAA"),
        ImageSource::DataUrl(_)
    ));
    assert!(matches!(ImageSource::from_ref("/tmp/a.png"), ImageSource::Url(_)));
    assert!(ImageSource::from_ref("").is_none());
    assert_eq!(ImageSource::from(None::<String>), ImageSource::None);
    assert_eq!(ImageSource::from("x").as_str(), Some("x"));
}

#[test]
fn serializes_as_tagged_variant() {
    let v = serde_json::to_value(ImageSource::Url("u".into())).unwrap();
    assert_eq!(v, json!({"kind": "url", "value": "u"}));
    let v = serde_json::to_value(ImageSource::None).unwrap();
    assert_eq!(v, json!({"kind": "none"}));
}
