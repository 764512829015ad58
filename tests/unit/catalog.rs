use serde_json::json;

use super::*;
use crate::assets::resolve::normalize_image_ref;

fn catalog() -> QuoteCatalog {
    QuoteCatalog::from_value(&json!({
        "themes": [
            { "name": "calm", "quotes": ["a", "b", "c"] },
            { "name": "grit", "quotes": ["d", 5, "e"] },
            { "quotes": ["orphan"] },
            { "name": "broken", "quotes": "nope" }
        ]
    }))
}

#[test]
fn themes_skip_malformed_entries() {
    assert_eq!(catalog().themes(), vec!["calm", "grit"]);
}

#[test]
fn theme_filter_and_pagination() {
    let c = catalog();
    let p = c.quotes("calm", 2, 2);
    assert_eq!(p.total, 3);
    assert_eq!((p.page, p.limit), (2, 2));
    assert_eq!(
        p.quotes,
        vec![CatalogQuote {
            theme: "calm".into(),
            quote: "c".into()
        }]
    );

    assert!(c.quotes("calm", 9, 2).quotes.is_empty());
    assert_eq!(c.quotes("nope", 1, 10).total, 0);
}

#[test]
fn empty_theme_lists_everything_bounded() {
    let p = catalog().quotes("", 0, 4);
    assert_eq!(p.page, 1);
    assert_eq!(p.total, 5);
    let texts: Vec<_> = p.quotes.iter().map(|q| q.quote.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c", "d"]);
    assert_eq!(p.quotes[3].theme, "grit");
}

#[test]
fn malformed_documents_are_empty() {
    assert_eq!(QuoteCatalog::from_json_str("{not json"), QuoteCatalog::default());
    assert_eq!(QuoteCatalog::from_value(&json!([1, 2])).themes().len(), 0);
    assert_eq!(QuoteCatalog::from_value(&json!({ "themes": {} })).quotes("", 1, 10).total, 0);
}

#[test]
fn search_image_serves_as_image_reference() {
    let hit: SearchImage = serde_json::from_value(json!({
        "id": "abc",
        "url": "https://images.example/abc.jpg",
        "downloadUrl": "https://images.example/abc/download",
        "photographer": "Sam",
        "altText": "a lake"
    }))
    .unwrap();
    assert_eq!(hit.alt, "a lake");
    let as_ref = serde_json::to_value(&hit).unwrap();
    assert_eq!(
        normalize_image_ref(&as_ref).as_str(),
        Some("https://images.example/abc.jpg")
    );
}
