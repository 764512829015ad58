use super::*;
use crate::assets::data_url::encode_data_url;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("stayframe-dl-{}-{name}", std::process::id()))
}

#[test]
fn filenames() {
    assert_eq!(timestamped_filename(1700000000123), "stayframe-1700000000123.png");
    assert_eq!(QUICK_EXPORT_FILENAME, "social-post.png");
}

#[test]
fn resolves_data_and_object_urls() {
    let mut urls = ObjectUrls::new();
    let blob = urls.create("image/gif", b"GIF89a".to_vec());
    assert!(blob.starts_with("blob:stayframe/"));
    assert_eq!(resolve_bytes(&blob, &urls).unwrap(), b"GIF89a");

    let data = encode_data_url("image/png", b"png!");
    assert_eq!(resolve_bytes(&data, &urls).unwrap(), b"png!");

    assert!(urls.revoke(&blob));
    assert!(!urls.revoke(&blob));
    assert!(resolve_bytes(&blob, &urls).is_err());
    assert!(resolve_bytes("https://example.com/a.png", &urls).is_err());
}

#[test]
fn object_urls_are_unique() {
    let mut urls = ObjectUrls::new();
    let a = urls.create("a/b", vec![1]);
    let b = urls.create("a/b", vec![2]);
    assert_ne!(a, b);
    assert_eq!(urls.len(), 2);
    assert_eq!(urls.get(&b).map(|blob| blob.bytes[0]), Some(2));
}

#[test]
fn writes_into_directories_and_nested_paths() {
    let urls = ObjectUrls::new();
    let data = encode_data_url("image/png", b"abc");

    let dir = scratch("dir");
    std::fs::create_dir_all(&dir).unwrap();
    let saved = download(&data, &dir, QUICK_EXPORT_FILENAME, &urls).unwrap();
    assert_eq!(saved, dir.join("social-post.png"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"abc");

    let nested = scratch("nested").join("a/b/out.png");
    let saved = download(&data, &nested, "ignored.png", &urls).unwrap();
    assert_eq!(saved, nested);
    assert!(nested.exists());

    std::fs::remove_dir_all(&dir).ok();
    std::fs::remove_dir_all(scratch("nested")).ok();
}
