use std::io::Cursor;

use super::*;
use crate::assets::data_url::encode_data_url;

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn loader(base: Option<PathBuf>) -> DefaultImageLoader {
    DefaultImageLoader::new(LoaderConfig {
        base_dir: base,
        ..LoaderConfig::default()
    })
    .unwrap()
}

#[test]
fn export_urls_are_cache_busted_and_marked() {
    let opts = LoadOptions::export_at(1234);
    assert_eq!(
        request_url("https://img.example/a.jpg", &opts),
        "https://img.example/a.jpg?crossorigin=anonymous&cb=1234"
    );
    assert_eq!(
        request_url("https://img.example/a.jpg?w=800", &opts),
        "https://img.example/a.jpg?w=800&crossorigin=anonymous&cb=1234"
    );
}

#[test]
fn preview_and_non_http_urls_are_untouched() {
    assert_eq!(
        request_url("https://img.example/a.jpg", &LoadOptions::preview()),
        "https://img.example/a.jpg"
    );
    let data = "data:image/png;base64,AAAA";
    assert_eq!(request_url(data, &LoadOptions::export_at(1)), data);
    assert_eq!(request_url("rel/a.png", &LoadOptions::export_at(1)), "rel/a.png");
}

#[test]
fn loads_data_urls() {
    let url = encode_data_url("image/png", &tiny_png());
    let img = loader(None)
        .load(&ImageSource::DataUrl(url), &LoadOptions::export_at(0))
        .unwrap();
    assert_eq!((img.width, img.height), (3, 2));
}

#[test]
fn loads_relative_and_file_urls() {
    let dir = std::env::temp_dir().join(format!("stayframe-load-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bg.png");
    std::fs::write(&path, tiny_png()).unwrap();

    let l = loader(Some(dir.clone()));
    let img = l
        .load(&ImageSource::Url("bg.png".into()), &LoadOptions::preview())
        .unwrap();
    assert_eq!(img.width, 3);

    let file_url = url::Url::from_file_path(&path).unwrap().to_string();
    let img = l
        .load(&ImageSource::Url(file_url), &LoadOptions::preview())
        .unwrap();
    assert_eq!(img.height, 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn failures_are_load_errors() {
    let l = loader(None);
    let opts = LoadOptions::preview();
    for source in [
        ImageSource::None,
        ImageSource::Url("/definitely/missing/stayframe.png".into()),
        ImageSource::Url("ftp://example.com/a.png".into()),
        ImageSource::DataUrl("data:image/png;base64,AAAA".into()),
    ] {
        let err = l.load(&source, &opts).unwrap_err();
        assert!(matches!(err, StayframeError::Load(_)), "{source:?}: {err}");
    }
}
