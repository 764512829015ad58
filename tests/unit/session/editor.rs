use std::sync::{Arc, Mutex};

use serde_json::json;
use usvg::fontdb;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::assets::load::{ImageLoader, LoadOptions};
use crate::export::clipboard::{ClipboardBackend, ClipboardImage};
use crate::foundation::core::Point;
use crate::foundation::error::{ClipboardFailure, StayframeError};
use crate::interact::text_layer::InteractionMode;
use crate::text::fonts::{FontBook, FontConfig};

/// Fails for any source containing "missing"; otherwise serves a 6x4 image.
struct StubLoader;

impl ImageLoader for StubLoader {
    fn load(&self, source: &ImageSource, _opts: &LoadOptions) -> StayframeResult<PreparedImage> {
        if source.as_str().is_some_and(|s| s.contains("missing")) {
            return Err(StayframeError::load("not found"));
        }
        PreparedImage::from_premul(6, 4, [10, 20, 30, 255].repeat(24))
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<(u32, u32)>>>);

impl ClipboardBackend for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn set_image(&mut self, image: &ClipboardImage) -> Result<(), ClipboardFailure> {
        self.0
            .lock()
            .map_err(|_| ClipboardFailure::Failed("poisoned".into()))?
            .push((image.width, image.height));
        Ok(())
    }
}

fn editor_with(fonts: FontBook) -> (Editor, Recorder) {
    let recorder = Recorder::default();
    let editor = Editor::new(
        Compositor::new(fonts, Box::new(StubLoader)),
        Clipboard::new(vec![Box::new(recorder.clone())]),
    );
    (editor, recorder)
}

fn editor() -> Editor {
    editor_with(FontBook::from_database(fontdb::Database::new())).0
}

fn editor_with_fonts() -> Option<(Editor, Recorder)> {
    let fonts = FontBook::new(&FontConfig::default());
    (fonts.face_count() > 0).then(|| editor_with(fonts))
}

#[test]
fn starts_square_with_empty_bold_italic_text() {
    let ed = editor();
    assert_eq!(ed.aspect_ratio(), "instagram-square");
    assert_eq!(ed.dimensions(), CanvasDimensions { width: 1080, height: 1080 });
    assert_eq!(ed.frame().quote_text, "");
    assert_eq!(ed.frame().text_style, TextStyle::editor_default());
    assert_eq!(ed.preview(), PreviewState::Empty);
}

#[test]
fn aspect_ratio_changes_dimensions_and_display() {
    let mut ed = editor();
    let dims = ed.set_aspect_ratio("twitter-post");
    assert_eq!(dims, CanvasDimensions { width: 1024, height: 512 });
    let display = ed.display_size();
    assert_eq!(display.width, 600.0);
    assert_eq!(display.height, 300.0);

    assert_eq!(
        ed.set_aspect_ratio("no-such-ratio"),
        CanvasDimensions { width: 1080, height: 1080 }
    );
}

#[test]
fn set_image_accepts_reference_shapes() {
    let mut ed = editor();
    let state = ed.set_image(&json!({ "urls": { "regular": "https://img.example/a.jpg" } }));
    assert_eq!(state, PreviewState::Ready { width: 6, height: 4 });
    assert_eq!(ed.frame().image.as_str(), Some("https://img.example/a.jpg"));

    assert_eq!(ed.set_image(&json!("https://img.example/missing.jpg")), PreviewState::Failed);
    assert_eq!(ed.preview(), PreviewState::Failed);

    assert_eq!(ed.set_image(&json!(42)), PreviewState::Empty);
    assert!(ed.frame().image.is_none());
}

#[test]
fn quotes_and_text_edits() {
    let mut ed = editor();
    ed.set_quote(&json!({ "text": "Be here now" }));
    assert_eq!(ed.frame().quote_text, "Be here now");

    ed.update_text(&TextStylePatch {
        font_size_px: Some(500),
        ..TextStylePatch::default()
    });
    assert_eq!(ed.frame().text_style.font_size_px, 72);
}

#[test]
fn input_uses_editor_display_size() {
    let mut ed = editor();
    ed.set_quote(&json!("drag me"));
    ed.handle_input(TextInput::DragStart {
        at: Point::new(300.0, 300.0),
    });
    assert_eq!(ed.text_layer().mode(), InteractionMode::Dragging);
    // 60px on a 600px display is 10 percent.
    let out = ed.handle_input(TextInput::PointerMove {
        at: Point::new(360.0, 300.0),
    });
    assert!(out.changed);
    assert!((ed.frame().text_position.x() - 60.0).abs() < 1e-9);
    ed.handle_input(TextInput::PointerUp);
    assert_eq!(ed.text_layer().mode(), InteractionMode::Selected);
}

#[test]
fn export_copy_and_download() {
    let Some((mut ed, recorder)) = editor_with_fonts() else {
        return;
    };
    ed.set_aspect_ratio("twitter-post");
    ed.set_quote(&json!("Hello"));

    let url = ed.export_image().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));

    ed.copy_to_clipboard().unwrap();
    assert_eq!(recorder.0.lock().unwrap().as_slice(), &[(1024, 512)]);

    let dir = std::env::temp_dir().join(format!("stayframe-editor-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = ed.download(&dir).unwrap();
    assert_eq!(path, dir.join("social-post.png"));
    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1024, 512));
    std::fs::remove_dir_all(&dir).unwrap();
}
