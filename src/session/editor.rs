use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::assets::resolve::{ImageSource, normalize_image_ref};
use crate::compose::single::Compositor;
use crate::export::clipboard::Clipboard;
use crate::export::download::{QUICK_EXPORT_FILENAME, download};
use crate::export::urls::ObjectUrls;
use crate::foundation::core::{CanvasDimensions, DisplaySize};
use crate::foundation::error::StayframeResult;
use crate::interact::text_layer::{InputOutcome, TextInput, TextLayer};
use crate::layout::presets::{
    DEFAULT_ASPECT_RATIO, EDITOR_MAX_DISPLAY_WIDTH, compute_display_size, resolve_dimensions,
};
use crate::model::frame::{Frame, FrameId, TextStyle, TextStylePatch};
use crate::model::sequence::resolve_quote_text;

/// Load state of the on-screen background preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewState {
    /// No background selected.
    Empty,
    /// Background decoded; native size.
    Ready { width: u32, height: u32 },
    /// Background could not be loaded; the editor keeps working without it.
    Failed,
}

/// Single-image editing session: one implicit frame, its text layer and exports.
#[derive(Debug)]
pub struct Editor {
    compositor: Compositor,
    clipboard: Clipboard,
    aspect_ratio: String,
    dims: CanvasDimensions,
    layer: TextLayer,
    preview: PreviewState,
}

impl Editor {
    pub fn new(compositor: Compositor, clipboard: Clipboard) -> Self {
        let frame = Frame::new(
            FrameId(0),
            ImageSource::None,
            String::new(),
            TextStyle::editor_default(),
        );
        Self {
            compositor,
            clipboard,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            dims: resolve_dimensions(DEFAULT_ASPECT_RATIO),
            layer: TextLayer::new(frame),
            preview: PreviewState::Empty,
        }
    }

    pub fn aspect_ratio(&self) -> &str {
        &self.aspect_ratio
    }

    /// Native export resolution.
    pub fn dimensions(&self) -> CanvasDimensions {
        self.dims
    }

    /// Bounded on-screen size used to interpret pointer input.
    pub fn display_size(&self) -> DisplaySize {
        compute_display_size(self.dims, EDITOR_MAX_DISPLAY_WIDTH)
    }

    /// Switch the target resolution. Percent positions carry over unchanged.
    pub fn set_aspect_ratio(&mut self, id: &str) -> CanvasDimensions {
        self.aspect_ratio = id.to_string();
        self.dims = resolve_dimensions(id);
        self.dims
    }

    pub fn frame(&self) -> &Frame {
        self.layer.frame()
    }

    pub fn text_layer(&self) -> &TextLayer {
        &self.layer
    }

    pub fn text_layer_mut(&mut self) -> &mut TextLayer {
        &mut self.layer
    }

    pub fn preview(&self) -> PreviewState {
        self.preview
    }

    /// Select a background from any accepted image reference shape and load a preview.
    pub fn set_image(&mut self, image_ref: &Value) -> PreviewState {
        let source = normalize_image_ref(image_ref);
        self.preview = if source.is_none() {
            PreviewState::Empty
        } else {
            match self.compositor.preview_image(&source) {
                Ok(img) => PreviewState::Ready {
                    width: img.width,
                    height: img.height,
                },
                Err(err) => {
                    tracing::warn!(error = %err, "preview image failed to load");
                    PreviewState::Failed
                }
            }
        };
        self.layer.frame_mut().image = source;
        self.preview
    }

    /// Replace the quote from a string or `{text}`/`{quote}` object.
    pub fn set_quote(&mut self, quote: &Value) {
        self.layer.set_text(resolve_quote_text(quote));
    }

    /// Route one input event through the text layer at the current display size.
    pub fn handle_input(&mut self, input: TextInput) -> InputOutcome {
        let display = self.display_size();
        self.layer.handle(input, display)
    }

    pub fn update_text(&mut self, patch: &TextStylePatch) {
        self.layer.update_text(patch);
        tracing::debug!(?patch, "text updated");
    }

    pub fn add_text(&mut self, initial: Option<&str>) {
        self.layer.add_text(initial);
    }

    /// Render the current frame at native resolution as a PNG data URL.
    pub fn export_image(&mut self) -> StayframeResult<String> {
        let frame = self.layer.frame().clone();
        self.compositor.render(self.dims, &frame)
    }

    /// Export and place the result on the clipboard.
    pub fn copy_to_clipboard(&mut self) -> StayframeResult<()> {
        let url = self.export_image()?;
        self.clipboard.copy_data_url(&url)
    }

    /// Export and save to `dest` (a file, or a directory receiving `social-post.png`).
    pub fn download(&mut self, dest: &Path) -> StayframeResult<PathBuf> {
        let url = self.export_image()?;
        download(&url, dest, QUICK_EXPORT_FILENAME, &ObjectUrls::new())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
