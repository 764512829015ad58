use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::assets::resolve::normalize_image_ref;
use crate::compose::single::Compositor;
use crate::export::download::{GIF_FILENAME, download};
use crate::export::urls::ObjectUrls;
use crate::foundation::core::{CanvasDimensions, DisplaySize};
use crate::foundation::error::{StayframeError, StayframeResult};
use crate::layout::presets::{
    DEFAULT_ASPECT_RATIO, GIF_EDITOR_MAX_DISPLAY, compute_fit_size, resolve_dimensions,
};
use crate::model::frame::{FrameId, FramePatch};
use crate::model::sequence::{FrameSequence, resolve_quote_text};

/// Multi-frame editing session producing animated GIFs.
#[derive(Debug)]
pub struct GifSession {
    compositor: Compositor,
    aspect_ratio: String,
    dims: CanvasDimensions,
    frames: FrameSequence,
    urls: ObjectUrls,
    progress: f64,
}

impl GifSession {
    pub fn new(compositor: Compositor) -> Self {
        Self {
            compositor,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            dims: resolve_dimensions(DEFAULT_ASPECT_RATIO),
            frames: FrameSequence::new(),
            urls: ObjectUrls::new(),
            progress: 0.0,
        }
    }

    pub fn aspect_ratio(&self) -> &str {
        &self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, id: &str) -> CanvasDimensions {
        self.aspect_ratio = id.to_string();
        self.dims = resolve_dimensions(id);
        self.dims
    }

    pub fn dimensions(&self) -> CanvasDimensions {
        self.dims
    }

    /// Preview size fitted into 800x600.
    pub fn display_size(&self) -> DisplaySize {
        let (max_w, max_h) = GIF_EDITOR_MAX_DISPLAY;
        compute_fit_size(self.dims, max_w, max_h)
    }

    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameSequence {
        &mut self.frames
    }

    /// Append a frame from loosely-shaped image and quote values.
    pub fn add_frame(&mut self, image_ref: &Value, quote: &Value) -> FrameId {
        self.frames
            .add_frame(normalize_image_ref(image_ref), resolve_quote_text(quote))
    }

    pub fn remove_frame(&mut self, id: FrameId) -> bool {
        self.frames.remove_frame(id)
    }

    pub fn update_frame(&mut self, id: FrameId, patch: &FramePatch) -> StayframeResult<()> {
        self.frames.update_frame(id, patch)
    }

    pub fn reorder_frames(&mut self, from: usize, to: usize) -> StayframeResult<()> {
        self.frames.reorder_frames(from, to)
    }

    pub fn set_frame_duration(&mut self, ms: u32) {
        self.frames.set_frame_duration(ms);
    }

    /// Fraction of frames rendered by the last or current generation.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Render every frame and return an object URL for the GIF bytes.
    ///
    /// A zero-frame sequence is rejected and produces no URL.
    pub fn generate_gif(&mut self, mut on_progress: impl FnMut(f64)) -> StayframeResult<String> {
        self.progress = 0.0;
        let frames = self.frames.frames().to_vec();
        let dims = self.dims;
        let mut progress = 0.0;
        let result = self.compositor.generate_gif(dims, &frames, &mut |p| {
            progress = p;
            on_progress(p);
        });
        self.progress = progress;
        let bytes = result?;
        Ok(self.urls.create("image/gif", bytes))
    }

    /// Bytes behind an object URL returned by [`GifSession::generate_gif`].
    pub fn gif_bytes(&self, url: &str) -> StayframeResult<&[u8]> {
        self.urls
            .get(url)
            .map(|blob| blob.bytes.as_slice())
            .ok_or_else(|| {
                StayframeError::validation(format!("unknown or revoked object URL {url}"))
            })
    }

    /// Save a generated GIF to `dest` (a file, or a directory receiving `stayframe.gif`).
    pub fn download(&self, url: &str, dest: &Path) -> StayframeResult<PathBuf> {
        download(url, dest, GIF_FILENAME, &self.urls)
    }

    pub fn revoke(&mut self, url: &str) -> bool {
        self.urls.revoke(url)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/gif_session.rs"]
mod tests;
