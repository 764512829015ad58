//! JSON project documents describing what to render.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assets::resolve::normalize_image_ref;
use crate::foundation::core::CanvasDimensions;
use crate::foundation::error::{StayframeError, StayframeResult};
use crate::layout::presets::{DEFAULT_ASPECT_RATIO, find_preset, resolve_dimensions};
use crate::model::frame::{
    DEFAULT_FRAME_DURATION_MS, Frame, FrameId, TextPosition, TextStyle, TextStylePatch,
};
use crate::model::sequence::{FrameSequence, resolve_quote_text};
use crate::text::fonts::FontConfig;

fn default_aspect_ratio() -> String {
    DEFAULT_ASPECT_RATIO.to_string()
}

fn default_true() -> bool {
    true
}

/// One frame as written in a project file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Any accepted image reference shape: a string, `{url}`, `{src}` or `{urls:{..}}`.
    #[serde(default)]
    pub image: Value,
    /// A string, or an object carrying `text` or `quote`.
    #[serde(default)]
    pub quote: Value,
    #[serde(default)]
    pub position: Option<TextPosition>,
    #[serde(default)]
    pub style: TextStylePatch,
    #[serde(default)]
    pub duration_ms: Option<u32>,
}

impl FrameSpec {
    /// Build a frame on top of `base` style. Size overrides are clamped.
    pub fn to_frame(&self, id: FrameId, base: TextStyle, default_duration_ms: u32) -> Frame {
        let mut frame = Frame::new(
            id,
            normalize_image_ref(&self.image),
            resolve_quote_text(&self.quote),
            base,
        );
        if let Some(pos) = self.position {
            frame.text_position = pos;
        }
        frame.text_style.apply(&self.style);
        frame.display_duration_ms = self.duration_ms.unwrap_or(default_duration_ms);
        frame
    }
}

/// Top-level project document.
///
/// ```json
/// { "aspect_ratio": "twitter-post", "frames": [{ "image": "bg.jpg", "quote": "Hi" }] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default)]
    pub font_dirs: Vec<PathBuf>,
    #[serde(default = "default_true")]
    pub system_fonts: bool,
    /// Default duration for frames without `duration_ms`.
    #[serde(default)]
    pub frame_duration_ms: Option<u32>,
    #[serde(default)]
    pub frames: Vec<FrameSpec>,
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            font_dirs: Vec::new(),
            system_fonts: true,
            frame_duration_ms: None,
            frames: Vec::new(),
        }
    }
}

impl ProjectFile {
    pub fn from_json_str(text: &str) -> StayframeResult<Self> {
        serde_json::from_str(text).map_err(|e| StayframeError::serde(format!("project file: {e}")))
    }

    /// Read a project file. Relative font directories are resolved against its parent.
    pub fn from_path(path: &Path) -> StayframeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read project '{}'", path.display()))?;
        let mut project = Self::from_json_str(&text)?;
        if let Some(root) = path.parent() {
            for dir in &mut project.font_dirs {
                if dir.is_relative() {
                    *dir = root.join(&*dir);
                }
            }
        }
        Ok(project)
    }

    /// Native export size. Unknown ratios fall back to the square default.
    pub fn dimensions(&self) -> CanvasDimensions {
        if find_preset(&self.aspect_ratio).is_none() {
            tracing::warn!(
                aspect_ratio = %self.aspect_ratio,
                "unknown aspect ratio, using default"
            );
        }
        resolve_dimensions(&self.aspect_ratio)
    }

    pub fn font_config(&self) -> FontConfig {
        FontConfig {
            font_dirs: self.font_dirs.clone(),
            use_system_fonts: self.system_fonts,
        }
    }

    /// The first frame styled for single-image export.
    pub fn single_frame(&self) -> StayframeResult<Frame> {
        let spec = self
            .frames
            .first()
            .ok_or_else(|| StayframeError::validation("project has no frames"))?;
        Ok(spec.to_frame(FrameId(0), TextStyle::editor_default(), self.default_duration()))
    }

    /// Every frame styled for animation, in document order.
    pub fn sequence(&self) -> FrameSequence {
        let mut seq = FrameSequence::new();
        seq.set_frame_duration(self.default_duration());
        for spec in &self.frames {
            let duration = seq.default_duration_ms();
            seq.push_frame(spec.to_frame(FrameId(0), TextStyle::gif_default(), duration));
        }
        seq
    }

    fn default_duration(&self) -> u32 {
        self.frame_duration_ms.unwrap_or(DEFAULT_FRAME_DURATION_MS)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
