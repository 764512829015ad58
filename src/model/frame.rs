use serde::{Deserialize, Serialize};

use crate::assets::resolve::ImageSource;
use crate::foundation::color::CssColor;

/// Lowest allowed text position on either axis, in percent of the canvas.
pub const MIN_TEXT_POSITION_PCT: f64 = 10.0;
/// Highest allowed text position on either axis, in percent of the canvas.
pub const MAX_TEXT_POSITION_PCT: f64 = 90.0;
/// Smallest font size reachable through interactive adjustments.
pub const MIN_FONT_SIZE_PX: u32 = 16;
/// Largest font size reachable through interactive adjustments.
pub const MAX_FONT_SIZE_PX: u32 = 72;
/// Per-frame display duration used when none is configured.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 500;

/// Font families offered by the on-canvas controls, as (label, CSS stack).
pub const PRESET_FONTS: [(&str, &str); 5] = [
    ("Arial", "Arial, sans-serif"),
    ("Georgia", "Georgia, serif"),
    ("Playfair", "Playfair Display, serif"),
    ("Montserrat", "Montserrat, sans-serif"),
    ("Roboto", "Roboto, sans-serif"),
];

/// Color swatches offered by the on-canvas controls.
pub const PRESET_COLORS: [(&str, CssColor); 5] = [
    ("White", CssColor::rgb(0xff, 0xff, 0xff)),
    ("Black", CssColor::rgb(0x00, 0x00, 0x00)),
    ("Yellow", CssColor::rgb(0xff, 0xeb, 0x3b)),
    ("Blue", CssColor::rgb(0x21, 0x96, 0xf3)),
    ("Pink", CssColor::rgb(0xe9, 0x1e, 0x63)),
];

/// Clamp a font size into the interactive range.
pub fn clamp_font_size(px: i64) -> u32 {
    px.clamp(i64::from(MIN_FONT_SIZE_PX), i64::from(MAX_FONT_SIZE_PX)) as u32
}

/// Text anchor position in percent of the canvas, always within `[10, 90]` on both axes.
///
/// Percentages keep the position valid across aspect-ratio changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPosition")]
pub struct TextPosition {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct RawPosition {
    x: f64,
    y: f64,
}

impl From<RawPosition> for TextPosition {
    fn from(raw: RawPosition) -> Self {
        Self::new(raw.x, raw.y)
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

impl TextPosition {
    /// Canvas center.
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    /// Build a position, clamping both axes. Non-finite input maps to the center.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_pct(x, Self::CENTER.x),
            y: clamp_pct(y, Self::CENTER.y),
        }
    }

    /// Horizontal anchor in percent.
    pub fn x(self) -> f64 {
        self.x
    }

    /// Vertical anchor in percent.
    pub fn y(self) -> f64 {
        self.y
    }

    /// Shift by a percentage-point delta, clamping the result.
    pub fn offset(self, dx_pct: f64, dy_pct: f64) -> Self {
        Self::new(self.x + dx_pct, self.y + dy_pct)
    }

    /// Absolute pixel coordinates on a surface of `width` x `height`.
    pub fn to_pixels(self, width: f64, height: f64) -> (f64, f64) {
        (width * self.x / 100.0, height * self.y / 100.0)
    }
}

fn clamp_pct(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v.clamp(MIN_TEXT_POSITION_PCT, MAX_TEXT_POSITION_PCT)
    } else {
        fallback
    }
}

/// Font weight toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight (400).
    #[default]
    Normal,
    /// Bold weight (700).
    Bold,
}

impl FontWeight {
    /// Numeric OpenType weight.
    pub fn value(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Bold => 700,
        }
    }

    /// The other weight.
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Bold,
            Self::Bold => Self::Normal,
        }
    }
}

/// Font slant toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

impl FontStyle {
    /// The other style.
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Italic,
            Self::Italic => Self::Normal,
        }
    }
}

/// Horizontal anchor of each text line relative to the stored x position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Lines start at x.
    Left,
    /// Lines are centered on x.
    #[default]
    Center,
    /// Lines end at x.
    Right,
}

/// Visual styling of a frame's quote text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Fill color.
    pub color: CssColor,
    /// CSS-like family stack, e.g. `"Arial, sans-serif"`.
    pub font_family: String,
    /// Font size in native canvas pixels.
    pub font_size_px: u32,
    /// Weight.
    pub font_weight: FontWeight,
    /// Slant.
    pub font_style: FontStyle,
    /// Line alignment.
    pub text_align: TextAlign,
}

impl TextStyle {
    /// Defaults of the single-image editor: white, 32px, bold italic Arial, centered.
    pub fn editor_default() -> Self {
        Self {
            color: CssColor::WHITE,
            font_family: "Arial, sans-serif".to_string(),
            font_size_px: 32,
            font_weight: FontWeight::Bold,
            font_style: FontStyle::Italic,
            text_align: TextAlign::Center,
        }
    }

    /// Defaults of a newly added GIF frame: white, 32px, regular Arial, centered.
    pub fn gif_default() -> Self {
        Self {
            color: CssColor::WHITE,
            font_family: "Arial".to_string(),
            font_size_px: 32,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_align: TextAlign::Center,
        }
    }

    /// Apply the `Some` fields of `patch`. Font sizes are clamped to `[16, 72]`.
    pub fn apply(&mut self, patch: &TextStylePatch) {
        if let Some(c) = patch.color {
            self.color = c;
        }
        if let Some(f) = &patch.font_family {
            self.font_family = f.clone();
        }
        if let Some(s) = patch.font_size_px {
            self.font_size_px = clamp_font_size(i64::from(s));
        }
        if let Some(w) = patch.font_weight {
            self.font_weight = w;
        }
        if let Some(s) = patch.font_style {
            self.font_style = s;
        }
        if let Some(a) = patch.text_align {
            self.text_align = a;
        }
    }
}

/// Partial [`TextStyle`] update as sent by host style controls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStylePatch {
    /// New fill color.
    pub color: Option<CssColor>,
    /// New family stack.
    pub font_family: Option<String>,
    /// New size; clamped on apply.
    #[serde(alias = "size", alias = "fontSize")]
    pub font_size_px: Option<u32>,
    /// New weight.
    pub font_weight: Option<FontWeight>,
    /// New slant.
    pub font_style: Option<FontStyle>,
    /// New alignment.
    #[serde(alias = "alignment", alias = "textAlign")]
    pub text_align: Option<TextAlign>,
}

impl TextStylePatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Stable identity of a frame inside a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameId(pub u64);

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// One unit of composition: background, quote, text placement/style and display duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Identity within a sequence (`FrameId(0)` for the implicit single frame).
    pub id: FrameId,
    /// Background image, if any.
    pub image: ImageSource,
    /// Quote text; `\n` separates lines on the single-image path.
    pub quote_text: String,
    /// Anchor of the text block.
    pub text_position: TextPosition,
    /// Text styling.
    pub text_style: TextStyle,
    /// How long this frame is shown in an animation.
    pub display_duration_ms: u32,
}

impl Frame {
    /// A frame with the given content and style, centered text and the default duration.
    pub fn new(
        id: FrameId,
        image: ImageSource,
        quote_text: impl Into<String>,
        style: TextStyle,
    ) -> Self {
        Self {
            id,
            image,
            quote_text: quote_text.into(),
            text_position: TextPosition::CENTER,
            text_style: style,
            display_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: &FramePatch) {
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(text) = &patch.quote_text {
            self.quote_text = text.clone();
        }
        if let Some(pos) = patch.text_position {
            self.text_position = pos;
        }
        self.text_style.apply(&patch.style);
        if let Some(ms) = patch.display_duration_ms {
            self.display_duration_ms = ms;
        }
    }
}

/// Partial [`Frame`] update used by `update_frame`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePatch {
    /// Replacement background.
    pub image: Option<ImageSource>,
    /// Replacement quote.
    pub quote_text: Option<String>,
    /// Replacement position.
    pub text_position: Option<TextPosition>,
    /// Style changes.
    pub style: TextStylePatch,
    /// Replacement display duration.
    pub display_duration_ms: Option<u32>,
}

impl From<TextStylePatch> for FramePatch {
    fn from(style: TextStylePatch) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/frame.rs"]
mod tests;
