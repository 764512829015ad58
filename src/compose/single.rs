//! Single-frame compositing: background, legibility overlay, quote text and
//! watermark rasterized at native export resolution.

use crate::assets::decode::PreparedImage;
use crate::assets::load::{DefaultImageLoader, ImageLoader, LoadOptions, LoaderConfig};
use crate::assets::resolve::ImageSource;
use crate::compose::fit::cover_fit;
use crate::encode::png::encode_png_data_url;
use crate::foundation::color::CssColor;
use crate::foundation::core::CanvasDimensions;
use crate::foundation::error::StayframeResult;
use crate::model::frame::{FontStyle, FontWeight, Frame, TextAlign};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuCanvas, DropShadow, PlacedLine};
use crate::text::fonts::{FontBook, FontConfig, FontFace};
use crate::text::shape::{ShapedLine, TextLayoutEngine};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Flat overlay drawn over loaded backgrounds.
pub const BACKGROUND_OVERLAY: CssColor = CssColor::rgba(0, 0, 0, 51);
/// Brand mark drawn on every export.
pub const WATERMARK_TEXT: &str = "powered by stayframe.fyi";
pub const WATERMARK_FONT: &str = "Arial, sans-serif";
pub const WATERMARK_SIZE_PX: f32 = 13.0;
pub const WATERMARK_COLOR: CssColor = CssColor::rgb(0x33, 0x3c, 0x4d);
/// Distance of the watermark's right/bottom edge from the canvas corner.
pub const WATERMARK_MARGIN_PX: f64 = 14.0;

/// Rasterizes frames. Owns fonts, the shaping engine and the image loader.
///
/// Methods take `&mut self`, so one compositor runs at most one export at a time.
pub struct Compositor {
    fonts: FontBook,
    text: TextLayoutEngine,
    loader: Box<dyn ImageLoader>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    pub fn new(fonts: FontBook, loader: Box<dyn ImageLoader>) -> Self {
        Self {
            fonts,
            text: TextLayoutEngine::new(),
            loader,
        }
    }

    /// Compositor with fonts from `config` and the default loader.
    pub fn from_config(fonts: &FontConfig, loader: LoaderConfig) -> StayframeResult<Self> {
        Ok(Self::new(
            FontBook::new(fonts),
            Box::new(DefaultImageLoader::new(loader)?),
        ))
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// Load an image for on-screen preview. Failures are returned, not logged.
    pub fn preview_image(&self, source: &ImageSource) -> StayframeResult<PreparedImage> {
        self.loader.load(source, &LoadOptions::preview())
    }

    /// Load a frame's background, logging and swallowing failures.
    pub(crate) fn load_background(
        &self,
        frame: &Frame,
        opts: &LoadOptions,
    ) -> Option<PreparedImage> {
        if frame.image.is_none() {
            return None;
        }
        match self.loader.load(&frame.image, opts) {
            Ok(img) => Some(img),
            Err(err) => {
                tracing::warn!(
                    frame = %frame.id,
                    error = %err,
                    "background failed to load; continuing without it"
                );
                None
            }
        }
    }

    /// Render one frame to pixels at exactly `dims`.
    #[tracing::instrument(skip(self, frame), fields(frame = %frame.id))]
    pub fn render_frame(
        &mut self,
        dims: CanvasDimensions,
        frame: &Frame,
    ) -> StayframeResult<FrameRGBA> {
        let background = self.load_background(frame, &LoadOptions::export());
        self.render_frame_with(dims, frame, background.as_ref())
    }

    /// Render one frame and serialize it as a PNG data URL.
    pub fn render(&mut self, dims: CanvasDimensions, frame: &Frame) -> StayframeResult<String> {
        let pixels = self.render_frame(dims, frame)?;
        let url = encode_png_data_url(&pixels)?;
        tracing::info!(
            width = dims.width,
            height = dims.height,
            bytes = url.len(),
            "image exported"
        );
        Ok(url)
    }

    pub(crate) fn render_frame_with(
        &mut self,
        dims: CanvasDimensions,
        frame: &Frame,
        background: Option<&PreparedImage>,
    ) -> StayframeResult<FrameRGBA> {
        dims.validate()?;
        let mut canvas = CpuCanvas::new(dims)?;
        canvas.clear(CssColor::WHITE);

        if let Some(img) = background {
            let dest = cover_fit(
                f64::from(img.width),
                f64::from(img.height),
                f64::from(dims.width),
                f64::from(dims.height),
            );
            canvas.draw_image(img, dest)?;
            canvas.fill_overlay(BACKGROUND_OVERLAY);
        }

        if !frame.quote_text.is_empty() {
            let style = &frame.text_style;
            let face = self
                .fonts
                .resolve(&style.font_family, style.font_weight, style.font_style)?;
            let size = style.font_size_px as f32;
            let (x, y) = frame
                .text_position
                .to_pixels(f64::from(dims.width), f64::from(dims.height));

            let lines: Vec<&str> = frame.quote_text.split('\n').collect();
            let line_height = f64::from(style.font_size_px) * LINE_HEIGHT_FACTOR;
            let start_y = y - (lines.len() as f64 * line_height) / 2.0;

            let mut placed = Vec::with_capacity(lines.len());
            for (i, text) in lines.iter().enumerate() {
                let shaped = self.text.shape_line(&face, text, size)?;
                let center_y = start_y + i as f64 * line_height + line_height / 2.0;
                let baseline = middle_baseline(center_y, &shaped);
                placed.push(PlacedLine {
                    x: aligned_x(x, shaped.width, style.text_align),
                    baseline,
                    line: shaped,
                });
            }
            canvas.draw_text(&face, size, &placed, style.color, Some(DropShadow::LEGIBILITY))?;
        }

        self.draw_watermark(&mut canvas)?;
        Ok(canvas.into_frame())
    }

    /// Right/bottom anchored brand mark; no shadow.
    pub(crate) fn draw_watermark(&mut self, canvas: &mut CpuCanvas) -> StayframeResult<()> {
        let face = self
            .fonts
            .resolve(WATERMARK_FONT, FontWeight::Normal, FontStyle::Normal)?;
        let shaped = self.text.shape_line(&face, WATERMARK_TEXT, WATERMARK_SIZE_PX)?;
        let right = f64::from(canvas.width()) - WATERMARK_MARGIN_PX;
        let bottom = f64::from(canvas.height()) - WATERMARK_MARGIN_PX;
        let placed = [PlacedLine {
            x: aligned_x(right, shaped.width, TextAlign::Right),
            baseline: bottom - f64::from(shaped.descent),
            line: shaped,
        }];
        canvas.draw_text(&face, WATERMARK_SIZE_PX, &placed, WATERMARK_COLOR, None)
    }

    pub(crate) fn shape(
        &mut self,
        face: &FontFace,
        text: &str,
        size_px: f32,
    ) -> StayframeResult<ShapedLine> {
        self.text.shape_line(face, text, size_px)
    }

    pub(crate) fn measure(
        &mut self,
        face: &FontFace,
        text: &str,
        size_px: f32,
    ) -> StayframeResult<f32> {
        self.text.measure(face, text, size_px)
    }

    pub(crate) fn resolve_face(&mut self, frame: &Frame) -> StayframeResult<FontFace> {
        let style = &frame.text_style;
        self.fonts
            .resolve(&style.font_family, style.font_weight, style.font_style)
    }
}

/// Left edge of a line of `width` anchored at `x`.
pub(crate) fn aligned_x(x: f64, width: f32, align: TextAlign) -> f64 {
    match align {
        TextAlign::Left => x,
        TextAlign::Center => x - f64::from(width) / 2.0,
        TextAlign::Right => x - f64::from(width),
    }
}

/// Baseline that vertically centers the line box on `center_y`.
fn middle_baseline(center_y: f64, line: &ShapedLine) -> f64 {
    center_y + f64::from(line.ascent - line.descent) / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/compose/single.rs"]
mod tests;
