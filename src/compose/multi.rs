//! Multi-frame compositing into an animated image.

use crate::assets::load::LoadOptions;
use crate::compose::fit::cover_fit;
use crate::compose::single::{Compositor, LINE_HEIGHT_FACTOR, aligned_x};
use crate::encode::gif::GifSink;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::color::CssColor;
use crate::foundation::core::CanvasDimensions;
use crate::foundation::error::{StayframeError, StayframeResult};
use crate::model::frame::Frame;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuCanvas, PlacedLine};

/// Wrapped lines may not exceed this fraction of the canvas width (except single words).
pub const WRAP_WIDTH_FRACTION: f64 = 0.8;

/// Greedy word wrap over space-separated words.
///
/// Each candidate line keeps its trailing space when measured, and a line
/// is flushed only when adding a word pushes it past `max_width` and at
/// least one word has been placed.
pub fn wrap_words(
    text: &str,
    max_width: f64,
    mut measure: impl FnMut(&str) -> StayframeResult<f32>,
) -> StayframeResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (n, word) in text.split(' ').enumerate() {
        let test_line = format!("{line}{word} ");
        if f64::from(measure(&test_line)?) > max_width && n > 0 {
            lines.push(std::mem::replace(&mut line, format!("{word} ")));
        } else {
            line = test_line;
        }
    }
    lines.push(line);
    Ok(lines)
}

impl Compositor {
    /// Render one animation frame: black clear, cover-fit background, wrapped text, watermark.
    #[tracing::instrument(skip(self, frame), fields(frame = %frame.id))]
    pub fn render_gif_frame(
        &mut self,
        dims: CanvasDimensions,
        frame: &Frame,
    ) -> StayframeResult<FrameRGBA> {
        dims.validate()?;
        let mut canvas = CpuCanvas::new(dims)?;
        canvas.clear(CssColor::BLACK);

        if let Some(img) = self.load_background(frame, &LoadOptions::preview()) {
            let dest = cover_fit(
                f64::from(img.width),
                f64::from(img.height),
                f64::from(dims.width),
                f64::from(dims.height),
            );
            canvas.draw_image(&img, dest)?;
        }

        if !frame.quote_text.is_empty() {
            let style = frame.text_style.clone();
            let face = self.resolve_face(frame)?;
            let size = style.font_size_px as f32;
            let (x, y) = frame
                .text_position
                .to_pixels(f64::from(dims.width), f64::from(dims.height));
            let max_width = f64::from(dims.width) * WRAP_WIDTH_FRACTION;

            let lines = wrap_words(&frame.quote_text, max_width, |candidate| {
                self.measure(&face, candidate, size)
            })?;

            let line_height = f64::from(style.font_size_px) * LINE_HEIGHT_FACTOR;
            let mut placed = Vec::with_capacity(lines.len());
            for (i, text) in lines.iter().enumerate() {
                let shaped = self.shape(&face, text, size)?;
                placed.push(PlacedLine {
                    x: aligned_x(x, shaped.width, style.text_align),
                    baseline: y + i as f64 * line_height,
                    line: shaped,
                });
            }
            canvas.draw_text(&face, size, &placed, style.color, None)?;
        }

        self.draw_watermark(&mut canvas)?;
        Ok(canvas.into_frame())
    }

    /// Render `frames` in order into `sink`, reporting `completed / total` after each frame.
    ///
    /// Frame `i + 1` is not started before frame `i`'s background load settled.
    pub fn generate(
        &mut self,
        dims: CanvasDimensions,
        frames: &[Frame],
        sink: &mut dyn FrameSink,
        progress: &mut dyn FnMut(f64),
    ) -> StayframeResult<()> {
        if frames.is_empty() {
            return Err(StayframeError::validation("cannot generate an animation from zero frames"));
        }
        dims.validate()?;
        sink.begin(SinkConfig {
            width: dims.width,
            height: dims.height,
        })?;
        let total = frames.len();
        for (i, frame) in frames.iter().enumerate() {
            let pixels = self.render_gif_frame(dims, frame)?;
            sink.push_frame(&pixels, frame.display_duration_ms)?;
            progress((i + 1) as f64 / total as f64);
        }
        sink.end()?;
        tracing::info!(frames = total, "animation assembled");
        Ok(())
    }

    /// [`Compositor::generate`] into an in-memory GIF.
    pub fn generate_gif(
        &mut self,
        dims: CanvasDimensions,
        frames: &[Frame],
        progress: &mut dyn FnMut(f64),
    ) -> StayframeResult<Vec<u8>> {
        let mut sink = GifSink::in_memory();
        self.generate(dims, frames, &mut sink, progress)?;
        sink.into_inner()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/multi.rs"]
mod tests;
