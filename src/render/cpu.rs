use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::color::CssColor;
use crate::foundation::core::{Affine, CanvasDimensions, Rect, Vec2};
use crate::foundation::error::{StayframeError, StayframeResult};
use crate::render::backend::FrameRGBA;
use crate::render::blur::{blur_rgba8_premul, shadow_blur_params};
use crate::render::composite::{Placed, fill_over_in_place, over_at, over_in_place};
use crate::text::fonts::FontFace;
use crate::text::shape::ShapedLine;

/// Canvas-style drop shadow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropShadow {
    pub offset: Vec2,
    pub blur_px: f32,
    pub color: CssColor,
}

impl DropShadow {
    /// `2px 2px 5px rgba(0, 0, 0, 0.5)`, used behind quote text.
    pub const LEGIBILITY: Self = Self {
        offset: Vec2::new(2.0, 2.0),
        blur_px: 5.0,
        color: CssColor::rgba(0, 0, 0, 128),
    };
}

/// A shaped line placed on the canvas: left edge and baseline in canvas pixels.
#[derive(Clone, Debug)]
pub struct PlacedLine {
    pub line: ShapedLine,
    pub x: f64,
    pub baseline: f64,
}

/// Premultiplied RGBA8 raster at native export resolution.
///
/// Each draw call renders into a transparent `vello_cpu` layer that is then
/// composited onto the accumulated pixels, so later draws never disturb state
/// left by earlier ones.
pub struct CpuCanvas {
    width: u16,
    height: u16,
    data: Vec<u8>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl CpuCanvas {
    /// Transparent canvas of exactly `dims`.
    pub fn new(dims: CanvasDimensions) -> StayframeResult<Self> {
        let (width, height) = dims.as_u16()?;
        Ok(Self {
            width,
            height,
            data: vec![0; dims.rgba_len()],
            ctx: None,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Replace every pixel with `color`.
    pub fn clear(&mut self, color: CssColor) {
        let px = color.to_premul();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Composite a flat color over the whole canvas.
    pub fn fill_overlay(&mut self, color: CssColor) {
        fill_over_in_place(&mut self.data, color.to_premul());
    }

    /// Draw `image` scaled into `dest`; parts outside the canvas are clipped.
    pub fn draw_image(&mut self, image: &PreparedImage, dest: Rect) -> StayframeResult<()> {
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        let paint = image_paint(image)?;
        let transform = Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(
                dest.width() / f64::from(image.width),
                dest.height() / f64::from(image.height),
            );
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        let layer = self.render_layer(|ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        });
        over_in_place(&mut self.data, &layer)
    }

    /// Fill glyphs of every line in `color`, optionally with a blurred drop shadow underneath.
    pub fn draw_text(
        &mut self,
        face: &FontFace,
        size_px: f32,
        lines: &[PlacedLine],
        color: CssColor,
        shadow: Option<DropShadow>,
    ) -> StayframeResult<()> {
        if lines.iter().all(|l| l.line.glyphs.is_empty()) {
            return Ok(());
        }
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
            face.index,
        );

        if let Some(shadow) = shadow.filter(|s| s.color.a > 0) {
            let coverage = self.glyph_layer(&font, size_px, lines, shadow.color);
            self.composite_shadow(&coverage, shadow)?;
        }

        let layer = self.glyph_layer(&font, size_px, lines, color);
        over_in_place(&mut self.data, &layer)
    }

    /// Finish and hand out the pixels.
    pub fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.data,
            premultiplied: true,
        }
    }

    fn glyph_layer(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        size_px: f32,
        lines: &[PlacedLine],
        color: CssColor,
    ) -> Vec<u8> {
        self.render_layer(|ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
            for placed in lines {
                if placed.line.glyphs.is_empty() {
                    continue;
                }
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                    placed.x,
                    placed.baseline,
                )));
                let glyphs = placed.line.glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font).font_size(size_px).fill_glyphs(glyphs);
            }
        })
    }

    fn composite_shadow(&mut self, coverage: &[u8], shadow: DropShadow) -> StayframeResult<()> {
        let (w, h) = (self.width(), self.height());
        let Some((x0, y0, x1, y1)) = alpha_bounds(coverage, w, h) else {
            return Ok(());
        };
        let (radius, sigma) = shadow_blur_params(shadow.blur_px);

        // Blur only the inked region, padded so the kernel sees transparent edges.
        let pad = radius + 1;
        let bx0 = x0.saturating_sub(pad);
        let by0 = y0.saturating_sub(pad);
        let bx1 = (x1 + pad).min(w);
        let by1 = (y1 + pad).min(h);
        let (bw, bh) = (bx1 - bx0, by1 - by0);

        let mut region = Vec::with_capacity((bw as usize) * (bh as usize) * 4);
        for y in by0..by1 {
            let start = ((y * w + bx0) * 4) as usize;
            region.extend_from_slice(&coverage[start..start + (bw as usize) * 4]);
        }
        let blurred = if radius > 0 {
            blur_rgba8_premul(&region, bw, bh, radius, sigma)?
        } else {
            region
        };

        over_at(
            &mut self.data,
            w,
            h,
            Placed {
                data: &blurred,
                width: bw,
                height: bh,
                x: i64::from(bx0) + shadow.offset.x.round() as i64,
                y: i64::from(by0) + shadow.offset.y.round() as i64,
            },
        )
    }

    fn render_layer(&mut self, draw: impl FnOnce(&mut vello_cpu::RenderContext)) -> Vec<u8> {
        let (width, height) = (self.width, self.height);
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        draw(&mut ctx);
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        pixmap.data_as_u8_slice().to_vec()
    }
}

fn alpha_bounds(data: &[u8], width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        let row = &data[(y * width * 4) as usize..((y + 1) * width * 4) as usize];
        let mut first = None;
        let mut last = 0;
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] != 0 {
                first.get_or_insert(x as u32);
                last = x as u32;
            }
        }
        if let Some(first) = first {
            bounds = Some(match bounds {
                None => (first, y, last + 1, y + 1),
                Some((bx0, by0, bx1, _)) => (bx0.min(first), by0, bx1.max(last + 1), y + 1),
            });
        }
    }
    bounds
}

fn image_paint(image: &PreparedImage) -> StayframeResult<vello_cpu::Image> {
    let w: u16 = image
        .width
        .try_into()
        .map_err(|_| StayframeError::render("image width exceeds u16"))?;
    let h: u16 = image
        .height
        .try_into()
        .map_err(|_| StayframeError::render("image height exceeds u16"))?;
    // Pixmap stores PremulRgba8; decoded images are already premultiplied.
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = image
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
