use std::borrow::Cow;
use std::collections::HashMap;

use crate::foundation::error::{StayframeError, StayframeResult};
use crate::text::fonts::FontFace;

/// One glyph, positioned relative to the line's left edge and baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// A single shaped line of text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedLine {
    pub glyphs: Vec<ShapedGlyph>,
    /// Advance width including trailing whitespace.
    pub width: f32,
    /// Distance from baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line box.
    pub descent: f32,
}

/// A font collection holding exactly one face, plus the family name parley gave it.
struct FaceContext {
    font_ctx: parley::FontContext,
    family: String,
}

impl FaceContext {
    fn register(face: &FontFace) -> StayframeResult<Self> {
        // One collection per face: parley matches within a family by style, not by id.
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.data.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StayframeError::render("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StayframeError::render("registered font family has no name"))?
            .to_string();
        Ok(Self { font_ctx, family })
    }
}

fn face_context<'a>(
    faces: &'a mut HashMap<usvg::fontdb::ID, FaceContext>,
    face: &FontFace,
) -> StayframeResult<&'a mut FaceContext> {
    if !faces.contains_key(&face.id) {
        faces.insert(face.id, FaceContext::register(face)?);
    }
    faces
        .get_mut(&face.id)
        .ok_or_else(|| StayframeError::render("font face context missing"))
}

/// Stateful helper for shaping single lines with Parley from raw font bytes.
pub(crate) struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<usvg::fontdb::ID, FaceContext>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    /// Shape `text` as one unbroken line.
    pub(crate) fn shape_line(
        &mut self,
        face: &FontFace,
        text: &str,
        size_px: f32,
    ) -> StayframeResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StayframeError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let ctx = face_context(&mut self.faces, face)?;
        let family = ctx.family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut ctx.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut out = ShapedLine::default();
        for line in layout.lines() {
            let metrics = line.metrics();
            out.ascent = out.ascent.max(metrics.ascent);
            out.descent = out.descent.max(metrics.descent);
            let baseline = metrics.baseline;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                out.width += run.advance();
                out.glyphs
                    .extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                        id: g.id,
                        x: g.x,
                        y: g.y - baseline,
                    }));
            }
        }
        Ok(out)
    }

    /// Advance width of `text` on one line.
    pub(crate) fn measure(
        &mut self,
        face: &FontFace,
        text: &str,
        size_px: f32,
    ) -> StayframeResult<f32> {
        Ok(self.shape_line(face, text, size_px)?.width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shape.rs"]
mod tests;
