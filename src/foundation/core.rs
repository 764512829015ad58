use crate::foundation::error::{StayframeError, StayframeResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Native pixel size of an export target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasDimensions {
    /// Validated constructor. Both sides must fit the raster backend (`u16`) and be non-zero.
    pub fn new(width: u32, height: u32) -> StayframeResult<Self> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    /// Check that the raster backend can allocate a surface of this size.
    pub fn validate(self) -> StayframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StayframeError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(StayframeError::validation(format!(
                "canvas {}x{} exceeds the maximum surface size",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Width divided by height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    pub(crate) fn as_u16(self) -> StayframeResult<(u16, u16)> {
        self.validate()?;
        Ok((self.width as u16, self.height as u16))
    }
}

/// On-screen preview size in CSS-like pixels. Never used for export.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplaySize {
    /// Preview width.
    pub width: f64,
    /// Preview height.
    pub height: f64,
}

impl From<CanvasDimensions> for DisplaySize {
    fn from(d: CanvasDimensions) -> Self {
        Self {
            width: f64::from(d.width),
            height: f64::from(d.height),
        }
    }
}
