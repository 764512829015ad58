use std::io::Cursor;

use crate::assets::data_url::encode_data_url;
use crate::foundation::error::{StayframeError, StayframeResult};
use crate::render::backend::FrameRGBA;

/// Encode a frame as PNG bytes (straight alpha).
pub fn encode_png(frame: &FrameRGBA) -> StayframeResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| StayframeError::encode("frame buffer does not match its dimensions"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| StayframeError::encode(format!("png: {e}")))?;
    Ok(out)
}

/// Encode a frame as a `data:image/png;base64,...` URL.
pub fn encode_png_data_url(frame: &FrameRGBA) -> StayframeResult<String> {
    Ok(encode_data_url("image/png", &encode_png(frame)?))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
