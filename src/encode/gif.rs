use std::io::Write;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{StayframeError, StayframeResult};
use crate::render::backend::FrameRGBA;

/// NeuQuant sampling factor; 10 trades speed for palette quality the way gif.js `quality: 10` does.
pub const GIF_QUANTIZE_SPEED: i32 = 10;

/// GIF delays are stored in centiseconds.
pub fn delay_ms_to_centis(ms: u32) -> u16 {
    ((u64::from(ms) + 5) / 10).min(u64::from(u16::MAX)) as u16
}

/// Animated GIF encoder sink, looping forever.
///
/// Bytes are only handed out once `end` succeeded, so a failed encode never
/// yields a partial file.
pub struct GifSink<W: Write> {
    target: Option<W>,
    encoder: Option<gif::Encoder<W>>,
    size: Option<(u16, u16)>,
    frames: usize,
    finished: Option<W>,
}

impl<W: Write> std::fmt::Debug for GifSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("size", &self.size)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl GifSink<Vec<u8>> {
    /// Encode into memory.
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }
}

impl<W: Write> GifSink<W> {
    pub fn new(target: W) -> Self {
        Self {
            target: Some(target),
            encoder: None,
            size: None,
            frames: 0,
            finished: None,
        }
    }

    /// Number of frames written so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// The finished output, available after a successful `end`.
    pub fn into_inner(self) -> StayframeResult<W> {
        self.finished
            .ok_or_else(|| StayframeError::encode("gif encoding did not finish"))
    }
}

impl<W: Write> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> StayframeResult<()> {
        let w: u16 = cfg
            .width
            .try_into()
            .map_err(|_| StayframeError::encode("gif width exceeds u16"))?;
        let h: u16 = cfg
            .height
            .try_into()
            .map_err(|_| StayframeError::encode("gif height exceeds u16"))?;
        let target = self
            .target
            .take()
            .ok_or_else(|| StayframeError::encode("gif sink already started"))?;
        let mut encoder = gif::Encoder::new(target, w, h, &[])
            .map_err(|e| StayframeError::encode(format!("gif header: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| StayframeError::encode(format!("gif loop extension: {e}")))?;
        self.encoder = Some(encoder);
        self.size = Some((w, h));
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA, delay_ms: u32) -> StayframeResult<()> {
        let (w, h) = self
            .size
            .ok_or_else(|| StayframeError::encode("push_frame before begin"))?;
        if frame.width != u32::from(w) || frame.height != u32::from(h) {
            return Err(StayframeError::encode(format!(
                "frame is {}x{}, gif is {w}x{h}",
                frame.width, frame.height
            )));
        }
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| StayframeError::encode("push_frame before begin"))?;

        let mut pixels = frame.to_straight_rgba8();
        let mut gif_frame = gif::Frame::from_rgba_speed(w, h, &mut pixels, GIF_QUANTIZE_SPEED);
        gif_frame.delay = delay_ms_to_centis(delay_ms);
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| StayframeError::encode(format!("gif frame {}: {e}", self.frames)))?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> StayframeResult<()> {
        if self.frames == 0 {
            return Err(StayframeError::encode("gif has no frames"));
        }
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| StayframeError::encode("end before begin"))?;
        let out = encoder
            .into_inner()
            .map_err(|e| StayframeError::encode(format!("gif trailer: {e}")))?;
        self.finished = Some(out);
        tracing::debug!(frames = self.frames, "gif finalized");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
