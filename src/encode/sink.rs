use crate::foundation::error::StayframeResult;
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Sink contract for consuming rendered frames in sequence order.
///
/// Ordering contract: `push_frame` is called in sequence order, and each frame
/// carries its own display duration.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StayframeResult<()>;
    /// Push one frame shown for `delay_ms` milliseconds.
    fn push_frame(&mut self, frame: &FrameRGBA, delay_ms: u32) -> StayframeResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> StayframeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameRGBA, u32)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames with their delays, in push order.
    pub fn frames(&self) -> &[(FrameRGBA, u32)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StayframeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA, delay_ms: u32) -> StayframeResult<()> {
        self.frames.push((frame.clone(), delay_ms));
        Ok(())
    }

    fn end(&mut self) -> StayframeResult<()> {
        self.finished = true;
        Ok(())
    }
}
