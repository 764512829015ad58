use serde_json::Value;

use crate::assets::resolve::ImageSource;
use crate::foundation::error::{StayframeError, StayframeResult};
use crate::model::frame::{DEFAULT_FRAME_DURATION_MS, Frame, FrameId, FramePatch, TextStyle};

/// Ordered list of frames for animated output.
///
/// Frame ids are allocated monotonically and never reused, so removals do not
/// alias later frames.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    next_id: u64,
    default_duration_ms: u32,
}

impl Default for FrameSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSequence {
    /// Empty sequence with the 500 ms default duration.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            next_id: 1,
            default_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }

    /// Build one frame per (image, quote) pair with GIF defaults.
    pub fn from_pairs<I, Q>(pairs: impl IntoIterator<Item = (I, Q)>) -> Self
    where
        I: Into<ImageSource>,
        Q: Into<String>,
    {
        let mut seq = Self::new();
        for (image, quote) in pairs {
            seq.add_frame(image.into(), quote);
        }
        seq
    }

    /// Frames in display order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Look a frame up by id.
    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id == id)
    }

    /// Duration given to frames added from now on.
    pub fn default_duration_ms(&self) -> u32 {
        self.default_duration_ms
    }

    /// Change the duration given to frames added from now on.
    pub fn set_frame_duration(&mut self, ms: u32) {
        self.default_duration_ms = ms;
    }

    /// Append a frame with GIF text defaults and return its id.
    pub fn add_frame(&mut self, image: ImageSource, quote_text: impl Into<String>) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        let mut frame = Frame::new(id, image, quote_text, TextStyle::gif_default());
        frame.display_duration_ms = self.default_duration_ms;
        self.frames.push(frame);
        tracing::debug!(%id, len = self.frames.len(), "frame added");
        id
    }

    /// Append an already-built frame, assigning it a fresh id.
    pub fn push_frame(&mut self, mut frame: Frame) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        frame.id = id;
        self.frames.push(frame);
        id
    }

    /// Append a frame whose quote is resolved from a loosely-shaped value.
    pub fn add_frame_from_value(&mut self, image: ImageSource, quote: &Value) -> FrameId {
        self.add_frame(image, resolve_quote_text(quote))
    }

    /// Remove a frame. Returns `false` when the id is unknown.
    pub fn remove_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|f| f.id != id);
        before != self.frames.len()
    }

    /// Apply a partial update to one frame; other frames are untouched.
    pub fn update_frame(&mut self, id: FrameId, patch: &FramePatch) -> StayframeResult<()> {
        let frame = self
            .get_mut(id)
            .ok_or_else(|| StayframeError::validation(format!("unknown frame id {id}")))?;
        frame.apply(patch);
        Ok(())
    }

    /// Move the frame at index `from` so it ends up at index `to`.
    ///
    /// A `to` past the end moves the frame to the end.
    pub fn reorder_frames(&mut self, from: usize, to: usize) -> StayframeResult<()> {
        if from >= self.frames.len() {
            return Err(StayframeError::validation(format!(
                "reorder source index {from} out of range for {} frames",
                self.frames.len()
            )));
        }
        let frame = self.frames.remove(from);
        let to = to.min(self.frames.len());
        self.frames.insert(to, frame);
        Ok(())
    }

    /// Drop every frame. Ids keep increasing.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Extract display text from a quote that may be a string, an object with
/// `text` or `quote`, or anything else (serialized as JSON).
pub fn resolve_quote_text(quote: &Value) -> String {
    match quote {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            for key in ["text", "quote"] {
                if let Some(Value::String(s)) = map.get(key) {
                    return s.clone();
                }
            }
            quote.to_string()
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/sequence.rs"]
mod tests;
