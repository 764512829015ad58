/// Convenience result type used across Stayframe.
pub type StayframeResult<T> = Result<T, StayframeError>;

/// Why a clipboard write did not happen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClipboardFailure {
    /// No usable clipboard mechanism exists on this host.
    Unavailable(String),
    /// A clipboard mechanism exists but the write failed.
    Failed(String),
}

impl std::fmt::Display for ClipboardFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(detail) => write!(
                f,
                "clipboard is not available ({detail}); try exporting the image instead"
            ),
            Self::Failed(detail) => write!(f, "failed to copy image to clipboard: {detail}"),
        }
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StayframeError {
    /// Invalid caller-provided data (frame indices, durations, presets, documents).
    #[error("validation error: {0}")]
    Validation(String),

    /// A background image could not be fetched or decoded.
    #[error("load error: {0}")]
    Load(String),

    /// Drawing a frame failed.
    #[error("render error: {0}")]
    Render(String),

    /// PNG or GIF encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Copying to the system clipboard failed.
    #[error("{0}")]
    Clipboard(ClipboardFailure),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StayframeError {
    /// Build a [`StayframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StayframeError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`StayframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StayframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StayframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error means "no clipboard here" rather than a failed write.
    pub fn is_clipboard_unavailable(&self) -> bool {
        matches!(self, Self::Clipboard(ClipboardFailure::Unavailable(_)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
