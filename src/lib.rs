//! Stayframe composes quote text over background images and exports the result.
//!
//! The API is session-oriented:
//!
//! - An [`Editor`] owns one frame, its interactive [`TextLayer`] and the PNG/clipboard exports
//! - A [`GifSession`] owns a [`FrameSequence`] and renders it into an animated GIF
//! - Both drive a [`Compositor`], which rasterizes frames on the CPU at native preset resolution
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod compose;
mod config;
mod encode;
mod export;
mod foundation;
mod interact;
mod layout;
mod model;
mod render;
mod session;
mod text;

pub use crate::foundation::color::CssColor;
pub use crate::foundation::core::{Affine, CanvasDimensions, DisplaySize, Point, Rect, Vec2};
pub use crate::foundation::error::{ClipboardFailure, StayframeError, StayframeResult};

pub use crate::layout::presets::{
    ASPECT_PRESETS, AspectPreset, DEFAULT_ASPECT_RATIO, EDITOR_MAX_DISPLAY_WIDTH,
    GIF_EDITOR_MAX_DISPLAY, compute_display_size, compute_fit_size, find_preset,
    resolve_dimensions,
};
pub use crate::model::frame::{
    DEFAULT_FRAME_DURATION_MS, FontStyle, FontWeight, Frame, FrameId, FramePatch,
    MAX_FONT_SIZE_PX, MAX_TEXT_POSITION_PCT, MIN_FONT_SIZE_PX, MIN_TEXT_POSITION_PCT,
    PRESET_COLORS, PRESET_FONTS, TextAlign, TextPosition, TextStyle, TextStylePatch,
    clamp_font_size,
};
pub use crate::model::sequence::{FrameSequence, resolve_quote_text};

pub use crate::interact::text_layer::{
    InputOutcome, InteractionMode, InteractionState, Key, TextInput, TextLayer, resize_font_size,
};

pub use crate::assets::data_url::{DataUrl, decode_data_url, encode_data_url};
pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::load::{
    CrossOrigin, DefaultImageLoader, ImageLoader, LoadOptions, LoaderConfig, request_url,
};
pub use crate::assets::resolve::{ImageSource, normalize_image_ref, resolve_image_url};

pub use crate::text::fonts::{FontBook, FontConfig, FontFace, parse_family_stack};

pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::{CpuCanvas, DropShadow};

pub use crate::encode::gif::GifSink;
pub use crate::encode::png::{encode_png, encode_png_data_url};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};

pub use crate::compose::fit::cover_fit;
pub use crate::compose::multi::wrap_words;
pub use crate::compose::single::{Compositor, WATERMARK_TEXT};

#[cfg(feature = "clipboard")]
pub use crate::export::clipboard::ArboardBackend;
pub use crate::export::clipboard::{Clipboard, ClipboardBackend, ClipboardImage, CommandBackend};
pub use crate::export::download::{
    GIF_FILENAME, QUICK_EXPORT_FILENAME, download, timestamped_filename,
};
pub use crate::export::urls::{Blob, ObjectUrls, is_object_url};

pub use crate::session::editor::{Editor, PreviewState};
pub use crate::session::gif_session::GifSession;

pub use crate::catalog::{
    CatalogQuote, DEFAULT_PAGE_LIMIT, QuoteCatalog, QuotePage, SearchImage,
};
pub use crate::config::{FrameSpec, ProjectFile};
