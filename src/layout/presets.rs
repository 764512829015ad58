use crate::foundation::core::{CanvasDimensions, DisplaySize};

/// Identifier used when a caller passes an unknown aspect ratio.
pub const DEFAULT_ASPECT_RATIO: &str = "instagram-square";

/// Preview width bound used by the single-image editor.
pub const EDITOR_MAX_DISPLAY_WIDTH: f64 = 600.0;

/// Preview bounds used by the multi-frame (GIF) editor.
pub const GIF_EDITOR_MAX_DISPLAY: (f64, f64) = (800.0, 600.0);

/// A named social-media output target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AspectPreset {
    /// Stable identifier (`twitter-post`, `instagram-story`, ...).
    pub id: &'static str,
    /// Native pixel size.
    pub dims: CanvasDimensions,
}

const fn preset(id: &'static str, width: u32, height: u32) -> AspectPreset {
    AspectPreset {
        id,
        dims: CanvasDimensions { width, height },
    }
}

/// Every supported preset, grouped by network.
pub const ASPECT_PRESETS: [AspectPreset; 13] = [
    preset("twitter-post", 1024, 512),
    preset("twitter-header", 1500, 500),
    preset("facebook-post", 1200, 630),
    preset("facebook-cover", 851, 315),
    preset("instagram-square", 1080, 1080),
    preset("instagram-portrait", 1080, 1350),
    preset("instagram-story", 1080, 1920),
    preset("instagram-reels", 1080, 1920),
    preset("linkedin-post", 1200, 627),
    preset("linkedin-cover", 1584, 396),
    preset("pinterest-pin", 1000, 1500),
    preset("youtube-thumbnail", 1280, 720),
    preset("tiktok-video", 1080, 1920),
];

/// Look up a preset by identifier.
pub fn find_preset(aspect_ratio_id: &str) -> Option<&'static AspectPreset> {
    ASPECT_PRESETS.iter().find(|p| p.id == aspect_ratio_id)
}

/// Map an aspect-ratio identifier to native pixel dimensions.
///
/// Unknown identifiers resolve to [`DEFAULT_ASPECT_RATIO`] (1080x1080). Never fails.
pub fn resolve_dimensions(aspect_ratio_id: &str) -> CanvasDimensions {
    match find_preset(aspect_ratio_id) {
        Some(p) => p.dims,
        None => {
            tracing::debug!(aspect_ratio_id, "unknown aspect ratio, using default preset");
            CanvasDimensions {
                width: 1080,
                height: 1080,
            }
        }
    }
}

/// Scale `dims` down uniformly so the width fits `max_width_px`.
///
/// Dimensions already within bounds are returned unchanged.
pub fn compute_display_size(dims: CanvasDimensions, max_width_px: f64) -> DisplaySize {
    let full = DisplaySize::from(dims);
    if full.width <= max_width_px {
        return full;
    }
    DisplaySize {
        width: max_width_px,
        height: max_width_px / dims.aspect(),
    }
}

/// Scale `dims` to fit inside a `max_width_px` x `max_height_px` box, flooring to whole pixels.
///
/// Unlike [`compute_display_size`] this may also scale up, matching the GIF editor preview.
pub fn compute_fit_size(
    dims: CanvasDimensions,
    max_width_px: f64,
    max_height_px: f64,
) -> DisplaySize {
    // Epsilon keeps exact fits (600/1080 * 1080) from flooring to 599.
    let floor = |v: f64| (v + 1e-9).floor();
    let ratio = (max_width_px / f64::from(dims.width)).min(max_height_px / f64::from(dims.height));
    DisplaySize {
        width: floor(f64::from(dims.width) * ratio),
        height: floor(f64::from(dims.height) * ratio),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/presets.rs"]
mod tests;
