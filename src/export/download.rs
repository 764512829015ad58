use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::data_url::decode_data_url;
use crate::export::urls::{ObjectUrls, is_object_url};
use crate::foundation::error::{StayframeError, StayframeResult};

/// Filename used by the quick "download" action.
pub const QUICK_EXPORT_FILENAME: &str = "social-post.png";
/// Filename used for animated exports.
pub const GIF_FILENAME: &str = "stayframe.gif";

/// `stayframe-<unix-ms>.png`, used by the preview download.
pub fn timestamped_filename(unix_ms: u64) -> String {
    format!("stayframe-{unix_ms}.png")
}

/// Bytes behind a data URL or one of our object URLs.
pub fn resolve_bytes(url: &str, urls: &ObjectUrls) -> StayframeResult<Vec<u8>> {
    if is_object_url(url) {
        let blob = urls
            .get(url)
            .ok_or_else(|| {
                StayframeError::validation(format!("unknown or revoked object URL {url}"))
            })?;
        return Ok(blob.bytes.as_ref().clone());
    }
    if url
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
    {
        return Ok(decode_data_url(url)?.1);
    }
    Err(StayframeError::validation(
        "download expects a data: URL or an object URL",
    ))
}

/// Save the image behind `url` to `dest`, creating parent directories.
///
/// A directory `dest` receives `filename` inside it.
#[tracing::instrument(skip(url, urls))]
pub fn download(
    url: &str,
    dest: &Path,
    filename: &str,
    urls: &ObjectUrls,
) -> StayframeResult<PathBuf> {
    let bytes = resolve_bytes(url, urls)?;
    let path = if dest.is_dir() {
        dest.join(filename)
    } else {
        dest.to_path_buf()
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    std::fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "download saved");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/export/download.rs"]
mod tests;
