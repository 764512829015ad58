use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::assets::data_url::decode_data_url;
use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::resolve::ImageSource;
use crate::foundation::error::{StayframeError, StayframeResult};

/// Cross-origin policy for a load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrossOrigin {
    /// No explicit marker.
    #[default]
    Default,
    /// Credential-less request, marked with `crossorigin=anonymous`.
    Anonymous,
}

/// Per-load options distinguishing preview loads from export loads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Cross-origin marker.
    pub cross_origin: CrossOrigin,
    /// Cache-breaking token appended as `cb=<token>` to remote URLs.
    pub cache_bust: Option<u64>,
}

impl LoadOptions {
    /// Options for on-screen preview loads.
    pub fn preview() -> Self {
        Self {
            cross_origin: CrossOrigin::Anonymous,
            cache_bust: None,
        }
    }

    /// Options for export loads, cache-busted with the current time in milliseconds.
    pub fn export() -> Self {
        Self::export_at(unix_millis())
    }

    /// Export options with an explicit cache-bust token.
    pub fn export_at(token: u64) -> Self {
        Self {
            cross_origin: CrossOrigin::Anonymous,
            cache_bust: Some(token),
        }
    }
}

pub(crate) fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The URL actually requested for `url` under `opts`.
///
/// Only `http(s)` URLs are rewritten; data URLs and paths pass through.
pub fn request_url(url: &str, opts: &LoadOptions) -> String {
    let Ok(mut parsed) = url::Url::parse(url) else {
        return url.to_string();
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return url.to_string();
    }
    {
        let mut query = parsed.query_pairs_mut();
        if opts.cross_origin == CrossOrigin::Anonymous && opts.cache_bust.is_some() {
            query.append_pair("crossorigin", "anonymous");
        }
        if let Some(token) = opts.cache_bust {
            query.append_pair("cb", &token.to_string());
        }
    }
    if parsed.query() == Some("") {
        parsed.set_query(None);
    }
    parsed.into()
}

/// Source of decoded background images.
pub trait ImageLoader {
    /// Load and decode `source`. Callers decide whether a failure is fatal.
    fn load(&self, source: &ImageSource, opts: &LoadOptions) -> StayframeResult<PreparedImage>;
}

/// Loader for data URLs, filesystem paths, `file://` URLs and (with the `http`
/// feature) remote URLs.
#[derive(Debug)]
pub struct DefaultImageLoader {
    base_dir: Option<PathBuf>,
    #[cfg(feature = "http")]
    client: reqwest::blocking::Client,
}

/// Settings for [`DefaultImageLoader`].
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// Directory relative paths are resolved against.
    pub base_dir: Option<PathBuf>,
    /// Network timeout for remote fetches.
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            timeout: Duration::from_secs(20),
        }
    }
}

impl DefaultImageLoader {
    /// Build a loader.
    pub fn new(config: LoaderConfig) -> StayframeResult<Self> {
        #[cfg(feature = "http")]
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("stayframe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StayframeError::load(format!("failed to build HTTP client: {e}")))?;
        #[cfg(not(feature = "http"))]
        let _ = config.timeout;

        Ok(Self {
            base_dir: config.base_dir,
            #[cfg(feature = "http")]
            client,
        })
    }

    fn load_path(&self, path: &Path) -> StayframeResult<PreparedImage> {
        let path = match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        };
        let bytes = std::fs::read(&path)
            .map_err(|e| StayframeError::load(format!("read {}: {e}", path.display())))?;
        decode_image(&bytes)
    }

    #[cfg(feature = "http")]
    fn fetch(&self, url: &str) -> StayframeResult<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| StayframeError::load(format!("fetch {url}: {e}")))?;
        let bytes = resp
            .bytes()
            .map_err(|e| StayframeError::load(format!("read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "http"))]
    fn fetch(&self, url: &str) -> StayframeResult<Vec<u8>> {
        Err(StayframeError::load(format!(
            "cannot fetch {url}: built without the `http` feature"
        )))
    }
}

impl ImageLoader for DefaultImageLoader {
    #[tracing::instrument(level = "debug", skip_all)]
    fn load(&self, source: &ImageSource, opts: &LoadOptions) -> StayframeResult<PreparedImage> {
        match source {
            ImageSource::None => Err(StayframeError::load("no image source")),
            ImageSource::DataUrl(url) => {
                let (_mime, bytes) = decode_data_url(url)?;
                decode_image(&bytes)
            }
            ImageSource::Url(url) => match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                    let target = request_url(url, opts);
                    tracing::debug!(url = %target, "fetching image");
                    decode_image(&self.fetch(&target)?)
                }
                Ok(parsed) if parsed.scheme() == "file" => {
                    let path = parsed
                        .to_file_path()
                        .map_err(|()| StayframeError::load(format!("bad file URL {url}")))?;
                    self.load_path(&path)
                }
                Ok(parsed) if parsed.scheme().len() > 1 => Err(StayframeError::load(format!(
                    "unsupported image URL scheme `{}`",
                    parsed.scheme()
                ))),
                // Relative paths and Windows drive letters land here.
                _ => self.load_path(Path::new(url)),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/load.rs"]
mod tests;
