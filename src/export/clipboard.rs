//! Best-effort image copy to the system clipboard.
//!
//! The native clipboard API is tried first; if it is missing or refuses the
//! write, platform copy commands are tried in order.

use std::io::Write as _;
use std::process::{Command, Stdio};

use crate::assets::data_url::decode_data_url;
use crate::encode::png::encode_png;
use crate::foundation::error::{ClipboardFailure, StayframeError, StayframeResult};
use crate::render::backend::FrameRGBA;

/// An image in both forms clipboard mechanisms want.
#[derive(Clone, Debug)]
pub struct ClipboardImage {
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA8.
    pub rgba: Vec<u8>,
    pub png: Vec<u8>,
}

impl ClipboardImage {
    /// Decode a data URL holding any raster format `image` can read.
    pub fn from_data_url(url: &str) -> StayframeResult<Self> {
        let (mime, bytes) = decode_data_url(url)?;
        let rgba = image::load_from_memory(&bytes)
            .map_err(|e| {
                StayframeError::validation(format!("clipboard payload is not an image: {e}"))
            })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        let rgba = rgba.into_raw();
        let png = if mime == "image/png" {
            bytes
        } else {
            encode_png(&FrameRGBA {
                width,
                height,
                data: rgba.clone(),
                premultiplied: false,
            })?
        };
        Ok(Self {
            width,
            height,
            rgba,
            png,
        })
    }
}

/// One way of putting an image on the clipboard.
pub trait ClipboardBackend {
    /// Short name for diagnostics.
    fn name(&self) -> &str;
    /// Attempt the write.
    fn set_image(&mut self, image: &ClipboardImage) -> Result<(), ClipboardFailure>;
}

/// Native clipboard through `arboard`.
#[cfg(feature = "clipboard")]
#[derive(Debug, Default)]
pub struct ArboardBackend;

#[cfg(feature = "clipboard")]
impl ClipboardBackend for ArboardBackend {
    fn name(&self) -> &str {
        "arboard"
    }

    fn set_image(&mut self, image: &ClipboardImage) -> Result<(), ClipboardFailure> {
        let mut clip = arboard::Clipboard::new()
            .map_err(|e| ClipboardFailure::Unavailable(format!("arboard: {e}")))?;
        let data = arboard::ImageData {
            width: image.width as usize,
            height: image.height as usize,
            bytes: std::borrow::Cow::Borrowed(&image.rgba),
        };
        clip.set_image(data).map_err(|e| match e {
            arboard::Error::ClipboardNotSupported => {
                ClipboardFailure::Unavailable("arboard: clipboard not supported".to_string())
            }
            other => ClipboardFailure::Failed(format!("arboard: {other}")),
        })
    }
}

/// Pipes PNG bytes into the first copy command that exists.
#[derive(Clone, Debug)]
pub struct CommandBackend {
    candidates: Vec<(String, Vec<String>)>,
}

impl Default for CommandBackend {
    fn default() -> Self {
        Self::new([
            ("wl-copy", &["--type", "image/png"][..]),
            ("xclip", &["-selection", "clipboard", "-t", "image/png", "-i"][..]),
        ])
    }
}

impl CommandBackend {
    /// Candidates as `(program, args)`, tried in order.
    pub fn new<'a>(candidates: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        Self {
            candidates: candidates
                .into_iter()
                .map(|(prog, args)| {
                    (
                        prog.to_string(),
                        args.iter().map(|a| (*a).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    fn run(&self, program: &str, args: &[String], png: &[u8]) -> Result<(), ClipboardFailure> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ClipboardFailure::Unavailable(format!("{program}: {e}")))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ClipboardFailure::Failed(format!("{program}: stdin not captured")))?;
        stdin
            .write_all(png)
            .map_err(|e| ClipboardFailure::Failed(format!("{program}: write failed: {e}")))?;
        drop(stdin);

        let out = child
            .wait_with_output()
            .map_err(|e| ClipboardFailure::Failed(format!("{program}: {e}")))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(ClipboardFailure::Failed(format!(
                "{program} exited with {}: {}",
                out.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl ClipboardBackend for CommandBackend {
    fn name(&self) -> &str {
        "command"
    }

    fn set_image(&mut self, image: &ClipboardImage) -> Result<(), ClipboardFailure> {
        let mut last = ClipboardFailure::Unavailable("no copy command configured".to_string());
        for (program, args) in &self.candidates {
            match self.run(program, args, &image.png) {
                Ok(()) => return Ok(()),
                Err(err @ ClipboardFailure::Failed(_)) => return Err(err),
                Err(err) => last = err,
            }
        }
        Err(last)
    }
}

/// Ordered chain of clipboard backends.
pub struct Clipboard {
    backends: Vec<Box<dyn ClipboardBackend>>,
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.backends.iter().map(|b| b.name()).collect();
        f.debug_struct("Clipboard").field("backends", &names).finish()
    }
}

impl Clipboard {
    pub fn new(backends: Vec<Box<dyn ClipboardBackend>>) -> Self {
        Self { backends }
    }

    /// Native clipboard (when built with `clipboard`) followed by copy commands.
    pub fn system() -> Self {
        let mut backends: Vec<Box<dyn ClipboardBackend>> = Vec::new();
        #[cfg(feature = "clipboard")]
        backends.push(Box::new(ArboardBackend));
        backends.push(Box::new(CommandBackend::default()));
        Self::new(backends)
    }

    /// Copy the image in `data_url`.
    ///
    /// Fails with [`ClipboardFailure::Unavailable`] only if no backend exists on
    /// this host, and with [`ClipboardFailure::Failed`] if one exists but every
    /// attempt failed.
    pub fn copy_data_url(&mut self, data_url: &str) -> StayframeResult<()> {
        let image = ClipboardImage::from_data_url(data_url)?;
        self.copy_image(&image)
    }

    pub fn copy_image(&mut self, image: &ClipboardImage) -> StayframeResult<()> {
        let mut unavailable = Vec::new();
        let mut failed = None;
        for backend in &mut self.backends {
            match backend.set_image(image) {
                Ok(()) => {
                    tracing::info!(backend = backend.name(), "image copied to clipboard");
                    return Ok(());
                }
                Err(ClipboardFailure::Unavailable(detail)) => {
                    tracing::debug!(
                        backend = backend.name(),
                        %detail,
                        "clipboard backend unavailable"
                    );
                    unavailable.push(detail);
                }
                Err(ClipboardFailure::Failed(detail)) => {
                    tracing::warn!(backend = backend.name(), %detail, "clipboard backend failed");
                    failed = Some(detail);
                }
            }
        }
        let failure = match failed {
            Some(detail) => ClipboardFailure::Failed(detail),
            None if unavailable.is_empty() => {
                ClipboardFailure::Unavailable("no clipboard backend".to_string())
            }
            None => ClipboardFailure::Unavailable(unavailable.join("; ")),
        };
        Err(StayframeError::Clipboard(failure))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/clipboard.rs"]
mod tests;
