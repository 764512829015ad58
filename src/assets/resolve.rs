use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized background image reference consumed by the compositors.
///
/// Every accepted host-side shape collapses into one of these variants before
/// anything is loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ImageSource {
    /// Remote URL or filesystem path.
    Url(String),
    /// Inline `data:` URL.
    DataUrl(String),
    /// No background.
    #[default]
    None,
}

impl ImageSource {
    /// Classify a raw reference string. Blank strings map to [`ImageSource::None`].
    pub fn from_ref(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::None
        } else if trimmed
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
        {
            Self::DataUrl(trimmed.to_string())
        } else {
            Self::Url(trimmed.to_string())
        }
    }

    /// The loadable string, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Url(s) | Self::DataUrl(s) => Some(s),
            Self::None => None,
        }
    }

    /// Whether there is no background.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        Self::from_ref(value)
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        Self::from_ref(&value)
    }
}

impl<T: Into<ImageSource>> From<Option<T>> for ImageSource {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Pull a loadable URL out of a heterogeneous image reference.
///
/// Accepts a plain string or an object carrying `url`, `src`, `urls.regular`
/// or `urls.full`, checked in that order. Anything else yields `None` and a
/// warning.
pub fn resolve_image_url(image_ref: &Value) -> Option<String> {
    let found = match image_ref {
        Value::Null => return None,
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => {
            let direct = ["url", "src"]
                .into_iter()
                .find_map(|key| map.get(key).and_then(Value::as_str));
            direct.or_else(|| {
                let urls = map.get("urls")?;
                ["regular", "full"]
                    .into_iter()
                    .find_map(|key| urls.get(key).and_then(Value::as_str))
            })
        }
        _ => None,
    };

    match found {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => {
            tracing::warn!(image_ref = %image_ref, "unrecognized image reference shape");
            None
        }
    }
}

/// [`resolve_image_url`] followed by classification into an [`ImageSource`].
pub fn normalize_image_ref(image_ref: &Value) -> ImageSource {
    resolve_image_url(image_ref).map_or(ImageSource::None, |s| ImageSource::from_ref(&s))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
