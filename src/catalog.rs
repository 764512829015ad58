//! Static quote catalog and image-search result shapes consumed by host UIs.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::error::StayframeResult;

/// Page size used when a request leaves it unset.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// One quote tagged with its theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuote {
    pub theme: String,
    pub quote: String,
}

/// A page of [`CatalogQuote`]s plus pagination metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePage {
    pub quotes: Vec<CatalogQuote>,
    /// Matches before pagination.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Theme {
    name: String,
    quotes: Vec<String>,
}

/// Themed quotes loaded from a `{"themes":[{"name", "quotes":[..]}]}` document.
///
/// Entries without a name or a quote array are dropped, as are non-string
/// quotes. A document that is not shaped like this at all yields an empty catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteCatalog {
    themes: Vec<Theme>,
}

impl QuoteCatalog {
    pub fn from_value(doc: &Value) -> Self {
        let Some(themes) = doc.get("themes").and_then(Value::as_array) else {
            return Self::default();
        };
        let themes = themes
            .iter()
            .filter_map(|t| {
                let name = t.get("name")?.as_str().filter(|n| !n.is_empty())?;
                let quotes = t.get("quotes")?.as_array()?;
                Some(Theme {
                    name: name.to_string(),
                    quotes: quotes
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                })
            })
            .collect();
        Self { themes }
    }

    /// Parse JSON text. Unparseable text is an empty catalog, logged at `warn`.
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(doc) => Self::from_value(&doc),
            Err(err) => {
                tracing::warn!(error = %err, "quote catalog is not valid JSON");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> StayframeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read quote catalog {}", path.display()))?;
        Ok(Self::from_json_str(&text))
    }

    /// Theme names in document order.
    pub fn themes(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    /// Page `page` (1-based; 0 is treated as 1) of quotes in `theme`, or of every
    /// quote when `theme` is empty.
    pub fn quotes(&self, theme: &str, page: usize, limit: usize) -> QuotePage {
        let page = page.max(1);
        let matching: Vec<CatalogQuote> = self
            .themes
            .iter()
            .filter(|t| theme.is_empty() || t.name == theme)
            .flat_map(|t| {
                t.quotes.iter().map(|q| CatalogQuote {
                    theme: t.name.clone(),
                    quote: q.clone(),
                })
            })
            .collect();
        let total = matching.len();
        let quotes = matching
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();
        QuotePage {
            quotes,
            total,
            page,
            limit,
        }
    }
}

/// Image search hit. Accepted directly as an image reference through `url`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchImage {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub photographer_url: String,
    #[serde(default, alias = "altText")]
    pub alt: String,
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
