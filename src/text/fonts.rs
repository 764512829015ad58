use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use usvg::fontdb;

use crate::foundation::error::{StayframeError, StayframeResult};
use crate::model::frame::{FontStyle, FontWeight};

/// Families tried after the requested stack, before giving up on names entirely.
const FALLBACK_FAMILIES: [&str; 4] = ["DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial"];

/// Where fonts come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Extra directories scanned for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Whether installed system fonts are loaded.
    pub use_system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            font_dirs: Vec::new(),
            use_system_fonts: true,
        }
    }
}

/// A single resolved font face with its bytes.
#[derive(Clone, Debug)]
pub struct FontFace {
    /// Primary family name of the face.
    pub family: String,
    /// Whole font file (a collection for `.ttc`).
    pub data: Arc<Vec<u8>>,
    /// Face index inside `data`.
    pub index: u32,
    pub(crate) id: fontdb::ID,
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Font database plus a resolution cache keyed by (stack, weight, style).
pub struct FontBook {
    db: fontdb::Database,
    resolved: HashMap<(String, u16, bool), FontFace>,
    bytes: HashMap<fontdb::ID, Arc<Vec<u8>>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}

impl FontBook {
    /// Load fonts according to `config`.
    pub fn new(config: &FontConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.use_system_fonts {
            db.load_system_fonts();
        }
        for dir in &config.font_dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Self::from_database(db)
    }

    /// Wrap an existing database.
    pub fn from_database(db: fontdb::Database) -> Self {
        Self {
            db,
            resolved: HashMap::new(),
            bytes: HashMap::new(),
        }
    }

    /// Number of faces known to the database.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Register a font file from memory.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
        self.resolved.clear();
    }

    /// Resolve a CSS-like family stack to one face.
    ///
    /// Unknown families fall back to common sans faces and then to any face.
    /// Fails only when the database is empty.
    pub fn resolve(
        &mut self,
        family_stack: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> StayframeResult<FontFace> {
        let key = (
            family_stack.trim().to_ascii_lowercase(),
            weight.value(),
            style == FontStyle::Italic,
        );
        if let Some(face) = self.resolved.get(&key) {
            return Ok(face.clone());
        }

        let id = self.query(family_stack, weight, style).ok_or_else(|| {
            StayframeError::render(format!("no font face available for `{family_stack}`"))
        })?;
        let face = self.face_for(id)?;
        tracing::debug!(stack = family_stack, family = %face.family, "font resolved");
        self.resolved.insert(key, face.clone());
        Ok(face)
    }

    fn query(
        &self,
        family_stack: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<fontdb::ID> {
        let names = parse_family_stack(family_stack);
        let mut families: Vec<fontdb::Family<'_>> = names.iter().map(|n| css_family(n)).collect();
        families.extend(FALLBACK_FAMILIES.iter().map(|n| fontdb::Family::Name(n)));

        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(weight.value()),
            stretch: fontdb::Stretch::Normal,
            style: match style {
                FontStyle::Normal => fontdb::Style::Normal,
                FontStyle::Italic => fontdb::Style::Italic,
            },
        };
        self.db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id))
    }

    fn face_for(&mut self, id: fontdb::ID) -> StayframeResult<FontFace> {
        let info = self
            .db
            .face(id)
            .ok_or_else(|| StayframeError::render("font face vanished from database"))?;
        let family = info
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        let index = info.index;

        let data = match self.bytes.get(&id) {
            Some(data) => data.clone(),
            None => {
                let data = self
                    .db
                    .with_face_data(id, |data, _| Arc::new(data.to_vec()))
                    .ok_or_else(|| StayframeError::render(format!("cannot read font `{family}`")))?;
                self.bytes.insert(id, data.clone());
                data
            }
        };

        Ok(FontFace {
            family,
            data,
            index,
            id,
        })
    }
}

/// Split `"'Playfair Display', Georgia, serif"` into unquoted family names.
pub fn parse_family_stack(stack: &str) -> Vec<String> {
    stack
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\''))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn css_family(name: &str) -> fontdb::Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
