use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use anyhow::Context;

use crate::foundation::error::{YearGridError, YearGridResult};

/// Where the label font comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// A TTF/OTF file shipped with the assets.
    File(PathBuf),
    /// First sans-serif face the system font database offers.
    SystemSansSerif,
}

/// Font file contents plus the face to use when the file is a collection (`.ttc`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelFont {
    pub bytes: Arc<Vec<u8>>,
    pub face_index: u32,
}

/// Lazily loaded, read-only font shared for the life of the process.
///
/// The first successful [`FontCache::load`] call fills the cache; later calls reuse it.
/// Concurrent first loads may read the file twice, but only one result is kept.
#[derive(Debug)]
pub struct FontCache {
    source: FontSource,
    font: OnceLock<LabelFont>,
}

impl FontCache {
    pub fn new(source: FontSource) -> Self {
        Self {
            source,
            font: OnceLock::new(),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FontSource::File(path.into()))
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.font.get().is_some()
    }

    pub fn load(&self) -> YearGridResult<LabelFont> {
        if let Some(f) = self.font.get() {
            return Ok(f.clone());
        }
        let loaded = load_font(&self.source)?;
        tracing::debug!(
            source = ?self.source,
            len = loaded.bytes.len(),
            face_index = loaded.face_index,
            "font loaded"
        );
        Ok(self.font.get_or_init(|| loaded).clone())
    }

    pub fn bytes(&self) -> YearGridResult<Arc<Vec<u8>>> {
        self.load().map(|f| f.bytes)
    }
}

fn load_font(source: &FontSource) -> YearGridResult<LabelFont> {
    match source {
        FontSource::File(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            Ok(LabelFont {
                bytes: Arc::new(bytes),
                face_index: 0,
            })
        }
        FontSource::SystemSansSerif => system_sans_serif(),
    }
}

fn system_sans_serif() -> YearGridResult<LabelFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let families = [usvg::fontdb::Family::SansSerif];
    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::NORMAL,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| YearGridError::asset("no system fonts available for the label"))?;

    db.with_face_data(id, |data, face_index| LabelFont {
        bytes: Arc::new(data.to_vec()),
        face_index,
    })
    .ok_or_else(|| YearGridError::asset("system font face data unavailable"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
