use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode,
    foundation::error::{YearGridError, YearGridResult},
    grid::spec::TOTAL_SLOTS,
};

/// Overlay asset that stands in for `day_of_year`.
///
/// Only days 1..=365 are pre-rendered; day 366 of a leap year reuses day 365. The decision is
/// computed rather than probed so it never depends on what happens to be on disk.
pub fn overlay_day_for(day_of_year: u32) -> u32 {
    day_of_year.clamp(1, TOTAL_SLOTS)
}

/// Flat-directory file name for a day's overlay, e.g. `007.png`.
pub fn overlay_file_name(day: u32) -> String {
    format!("{day:03}.png")
}

/// Source of pre-rendered overlay images keyed by day (1..=365).
pub trait OverlaySource: Send + Sync {
    /// Load the overlay for `day` as straight-alpha RGBA8.
    fn load_overlay(&self, day: u32) -> YearGridResult<image::RgbaImage>;
}

/// Overlays stored as `NNN.png` files in one directory.
#[derive(Clone, Debug)]
pub struct DirOverlayStore {
    root: PathBuf,
}

impl DirOverlayStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, day: u32) -> PathBuf {
        self.root.join(overlay_file_name(day))
    }

    /// Days in 1..=365 whose asset file is absent.
    pub fn missing_days(&self) -> Vec<u32> {
        (1..=TOTAL_SLOTS)
            .filter(|&d| !self.path_for(d).is_file())
            .collect()
    }

    /// Fail if any of the 365 assets is missing.
    pub fn verify(&self) -> YearGridResult<()> {
        let missing = self.missing_days();
        if missing.is_empty() {
            return Ok(());
        }
        Err(YearGridError::asset(format!(
            "{} of {TOTAL_SLOTS} overlays missing under '{}' (first: {}); rerun generation",
            missing.len(),
            self.root.display(),
            overlay_file_name(missing[0]),
        )))
    }
}

impl OverlaySource for DirOverlayStore {
    fn load_overlay(&self, day: u32) -> YearGridResult<image::RgbaImage> {
        let path = self.path_for(day);
        if !path.is_file() {
            return Err(YearGridError::asset(format!(
                "overlay for day {day} not found at '{}'",
                path.display()
            )));
        }
        let bytes =
            std::fs::read(&path).with_context(|| format!("read overlay '{}'", path.display()))?;
        decode::decode_image(&bytes)
    }
}

/// In-process overlay store.
#[derive(Clone, Debug, Default)]
pub struct MemoryOverlayStore {
    by_day: BTreeMap<u32, Arc<image::RgbaImage>>,
}

impl MemoryOverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: u32, img: image::RgbaImage) {
        self.by_day.insert(day, Arc::new(img));
    }

    pub fn len(&self) -> usize {
        self.by_day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}

impl OverlaySource for MemoryOverlayStore {
    fn load_overlay(&self, day: u32) -> YearGridResult<image::RgbaImage> {
        self.by_day
            .get(&day)
            .map(|img| img.as_ref().clone())
            .ok_or_else(|| YearGridError::asset(format!("overlay for day {day} not loaded")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
