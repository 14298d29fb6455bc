use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    assets::store::{MemoryOverlayStore, overlay_file_name},
    foundation::{
        core::{FrameRGBA, Rgba8},
        error::{YearGridError, YearGridResult},
    },
    grid::{
        raster::render_dot_grid,
        spec::{GridMode, GridSpec, TOTAL_SLOTS},
    },
    render::composite,
};

/// Canvas color behind the dots when no background image is supplied in overlay mode.
pub const FALLBACK_BACKGROUND: Rgba8 = Rgba8::opaque(96, 104, 112);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorOpts {
    /// Render days on the rayon pool instead of one after another.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    pub threads: Option<usize>,
}

/// Summary of a generation run.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GenerateStats {
    pub written: u32,
    pub out_dir: PathBuf,
    pub mode: GridMode,
}

/// Produces the 365 per-day overlay assets the renderer consumes.
///
/// Every asset shares one [`GridSpec`] and one background, so reruns overwrite the same
/// files with the same pixels.
#[derive(Clone, Debug)]
pub struct OverlayGenerator {
    spec: GridSpec,
    /// Premultiplied canvas-sized base the dot layer is composited onto.
    base: FrameRGBA,
}

impl OverlayGenerator {
    /// `background` is scaled to cover the canvas and center-cropped. It is ignored in
    /// [`GridMode::OpaqueCanvas`], where the dots sit on white.
    pub fn new(spec: GridSpec, background: Option<&image::RgbaImage>) -> YearGridResult<Self> {
        spec.validate()?;
        let canvas = spec.canvas();
        let base = match (spec.mode, background) {
            (GridMode::OpaqueCanvas, _) => FrameRGBA::filled(canvas, Rgba8::opaque(255, 255, 255)),
            (GridMode::Overlay, Some(bg)) => {
                let covered = image::DynamicImage::ImageRgba8(bg.clone())
                    .resize_to_fill(
                        canvas.width,
                        canvas.height,
                        image::imageops::FilterType::Lanczos3,
                    )
                    .to_rgba8();
                FrameRGBA::from_rgba_image(covered)
            }
            (GridMode::Overlay, None) => FrameRGBA::filled(canvas, FALLBACK_BACKGROUND),
        };
        Ok(Self { spec, base })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Finished asset for `day` (1..=365): `day` filled dots over the base.
    pub fn render_day(&self, day: u32) -> YearGridResult<image::RgbaImage> {
        if !(1..=TOTAL_SLOTS).contains(&day) {
            return Err(YearGridError::validation(format!(
                "overlay day {day} outside 1..={TOTAL_SLOTS}"
            )));
        }
        let dots = render_dot_grid(&self.spec, day)?;
        let mut frame = self.base.clone();
        composite::over_in_place(&mut frame.data, &dots.data, 1.0)?;
        frame.into_rgba_image()
    }

    /// Render all days into memory.
    pub fn render_all(&self) -> YearGridResult<MemoryOverlayStore> {
        let mut store = MemoryOverlayStore::new();
        for day in 1..=TOTAL_SLOTS {
            store.insert(day, self.render_day(day)?);
        }
        Ok(store)
    }

    /// Write `001.png`..`365.png` into `out_dir`, creating it if needed.
    #[tracing::instrument(skip(self))]
    pub fn generate_all(&self, out_dir: &Path, opts: &GeneratorOpts) -> YearGridResult<GenerateStats> {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create overlay dir '{}'", out_dir.display()))?;

        if opts.parallel {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(n) = opts.threads {
                builder = builder.num_threads(n);
            }
            let pool = builder
                .build()
                .map_err(|e| YearGridError::Other(anyhow::Error::new(e)))?;
            pool.install(|| {
                (1..=TOTAL_SLOTS)
                    .into_par_iter()
                    .try_for_each(|day| self.write_day(out_dir, day))
            })?;
        } else {
            for day in 1..=TOTAL_SLOTS {
                self.write_day(out_dir, day)?;
            }
        }

        tracing::info!(out_dir = %out_dir.display(), mode = ?self.spec.mode, "overlays written");
        Ok(GenerateStats {
            written: TOTAL_SLOTS,
            out_dir: out_dir.to_path_buf(),
            mode: self.spec.mode,
        })
    }

    fn write_day(&self, out_dir: &Path, day: u32) -> YearGridResult<()> {
        let img = self.render_day(day)?;
        let path = out_dir.join(overlay_file_name(day));
        img.save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write overlay '{}'", path.display()))?;
        tracing::trace!(day, path = %path.display(), "overlay written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/batch.rs"]
mod tests;
