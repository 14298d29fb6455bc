use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    assets::{
        font::{FontCache, FontSource},
        store::{DirOverlayStore, OverlaySource, overlay_day_for},
    },
    calendar::{date::CalendarDate, metrics::DayMetrics, resolve::resolve_date},
    device::profiles::{DeviceProfile, DeviceTable},
    foundation::{
        core::FrameRGBA,
        error::{YearGridError, YearGridResult},
    },
    render::{
        composite,
        encode::{self, JPEG_QUALITY, OutputFormat},
        label::{self, LabelStyle, TextLayoutEngine},
    },
};

/// Renderer configuration. Every field has a default, so a JSON file only needs the keys it
/// overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RendererOpts {
    /// Directory holding `001.png`..`365.png`.
    pub asset_dir: PathBuf,
    /// Label font; `None` uses a system sans-serif face.
    pub font_path: Option<PathBuf>,
    /// Optional JSON device table replacing the built-in one.
    pub device_table: Option<PathBuf>,
    pub jpeg_quality: u8,
    pub label: LabelStyle,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets/overlays"),
            font_path: None,
            device_table: None,
            jpeg_quality: JPEG_QUALITY,
            label: LabelStyle::default(),
        }
    }
}

impl RendererOpts {
    pub fn from_json_str(s: &str) -> YearGridResult<Self> {
        serde_json::from_str(s).map_err(|e| YearGridError::serde(format!("renderer opts: {e}")))
    }

    pub fn from_json_path(path: &Path) -> YearGridResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read renderer config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// One wallpaper request. Built per call and consumed once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderRequest {
    pub model: Option<String>,
    /// Literal `YYYY-MM-DD` override.
    pub date: Option<String>,
    /// IANA timezone name.
    pub tz: Option<String>,
    pub format: OutputFormat,
}

impl RenderRequest {
    /// Build a request from raw string parameters as a transport would receive them.
    pub fn from_params(
        model: Option<&str>,
        date: Option<&str>,
        tz: Option<&str>,
        format: Option<&str>,
    ) -> YearGridResult<Self> {
        Ok(Self {
            model: model.map(str::to_string),
            date: date.map(str::to_string),
            tz: tz.map(str::to_string),
            format: OutputFormat::parse(format)?,
        })
    }
}

/// Encoded wallpaper plus the numbers it shows.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub date: CalendarDate,
    pub metrics: DayMetrics,
    /// Overlay actually used; differs from `metrics.day_of_year` only on day 366.
    pub overlay_day: u32,
    pub profile: DeviceProfile,
}

/// Out-of-band response fields for callers to surface as headers or JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderMetadata {
    pub date: CalendarDate,
    pub day_of_year: u32,
    pub days_in_year: u32,
    pub days_left: u32,
    pub percent_elapsed: String,
    pub overlay_day: u32,
    pub model: String,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
}

impl RenderOutput {
    pub fn metadata(&self) -> RenderMetadata {
        RenderMetadata {
            date: self.date,
            day_of_year: self.metrics.day_of_year,
            days_in_year: self.metrics.days_in_year,
            days_left: self.metrics.days_left,
            percent_elapsed: self.metrics.percent_label(),
            overlay_day: self.overlay_day,
            model: self.profile.model.clone(),
            width: self.profile.resolution.width,
            height: self.profile.resolution.height,
            content_type: self.format.content_type(),
        }
    }
}

/// On-demand wallpaper renderer over a fixed set of pre-rendered overlays.
///
/// Holds only read-only state; one instance serves every request of a process.
pub struct WallpaperRenderer {
    overlays: Arc<dyn OverlaySource>,
    devices: DeviceTable,
    font: Arc<FontCache>,
    label: LabelStyle,
    jpeg_quality: u8,
}

impl std::fmt::Debug for WallpaperRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallpaperRenderer")
            .field("devices", &self.devices)
            .field("font", &self.font.source())
            .field("label", &self.label)
            .field("jpeg_quality", &self.jpeg_quality)
            .finish()
    }
}

impl WallpaperRenderer {
    pub fn new(
        overlays: Arc<dyn OverlaySource>,
        devices: DeviceTable,
        font: Arc<FontCache>,
    ) -> Self {
        Self {
            overlays,
            devices,
            font,
            label: LabelStyle::default(),
            jpeg_quality: JPEG_QUALITY,
        }
    }

    /// Build a renderer over a directory store as described by `opts`.
    pub fn from_opts(opts: &RendererOpts) -> YearGridResult<Self> {
        let devices = match &opts.device_table {
            Some(p) => DeviceTable::from_json_path(p)?,
            None => DeviceTable::builtin(),
        };
        let font = match &opts.font_path {
            Some(p) => FontCache::from_path(p),
            None => FontCache::new(FontSource::SystemSansSerif),
        };
        Ok(Self::new(
            Arc::new(DirOverlayStore::new(&opts.asset_dir)),
            devices,
            Arc::new(font),
        )
        .with_label_style(opts.label.clone())
        .with_jpeg_quality(opts.jpeg_quality))
    }

    pub fn with_label_style(mut self, label: LabelStyle) -> Self {
        self.label = label;
        self
    }

    pub fn with_jpeg_quality(mut self, q: u8) -> Self {
        self.jpeg_quality = q;
        self
    }

    pub fn devices(&self) -> &DeviceTable {
        &self.devices
    }

    /// Render for "today" according to the wall clock.
    pub fn render(&self, req: &RenderRequest) -> YearGridResult<RenderOutput> {
        self.render_at(req, Utc::now())
    }

    /// Render with "today" derived from `now`. Identical inputs give identical bytes.
    #[tracing::instrument(skip(self))]
    pub fn render_at(&self, req: &RenderRequest, now: DateTime<Utc>) -> YearGridResult<RenderOutput> {
        let profile = self.devices.resolve(req.model.as_deref())?;
        let date = resolve_date(req.date.as_deref(), req.tz.as_deref(), now)?;
        let metrics = DayMetrics::for_date(date);

        let overlay_day = overlay_day_for(metrics.day_of_year);
        if overlay_day != metrics.day_of_year {
            tracing::debug!(
                day_of_year = metrics.day_of_year,
                overlay_day,
                "no overlay for this day, reusing the last one"
            );
        }
        let overlay = self.overlays.load_overlay(overlay_day)?;

        let target = profile.resolution;
        let resized = if overlay.dimensions() == (target.width, target.height) {
            overlay
        } else {
            image::imageops::resize(
                &overlay,
                target.width,
                target.height,
                image::imageops::FilterType::Lanczos3,
            )
        };

        let mut frame = FrameRGBA::from_rgba_image(resized);
        let font = self.font.load()?;
        let mut engine = TextLayoutEngine::new();
        let layer = label::render_label(
            &mut engine,
            &font,
            &metrics.label_text(),
            target,
            &self.label,
        )?;
        composite::over_at(&mut frame, &layer.frame, layer.x, layer.y)?;

        let bytes = encode::encode_image(&frame.into_rgba_image()?, req.format, self.jpeg_quality)?;
        tracing::debug!(
            date = %date,
            model = %profile.model,
            format = ?req.format,
            len = bytes.len(),
            "wallpaper rendered"
        );

        Ok(RenderOutput {
            bytes,
            format: req.format,
            date,
            metrics,
            overlay_day,
            profile,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/wallpaper.rs"]
mod tests;
