//! yeargrid renders daily "year-progress" wallpapers.
//!
//! A wallpaper is a 20×19 dot grid (filled dots are elapsed days, empty dots the rest of the
//! year) over a background image, with a label showing the days left and the percent of the
//! year elapsed.
//!
//! # Pipeline overview
//!
//! 1. **Generate** (once per deployment): [`OverlayGenerator`] renders one asset per
//!    day-of-year, `001.png`..`365.png`, from a shared [`GridSpec`].
//! 2. **Resolve**: a literal date or `(now, timezone)` becomes a [`CalendarDate`].
//! 3. **Measure**: [`DayMetrics`] derives day-of-year, days left and percent elapsed.
//! 4. **Render**: [`WallpaperRenderer`] picks the day's asset (day 366 reuses 365), stretches
//!    it to the device resolution, draws the label and encodes JPEG or PNG.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical requests against identical assets give identical bytes.
//! - **Premultiplied RGBA8** for every intermediate frame; straight alpha only at the `image`
//!   crate boundary.
#![forbid(unsafe_code)]

mod assets;
mod calendar;
mod device;
mod foundation;
mod generate;
mod grid;
mod render;

pub use assets::decode::{decode_frame, decode_image, load_image};
pub use assets::font::{FontCache, FontSource, LabelFont};
pub use assets::store::{
    DirOverlayStore, MemoryOverlayStore, OverlaySource, overlay_day_for, overlay_file_name,
};
pub use calendar::date::{CalendarDate, days_in_year, is_leap_year};
pub use calendar::metrics::DayMetrics;
pub use calendar::resolve::{resolve_date, today};
pub use device::profiles::{DEFAULT_MODEL, DeviceProfile, DeviceTable};
pub use foundation::core::{FrameRGBA, Resolution, Rgba8};
pub use foundation::error::{ErrorClass, ErrorResponse, YearGridError, YearGridResult};
pub use generate::batch::{FALLBACK_BACKGROUND, GenerateStats, GeneratorOpts, OverlayGenerator};
pub use grid::raster::render_dot_grid;
pub use grid::spec::{GridMode, GridSpec, REFERENCE_HEIGHT, REFERENCE_WIDTH, TOTAL_SLOTS};
pub use render::composite::{blur_in_place, over, over_at, over_in_place};
pub use render::encode::{JPEG_QUALITY, OutputFormat, encode_image};
pub use render::label::{LabelLayer, LabelStyle, TextBrushRgba8, TextLayoutEngine, render_label};
pub use render::wallpaper::{
    RenderMetadata, RenderOutput, RenderRequest, RendererOpts, WallpaperRenderer,
};
