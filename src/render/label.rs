use crate::{
    assets::font::LabelFont,
    foundation::{
        core::{Affine, FrameRGBA, Resolution, Rgba8, Vec2},
        error::{YearGridError, YearGridResult},
    },
    grid::spec::REFERENCE_WIDTH,
    render::composite,
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Appearance of the "days left" label. Lengths are in reference-canvas pixels and scale
/// with the output width.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub reference_width: u32,
    pub font_size: f32,
    /// Vertical center of the label as a fraction of the image height.
    pub vertical_fraction: f64,
    pub color: Rgba8,
    pub shadow_color: Rgba8,
    pub shadow_offset: (f64, f64),
    pub shadow_blur: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            reference_width: REFERENCE_WIDTH,
            font_size: 44.0,
            vertical_fraction: 0.91,
            color: Rgba8::opaque(255, 255, 255),
            shadow_color: Rgba8::new(0, 0, 0, 140),
            shadow_offset: (0.0, 3.0),
            shadow_blur: 6.0,
        }
    }
}

impl LabelStyle {
    pub fn scale_for(&self, image_width: u32) -> f64 {
        f64::from(image_width) / f64::from(self.reference_width.max(1))
    }

    pub fn font_size_for(&self, image_width: u32) -> f32 {
        (f64::from(self.font_size) * self.scale_for(image_width)) as f32
    }
}

/// Rendered label band plus where its top-left corner goes on the target image.
#[derive(Clone, Debug)]
pub struct LabelLayer {
    pub frame: FrameRGBA,
    pub x: i64,
    pub y: i64,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    last_family_name: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            last_family_name: None,
        }
    }

    pub fn last_family_name(&self) -> Option<&str> {
        self.last_family_name.as_deref()
    }

    /// Shape and lay out a single line of plain text in face `face_index` of `font_bytes`.
    ///
    /// Codepoints the face lacks are shaped with a system fallback face; each glyph run
    /// carries the font it was shaped with.
    pub fn layout_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        face_index: u32,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> YearGridResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(YearGridError::render(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face_index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| YearGridError::render("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| YearGridError::render("registered font family has no name"))?
            .to_string();
        self.last_family_name = Some(family_name.clone());

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Render `text` as a centered label band for an image of size `target`.
///
/// The band holds the text over a blurred, offset drop shadow so it stays legible on both
/// light and dark backgrounds.
#[tracing::instrument(skip(engine, font, style))]
pub fn render_label(
    engine: &mut TextLayoutEngine,
    font: &LabelFont,
    text: &str,
    target: Resolution,
    style: &LabelStyle,
) -> YearGridResult<LabelLayer> {
    let scale = style.scale_for(target.width);
    let size_px = style.font_size_for(target.width);
    let layout = engine.layout_line(
        text,
        &font.bytes,
        font.face_index,
        size_px,
        style.color.into(),
    )?;

    let shadow_offset = Vec2::new(style.shadow_offset.0, style.shadow_offset.1) * scale;
    let blur = (f64::from(style.shadow_blur) * scale) as f32;
    let pad = (f64::from(blur) * 3.0 + shadow_offset.hypot()).ceil() as u32 + 2;

    let text_w = layout.width().max(0.0).ceil() as u32;
    let text_h = layout.height().max(0.0).ceil() as u32;
    let band = Resolution::new(text_w + 2 * pad, text_h + 2 * pad)?;

    let origin = Affine::translate((f64::from(pad), f64::from(pad)));

    let mut frame = draw_layout(
        &layout,
        band,
        origin.then_translate(shadow_offset),
        Some(style.shadow_color),
    )?;
    if blur > 0.0 {
        composite::blur_in_place(&mut frame, (blur * 2.0).ceil() as u32, blur)?;
    }
    let text_layer = draw_layout(&layout, band, origin, None)?;
    composite::over_in_place(&mut frame.data, &text_layer.data, 1.0)?;

    let x = ((f64::from(target.width) - f64::from(band.width)) / 2.0).round() as i64;
    let y = (f64::from(target.height) * style.vertical_fraction - f64::from(band.height) / 2.0)
        .round() as i64;

    tracing::debug!(
        family = engine.last_family_name().unwrap_or("unknown"),
        size_px,
        band = %band,
        x,
        y,
        "label laid out"
    );
    Ok(LabelLayer { frame, x, y })
}

/// Fill every glyph of `layout` into a fresh transparent frame, each run with the font it was
/// shaped with. `paint_override` replaces the per-run brush (used for the shadow pass).
fn draw_layout(
    layout: &parley::Layout<TextBrushRgba8>,
    size: Resolution,
    transform: Affine,
    paint_override: Option<Rgba8>,
) -> YearGridResult<FrameRGBA> {
    let (w, h) = size.as_u16()?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::new(transform.as_coeffs()));

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let paint = paint_override.unwrap_or_else(|| {
                let b = run.style().brush;
                Rgba8::new(b.r, b.g, b.b, b.a)
            });
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                paint.r, paint.g, paint.b, paint.a,
            ));

            let mut x = run.offset();
            let y = run.baseline();
            let glyphs: Vec<vello_cpu::Glyph> = run
                .glyphs()
                .map(|g| {
                    let out = vello_cpu::Glyph {
                        id: g.id,
                        x: x + g.x,
                        y: y - g.y,
                    };
                    x += g.advance;
                    out
                })
                .collect();
            ctx.glyph_run(run.run().font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs.into_iter());
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(FrameRGBA {
        width: size.width,
        height: size.height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
