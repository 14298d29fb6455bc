use kurbo::Shape as _;

use crate::{
    foundation::{
        core::{FrameRGBA, Rgba8},
        error::{YearGridError, YearGridResult},
    },
    grid::spec::GridSpec,
};

/// Rasterize the dot grid with the first `filled` dots drawn as elapsed days.
///
/// In [`crate::GridMode::Overlay`] the result is a transparent layer meant to be composited
/// over a background; in [`crate::GridMode::OpaqueCanvas`] it is a finished opaque image.
#[tracing::instrument(skip(spec))]
pub fn render_dot_grid(spec: &GridSpec, filled: u32) -> YearGridResult<FrameRGBA> {
    spec.validate()?;
    if filled > spec.total_slots {
        return Err(YearGridError::validation(format!(
            "filled count {filled} exceeds {} slots",
            spec.total_slots
        )));
    }

    let canvas = spec.canvas();
    let (w, h) = canvas.as_u16()?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    if let Some(bg) = spec.canvas_fill() {
        set_paint(&mut ctx, bg);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));
    }

    for i in 0..spec.total_slots {
        set_paint(&mut ctx, spec.dot_color(i, filled));
        let circle = kurbo::Circle::new(spec.dot_center(i), spec.dot_radius);
        let mut p = vello_cpu::kurbo::BezPath::new();
        for el in circle.path_elements(0.1) {
            p.push(el);
        }
        ctx.fill_path(&p);
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

#[cfg(test)]
#[path = "../../tests/unit/grid/raster.rs"]
mod tests;
