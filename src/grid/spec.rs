use crate::foundation::{
    core::{Point, Resolution, Rgba8},
    error::{YearGridError, YearGridResult},
};

/// Number of day slots drawn on the grid. Day 366 shares the last slot.
pub const TOTAL_SLOTS: u32 = 365;

/// Reference canvas every overlay asset is authored at.
pub const REFERENCE_WIDTH: u32 = 1290;
pub const REFERENCE_HEIGHT: u32 = 2796;

/// How dots are laid down when an overlay asset is generated.
///
/// One mode is applied to all 365 assets of a generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Dots on a transparent layer, composited over a background image.
    #[default]
    Overlay,
    /// Dots drawn straight onto an opaque white canvas.
    OpaqueCanvas,
}

/// Fixed dot-grid layout shared by the generator and the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub columns: u32,
    pub total_slots: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub grid_top: u32,
    pub grid_height: u32,
    pub dot_radius: f64,
    pub mode: GridMode,
    pub filled_color: Rgba8,
    pub empty_color: Rgba8,
    pub empty_opacity: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::for_mode(GridMode::Overlay)
    }
}

impl GridSpec {
    /// Reference layout with the palette that suits `mode`.
    pub fn for_mode(mode: GridMode) -> Self {
        let (empty_color, empty_opacity) = match mode {
            GridMode::Overlay => (Rgba8::opaque(255, 255, 255), 0.35),
            // White-on-white is invisible; opaque mode uses a light grey instead.
            GridMode::OpaqueCanvas => (Rgba8::opaque(217, 217, 217), 1.0),
        };
        Self {
            canvas_width: REFERENCE_WIDTH,
            canvas_height: REFERENCE_HEIGHT,
            columns: 20,
            total_slots: TOTAL_SLOTS,
            left_margin: 165,
            right_margin: 165,
            grid_top: 760,
            grid_height: 1440,
            dot_radius: 17.0,
            mode,
            filled_color: Rgba8::opaque(26, 26, 26),
            empty_color,
            empty_opacity,
        }
    }

    pub fn validate(&self) -> YearGridResult<()> {
        if self.columns < 2 {
            return Err(YearGridError::validation("grid needs at least 2 columns"));
        }
        if self.total_slots < TOTAL_SLOTS {
            return Err(YearGridError::validation(format!(
                "grid must hold at least {TOTAL_SLOTS} slots"
            )));
        }
        if self.rows() < 2 {
            return Err(YearGridError::validation("grid needs at least 2 rows"));
        }
        if self.columns * self.rows() < self.total_slots {
            return Err(YearGridError::validation("grid capacity below slot count"));
        }
        if self.left_margin + self.right_margin >= self.canvas_width {
            return Err(YearGridError::validation("grid margins exceed canvas width"));
        }
        if self.grid_top + self.grid_height >= self.canvas_height {
            return Err(YearGridError::validation("grid extends past canvas height"));
        }
        if !self.dot_radius.is_finite() || self.dot_radius <= 0.0 {
            return Err(YearGridError::validation(
                "dot radius must be finite and > 0",
            ));
        }
        Resolution::new(self.canvas_width, self.canvas_height)?;
        Ok(())
    }

    pub fn canvas(&self) -> Resolution {
        Resolution {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    /// `ceil(total_slots / columns)`.
    pub fn rows(&self) -> u32 {
        self.total_slots.div_ceil(self.columns.max(1))
    }

    pub fn grid_width(&self) -> u32 {
        self.canvas_width
            .saturating_sub(self.left_margin + self.right_margin)
    }

    pub fn h_spacing(&self) -> u32 {
        spacing(self.grid_width(), self.columns)
    }

    pub fn v_spacing(&self) -> u32 {
        spacing(self.grid_height, self.rows())
    }

    /// Center of dot `i` (0-based, row-major).
    pub fn dot_center(&self, i: u32) -> Point {
        let col = i % self.columns;
        let row = i / self.columns;
        Point::new(
            f64::from(self.left_margin + col * self.h_spacing()),
            f64::from(self.grid_top + row * self.v_spacing()),
        )
    }

    pub fn is_filled(i: u32, filled: u32) -> bool {
        i < filled
    }

    /// Paint for dot `i` given `filled` elapsed days.
    pub fn dot_color(&self, i: u32, filled: u32) -> Rgba8 {
        if Self::is_filled(i, filled) {
            self.filled_color
        } else {
            self.empty_color.with_opacity(self.empty_opacity)
        }
    }

    /// Canvas fill under the dots, if the mode draws one.
    pub fn canvas_fill(&self) -> Option<Rgba8> {
        match self.mode {
            GridMode::Overlay => None,
            GridMode::OpaqueCanvas => Some(Rgba8::opaque(255, 255, 255)),
        }
    }
}

fn spacing(extent: u32, count: u32) -> u32 {
    let gaps = count.saturating_sub(1).max(1);
    (f64::from(extent) / f64::from(gaps)).round() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/grid/spec.rs"]
mod tests;
