//! Viewport scaling
//!
//! Gameplay runs in the fixed 920x720 design space. A [`Layout`] holds the
//! uniform scale for the current viewport and projects design-space points
//! and cells to device pixels. Game state is never rescaled, so repeated
//! resizes cannot accumulate drift.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{PlayArea, Point};

/// Axis-aligned rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Canvas geometry for one viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub scale: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_scale(1.0)
    }
}

impl Layout {
    /// Fit the design resolution into a `width` x `height` viewport
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self::from_scale((width / DESIGN_WIDTH).min(height / DESIGN_HEIGHT))
    }

    /// Layout at an explicit scale. Degenerate scales clamp to `MIN_SCALE`.
    pub fn from_scale(scale: f32) -> Self {
        let scale = if scale.is_finite() {
            scale.max(MIN_SCALE)
        } else {
            1.0
        };
        Self {
            scale,
            canvas_width: DESIGN_WIDTH * scale,
            canvas_height: DESIGN_HEIGHT * scale,
        }
    }

    /// Canvas backing-store size in whole pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width as u32, self.canvas_height as u32)
    }

    /// Grid cell edge in device pixels
    pub fn cell_size(&self) -> f32 {
        CELL_SIZE as f32 * self.scale
    }

    /// Project a design-space point to device pixels
    pub fn to_screen(&self, p: Point) -> Vec2 {
        p.as_vec2() * self.scale
    }

    /// Device-pixel square covering the grid cell whose corner is `p`
    pub fn cell_rect(&self, p: Point) -> Rect {
        let pos = self.to_screen(p);
        let size = self.cell_size();
        Rect::new(pos.x, pos.y, size, size)
    }

    /// Device-pixel rectangle of the play area
    pub fn play_area_rect(&self, area: &PlayArea) -> Rect {
        let pos = self.to_screen(area.origin());
        Rect::new(
            pos.x,
            pos.y,
            area.width() as f32 * self.scale,
            area.height() as f32 * self.scale,
        )
    }

    /// Device-pixel rectangle of the whole canvas
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// Simulation tick interval. Larger canvases tick faster when
    /// `scale_with_viewport` is set.
    pub fn tick_interval_ms(&self, base_ms: u32, scale_with_viewport: bool) -> u32 {
        if !scale_with_viewport {
            return base_ms.max(1);
        }
        ((base_ms as f32 / self.scale).round() as u32).max(1)
    }
}
