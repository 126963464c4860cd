//! 2D rendering
//!
//! The renderer only talks to a [`DrawSurface`]: the browser canvas in the
//! web build, a [`RecordingSurface`] in tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod pipeline;
pub mod recorder;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use pipeline::{RenderStyle, render};
pub use recorder::{DrawCommand, RecordingSurface};
pub use shapes::{Ghost, trail_ghosts};

use glam::Vec2;

/// 8-bit RGB with a fractional alpha, as canvas styles expect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    /// #0095DD
    pub const BALL: Rgba = Rgba::opaque(0, 149, 221);
    pub const PADDLE: Rgba = Rgba::opaque(0, 149, 221);
    pub const BORDER: Rgba = Rgba::opaque(255, 255, 255);
}

/// Axis-aligned rectangle, origin at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Minimal immediate-mode drawing capability
pub trait DrawSurface {
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Stroke a rectangle outline with rounded corners
    fn stroke_rounded_rect(&mut self, rect: Rect, corner_radius: f32, line_width: f32, color: Rgba);
}
