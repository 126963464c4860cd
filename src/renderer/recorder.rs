//! Draw surface that records calls instead of rasterising them

use glam::Vec2;

use super::{DrawSurface, Rect, Rgba};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillRect(Rect, Rgba),
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokeRoundedRect {
        rect: Rect,
        corner_radius: f32,
        line_width: f32,
        color: Rgba,
    },
}

/// Keeps the calls of the most recent frame (everything since the last
/// full clear).
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    /// Frames started, counted by clears
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, corner_radius: f32, line_width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRoundedRect {
            rect,
            corner_radius,
            line_width,
            color,
        });
    }
}
