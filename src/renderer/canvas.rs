//! `CanvasRenderingContext2d` backend

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{DrawSurface, Rect, Rgba};

/// Draw surface over a browser 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.ctx
            .clear_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        ctx.set_fill_style_str(&color.css());
        ctx.fill();
        ctx.close_path();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let ctx = &self.ctx;
        ctx.begin_path();
        if let Err(e) = ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        ctx.set_fill_style_str(&color.css());
        ctx.fill();
        ctx.close_path();
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, corner_radius: f32, line_width: f32, color: Rgba) {
        let ctx = &self.ctx;
        let (x0, y0) = (rect.x as f64, rect.y as f64);
        let (x1, y1) = (x0 + rect.w as f64, y0 + rect.h as f64);
        let r = corner_radius as f64;

        ctx.begin_path();
        ctx.move_to(x0 + r, y0);
        let corners = [
            (x1, y0, x1, y1),
            (x1, y1, x0, y1),
            (x0, y1, x0, y0),
            (x0, y0, x1, y0),
        ];
        for (cx, cy, nx, ny) in corners {
            if let Err(e) = ctx.arc_to(cx, cy, nx, ny, r) {
                log::warn!("arc_to failed: {:?}", e);
                return;
            }
        }
        ctx.set_line_width(line_width as f64);
        ctx.set_stroke_style_str(&color.css());
        ctx.stroke();
        ctx.close_path();
    }
}
