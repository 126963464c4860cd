//! Per-frame draw sequence
//!
//! Rendering is a pure read of the game state: the same state always produces
//! the same draw calls.

use super::shapes::trail_ghosts;
use super::{DrawSurface, Rect, Rgba, colors};
use crate::config::GameConfig;
use crate::settings::Settings;
use crate::sim::GameState;

/// Everything about the look of a frame that isn't game state
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub ball_color: Rgba,
    pub paddle_color: Rgba,
    pub border_color: Rgba,
    /// Number of trail ghosts, 0 disables the trail
    pub trail_ghosts: usize,
    pub trail_spacing: f32,
    pub corner_radius: f32,
    pub border_width: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new(&GameConfig::default(), &Settings::default())
    }
}

impl RenderStyle {
    pub fn new(config: &GameConfig, settings: &Settings) -> Self {
        Self {
            ball_color: colors::BALL,
            paddle_color: colors::PADDLE,
            border_color: colors::BORDER,
            trail_ghosts: if settings.effective_trails() {
                config.trail_ghosts
            } else {
                0
            },
            trail_spacing: config.trail_spacing,
            corner_radius: config.border_corner_radius,
            border_width: config.border_width,
        }
    }
}

/// Draw one frame: border, trail, paddle, then the ball on top
pub fn render<S: DrawSurface + ?Sized>(state: &GameState, style: &RenderStyle, surface: &mut S) {
    let arena = &state.arena;
    let bounds = Rect::new(0.0, 0.0, arena.width, arena.height);

    surface.clear_rect(bounds);
    surface.stroke_rounded_rect(
        bounds,
        style.corner_radius,
        style.border_width,
        style.border_color,
    );

    for ghost in trail_ghosts(&state.ball, style.trail_ghosts, style.trail_spacing) {
        surface.fill_circle(
            ghost.center,
            ghost.radius,
            style.ball_color.with_alpha(ghost.alpha),
        );
    }

    let paddle = &state.paddle;
    surface.fill_rect(
        Rect::new(paddle.left, paddle.top(arena), paddle.width, paddle.height),
        style.paddle_color,
    );

    let ball = &state.ball;
    surface.fill_circle(ball.pos, ball.radius, style.ball_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};

    #[test]
    fn test_draw_order() {
        let state = GameState::new(&GameConfig::default());
        let mut surface = RecordingSurface::new();
        render(&state, &RenderStyle::default(), &mut surface);

        let commands = surface.commands();
        // clear + border + 5 ghosts + paddle + ball
        assert_eq!(commands.len(), 9);
        assert!(matches!(commands[0], DrawCommand::Clear(r) if r == Rect::new(0.0, 0.0, 200.0, 400.0)));
        assert!(matches!(
            commands[1],
            DrawCommand::StrokeRoundedRect { corner_radius, line_width, .. }
                if corner_radius == 5.0 && line_width == 5.0
        ));
        assert_eq!(
            commands[7],
            DrawCommand::FillRect(Rect::new(50.0, 390.0, 100.0, 10.0), colors::PADDLE)
        );
        assert_eq!(
            commands[8],
            DrawCommand::FillCircle {
                center: state.ball.pos,
                radius: 10.0,
                color: colors::BALL,
            }
        );
    }

    #[test]
    fn test_trail_uses_translucent_ball_color() {
        let state = GameState::new(&GameConfig::default());
        let mut surface = RecordingSurface::new();
        render(&state, &RenderStyle::default(), &mut surface);

        for command in &surface.commands()[2..7] {
            let DrawCommand::FillCircle { color, .. } = command else {
                panic!("expected a trail ghost, got {:?}", command);
            };
            assert!(color.a < 1.0);
            assert_eq!((color.r, color.g, color.b), (0, 149, 221));
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let state = GameState::new(&GameConfig::default());
        let style = RenderStyle::default();
        let mut surface = RecordingSurface::new();

        render(&state, &style, &mut surface);
        let first = surface.commands().to_vec();
        render(&state, &style, &mut surface);

        assert_eq!(first, surface.commands());
        assert_eq!(surface.frames, 2);
    }

    #[test]
    fn test_trails_disabled_by_settings() {
        let settings = Settings {
            trails: false,
            ..Settings::default()
        };
        let style = RenderStyle::new(&GameConfig::default(), &settings);
        let state = GameState::new(&GameConfig::default());
        let mut surface = RecordingSurface::new();
        render(&state, &style, &mut surface);
        assert_eq!(surface.commands().len(), 4);
    }
}
