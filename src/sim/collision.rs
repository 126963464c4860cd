//! Collision tests for an axis-aligned arena
//!
//! All tests take the tentative next position (current position plus the
//! pre-collision velocity) and never mutate anything.

use glam::Vec2;

use super::state::{Arena, Paddle};

/// Which arena walls the tentative position touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    /// Left or right wall
    pub side: bool,
    /// Ceiling
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Side walls bound the ball's x to [0, width - radius]; the ceiling bounds y
/// below by 0.
pub fn wall_contact(next: Vec2, radius: f32, arena: &Arena) -> WallContact {
    WallContact {
        side: next.x > arena.width - radius || next.x < 0.0,
        top: next.y < 0.0,
    }
}

/// Ball moving down whose next position reaches the paddle band while its x
/// lies strictly within the paddle.
pub fn hits_paddle(next: Vec2, vel: Vec2, radius: f32, paddle: &Paddle, arena: &Arena) -> bool {
    vel.y > 0.0 && next.y > paddle.top(arena) - radius && paddle.spans(next.x)
}

/// Ball moving down whose next position is past the floor
pub fn exits_floor(next: Vec2, vel: Vec2, radius: f32, arena: &Arena) -> bool {
    vel.y > 0.0 && next.y > arena.height - radius
}
