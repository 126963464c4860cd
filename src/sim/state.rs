//! Game state and core simulation types
//!
//! Ball and paddle are created once per session and reset in place.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, ResetVariant, ServeDirection};

/// Fixed rectangular play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per simulation step
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A single discrete paddle move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleMove {
    Left,
    Right,
}

/// The player's paddle, resting on the arena floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// X of the left edge, kept within [0, arena width - width]
    pub left: f32,
    pub width: f32,
    pub height: f32,
    /// Distance covered by one move
    pub step: f32,
}

impl Paddle {
    /// Paddle centred horizontally in the arena
    pub fn centered(arena: &Arena, width: f32, height: f32, step: f32) -> Self {
        Self {
            left: (arena.width - width) / 2.0,
            width,
            height,
            step,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Y of the top edge
    pub fn top(&self, arena: &Arena) -> f32 {
        arena.height - self.height
    }

    /// Whether `x` lies strictly between the paddle edges
    pub fn spans(&self, x: f32) -> bool {
        x > self.left && x < self.right()
    }

    pub fn move_left(&mut self) {
        if self.left > 0.0 {
            self.left = (self.left - self.step).max(0.0);
        }
    }

    pub fn move_right(&mut self, arena: &Arena) {
        let max_left = arena.width - self.width;
        if self.right() < arena.width {
            self.left = (self.left + self.step).min(max_left);
        }
    }

    pub fn apply(&mut self, mv: PaddleMove, arena: &Arena) {
        match mv {
            PaddleMove::Left => self.move_left(),
            PaddleMove::Right => self.move_right(arena),
        }
    }
}

/// Seeded RNG position, replayable from (seed, draws)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.draws);
        rng
    }

    /// Draw a fair coin flip
    pub fn next_bool(&mut self) -> bool {
        let bit = self.to_rng().next_u32() >> 31 == 1;
        self.draws += 1;
        bit
    }
}

/// Complete simulation state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Added to |dy| on each paddle hit
    pub paddle_speedup: f32,
    pub serve_speed: f32,
    pub reset_offset: f32,
    pub reset_variant: ResetVariant,
    pub serve_direction: ServeDirection,
    pub rng_state: RngState,
    /// Simulation steps taken this session
    pub time_ticks: u64,
    /// Rounds started since session start (the opening serve is round 1)
    pub round: u32,
}

impl GameState {
    /// Set up a new session: paddle centred, ball served downward from near
    /// the ceiling.
    pub fn new(config: &GameConfig) -> Self {
        let arena = config.arena();
        let paddle = Paddle::centered(
            &arena,
            config.paddle_width,
            config.paddle_height,
            config.paddle_step,
        );
        let ball = Ball::new(
            Vec2::new(arena.center_x(), config.reset_offset),
            Vec2::new(config.serve_speed, config.serve_speed),
            config.ball_radius,
        );

        Self {
            arena,
            ball,
            paddle,
            paddle_speedup: config.paddle_speedup,
            serve_speed: config.serve_speed,
            reset_offset: config.reset_offset,
            reset_variant: config.reset_variant,
            serve_direction: config.serve_direction,
            rng_state: RngState::new(config.seed),
            time_ticks: 0,
            round: 1,
        }
    }

    /// Put the ball back into play. The paddle stays where it is.
    pub fn restart(&mut self) {
        let dx = match self.serve_direction {
            ServeDirection::Fixed => self.serve_speed,
            ServeDirection::Random => {
                if self.rng_state.next_bool() {
                    self.serve_speed
                } else {
                    -self.serve_speed
                }
            }
        };

        let (y, dy) = match self.reset_variant {
            ResetVariant::NearFloor => (self.arena.height - self.reset_offset, -self.serve_speed),
            ResetVariant::NearCeiling => (self.reset_offset, self.serve_speed),
        };

        self.ball.pos = Vec2::new(self.arena.center_x(), y);
        self.ball.vel = Vec2::new(dx, dy);
        self.round += 1;
    }
}
