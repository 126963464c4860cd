//! Trail Pong - a single-paddle arcade game on a 2D canvas
//!
//! Core modules:
//! - `sim`: Simulation (ball physics, paddle, restart protocol)
//! - `renderer`: Draw-surface abstraction and per-frame rendering
//! - `frame`: Frame loop driving input, update and render
//! - `restart`: One-shot restart pulses for outside observers
//! - `input`: Discrete paddle move sources
//! - `audio`: Fire-and-forget sound effects
//! - `config`: Arena geometry and physics configuration

pub mod audio;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod renderer;
pub mod restart;
pub mod settings;
pub mod sim;

pub use config::{ArenaPreset, GameConfig, Pacing, ResetVariant, ServeDirection};
pub use error::{ConfigError, StartError};
pub use frame::{CancelToken, FrameLoop, FrameOutcome};
pub use restart::{RestartSignal, Subscription};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 200.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Horizontal distance covered by one move event
    pub const PADDLE_STEP: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Per-axis serve speed (pixels per step)
    pub const SERVE_SPEED: f32 = 2.0;
    /// Added to |dy| on every paddle hit, never capped
    pub const PADDLE_SPEEDUP: f32 = 1.0;
    /// Distance from the floor (or ceiling) where a new round starts
    pub const RESET_OFFSET: f32 = 30.0;

    /// Trail defaults
    pub const TRAIL_GHOSTS: usize = 5;
    pub const TRAIL_SPACING: f32 = 5.0;
    /// Each ghost shrinks by this much per index
    pub const TRAIL_SHRINK: f32 = 2.0;
    pub const MIN_GHOST_RADIUS: f32 = 1.0;

    /// Arena border
    pub const BORDER_CORNER_RADIUS: f32 = 5.0;
    pub const BORDER_WIDTH: f32 = 5.0;

    /// Screen shake duration (ms)
    pub const SHAKE_MS: i32 = 100;

    /// Maximum substeps per frame in fixed pacing
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Upper bound on move events drained per frame
    pub const MAX_MOVES_PER_FRAME: usize = 16;
}
