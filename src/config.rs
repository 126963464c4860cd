//! Arena geometry and physics configuration
//!
//! Everything here is fixed for the lifetime of one session. No validation is
//! performed: a paddle wider than the arena is the caller's problem.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Arena;

/// Where the ball is placed when a round restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResetVariant {
    /// Just above the floor, moving up
    #[default]
    NearFloor,
    /// Just below the ceiling, moving down
    NearCeiling,
}

/// Horizontal direction of a new serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServeDirection {
    /// Always to the right
    #[default]
    Fixed,
    /// Left or right, drawn from the seeded RNG
    Random,
}

/// How simulation steps relate to display refreshes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Pacing {
    /// One step per refresh; velocities are pixels per frame, so game speed
    /// follows the display refresh rate.
    #[default]
    PerFrame,
    /// Fixed-rate steps driven by an accumulator, independent of refresh rate
    Fixed { hz: f32 },
}

impl Pacing {
    /// Step duration in seconds, if fixed
    pub fn step_dt(&self) -> Option<f32> {
        match self {
            Pacing::PerFrame => None,
            Pacing::Fixed { hz } => Some(1.0 / hz),
        }
    }
}

/// Canvas sizes seen in the wild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArenaPreset {
    /// 200x400 portrait
    #[default]
    Narrow,
    /// 400x600 portrait
    Wide,
}

impl ArenaPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaPreset::Narrow => "Narrow",
            ArenaPreset::Wide => "Wide",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "narrow" | "200x400" => Some(ArenaPreset::Narrow),
            "wide" | "400x600" => Some(ArenaPreset::Wide),
            _ => None,
        }
    }

    /// Canvas (width, height) in pixels
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            ArenaPreset::Narrow => (200.0, 400.0),
            ArenaPreset::Wide => (400.0, 600.0),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub serve_speed: f32,
    pub paddle_speedup: f32,
    pub reset_offset: f32,
    pub reset_variant: ResetVariant,
    pub serve_direction: ServeDirection,
    /// Seed for the serve RNG
    pub seed: u64,

    // === Timing ===
    pub pacing: Pacing,

    // === Rendering ===
    pub trail_ghosts: usize,
    pub trail_spacing: f32,
    pub border_corner_radius: f32,
    pub border_width: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,

            ball_radius: BALL_RADIUS,
            serve_speed: SERVE_SPEED,
            paddle_speedup: PADDLE_SPEEDUP,
            reset_offset: RESET_OFFSET,
            reset_variant: ResetVariant::NearFloor,
            serve_direction: ServeDirection::Fixed,
            seed: 0,

            pacing: Pacing::PerFrame,

            trail_ghosts: TRAIL_GHOSTS,
            trail_spacing: TRAIL_SPACING,
            border_corner_radius: BORDER_CORNER_RADIUS,
            border_width: BORDER_WIDTH,
        }
    }
}

impl GameConfig {
    /// Default configuration sized for a preset canvas
    pub fn preset(preset: ArenaPreset) -> Self {
        let (arena_width, arena_height) = preset.dimensions();
        Self {
            arena_width,
            arena_height,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config from {} ({}x{})",
            path.display(),
            config.arena_width,
            config.arena_height
        );
        Ok(config)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }
}
