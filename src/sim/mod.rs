//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! the frame driver owns the single `GameState` and passes it in.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{WallContact, exits_floor, hits_paddle, wall_contact};
pub use state::{Arena, Ball, GameState, Paddle, PaddleMove, RngState};
pub use tick::{Command, GameEvent, TickInput, TickReport, tick};
