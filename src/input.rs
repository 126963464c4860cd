//! Paddle input sources
//!
//! The frame loop only ever sees discrete [`PaddleMove`]s; where they come
//! from (keyboard, autopilot, a test script) is up to the source.

use std::collections::VecDeque;

use crate::sim::GameState;
pub use crate::sim::PaddleMove;

/// Something that yields discrete paddle moves
pub trait InputSource {
    /// Next pending move, if any. Called repeatedly at the start of each
    /// frame until it returns `None`.
    fn poll(&mut self, state: &GameState) -> Option<PaddleMove>;
}

/// Map a DOM `KeyboardEvent.key` value to a move
pub fn move_for_key(key: &str) -> Option<PaddleMove> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(PaddleMove::Left),
        "ArrowRight" | "d" | "D" => Some(PaddleMove::Right),
        _ => None,
    }
}

/// FIFO of moves pushed by event handlers
#[derive(Debug, Clone, Default)]
pub struct KeyQueue {
    queue: VecDeque<PaddleMove>,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: PaddleMove) {
        self.queue.push_back(mv);
    }

    /// Queue the move bound to `key`; returns whether the key was recognised
    pub fn push_key(&mut self, key: &str) -> bool {
        match move_for_key(key) {
            Some(mv) => {
                self.push(mv);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for KeyQueue {
    fn poll(&mut self, _state: &GameState) -> Option<PaddleMove> {
        self.queue.pop_front()
    }
}

/// Demo player: steps the paddle toward the ball, at most once per tick
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    last_tick: Option<u64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> Option<PaddleMove> {
        if self.last_tick == Some(state.time_ticks) {
            return None;
        }
        self.last_tick = Some(state.time_ticks);

        let paddle = &state.paddle;
        let center = paddle.left + paddle.width / 2.0;
        let target = state.ball.pos.x;
        // Dead zone of half a step so the paddle doesn't jitter around the ball
        let slack = paddle.step / 2.0;

        if target < center - slack {
            Some(PaddleMove::Left)
        } else if target > center + slack {
            Some(PaddleMove::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;

    #[test]
    fn test_key_mapping() {
        assert_eq!(move_for_key("ArrowLeft"), Some(PaddleMove::Left));
        assert_eq!(move_for_key("d"), Some(PaddleMove::Right));
        assert_eq!(move_for_key("ArrowUp"), None);
        assert_eq!(move_for_key("Enter"), None);
    }

    #[test]
    fn test_queue_drains_in_order() {
        let state = GameState::new(&GameConfig::default());
        let mut queue = KeyQueue::new();
        assert!(queue.push_key("ArrowRight"));
        assert!(!queue.push_key("x"));
        assert!(queue.push_key("ArrowLeft"));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.poll(&state), Some(PaddleMove::Right));
        assert_eq!(queue.poll(&state), Some(PaddleMove::Left));
        assert_eq!(queue.poll(&state), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_autopilot_tracks_ball_once_per_tick() {
        let mut state = GameState::new(&GameConfig::default());
        let mut pilot = Autopilot::new();

        state.ball.pos = Vec2::new(10.0, 200.0);
        assert_eq!(pilot.poll(&state), Some(PaddleMove::Left));
        assert_eq!(pilot.poll(&state), None);

        state.time_ticks += 1;
        state.ball.pos = Vec2::new(190.0, 200.0);
        assert_eq!(pilot.poll(&state), Some(PaddleMove::Right));

        state.time_ticks += 1;
        state.ball.pos = Vec2::new(100.0, 200.0);
        assert_eq!(pilot.poll(&state), None);
    }
}
