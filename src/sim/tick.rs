//! Per-step simulation update
//!
//! Collision tests run against the tentative next position, using the
//! velocity that would be applied. The position is committed afterwards with
//! the collision-adjusted velocity.

use super::collision::{exits_floor, hits_paddle, wall_contact};
use super::state::{GameState, PaddleMove};

/// Input for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle moves, applied in order before the ball moves
    pub moves: Vec<PaddleMove>,
}

/// Side effects of a step, for audio and visual feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off a side wall or the ceiling
    WallBounce,
    /// Ball bounced off the ceiling
    TopWallImpact,
    /// Ball bounced off the paddle; `speed` is the new |dy|
    PaddleBounce { speed: f32 },
}

/// Work the owner of the state must perform after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ball left through the floor; the round has to be reset
    Restart,
}

/// Outcome of one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    pub command: Option<Command>,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    state.time_ticks += 1;

    for &mv in &input.moves {
        state.paddle.apply(mv, &state.arena);
    }

    let arena = state.arena;
    let ball = &mut state.ball;
    let vel = ball.vel;
    let next = ball.pos + vel;

    let walls = wall_contact(next, ball.radius, &arena);
    if walls.side {
        ball.vel.x = -ball.vel.x;
        report.events.push(GameEvent::WallBounce);
    }
    if walls.top {
        ball.vel.y = -ball.vel.y;
        report.events.push(GameEvent::WallBounce);
        report.events.push(GameEvent::TopWallImpact);
    }

    // Past the floor line the round is over, even above the paddle
    if exits_floor(next, vel, ball.radius, &arena) {
        log::debug!(
            "Ball exited at x={:.1} after {} ticks (round {})",
            next.x,
            state.time_ticks,
            state.round
        );
        report.command = Some(Command::Restart);
        return report;
    }

    // Speed escalation is uncapped: rallies keep accelerating
    if hits_paddle(next, ball.vel, ball.radius, &state.paddle, &arena) {
        let speed = ball.vel.y.abs() + state.paddle_speedup;
        ball.vel.y = -speed;
        report.events.push(GameEvent::PaddleBounce { speed });
    }

    ball.pos += ball.vel;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;

    fn state_with_ball(pos: Vec2, vel: Vec2) -> GameState {
        let mut state = GameState::new(&GameConfig::default());
        state.ball.pos = pos;
        state.ball.vel = vel;
        state
    }

    #[test]
    fn test_free_flight_moves_by_velocity() {
        let mut state = state_with_ball(Vec2::new(100.0, 100.0), Vec2::new(2.0, -2.0));
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report, TickReport::default());
        assert_eq!(state.ball.pos, Vec2::new(102.0, 98.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_right_wall_bounce() {
        // W - r - 1 = 189
        let mut state = state_with_ball(Vec2::new(189.0, 100.0), Vec2::new(2.0, -2.0));
        let report = tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel.x, -2.0);
        assert!(state.ball.pos.x >= 0.0 && state.ball.pos.x <= 190.0);
        assert_eq!(report.events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut state = state_with_ball(Vec2::new(1.0, 100.0), Vec2::new(-2.0, 2.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel.x, 2.0);
        assert_eq!(state.ball.pos.x, 3.0);
    }

    #[test]
    fn test_top_wall_bounce_signals_impact() {
        let mut state = state_with_ball(Vec2::new(100.0, 1.0), Vec2::new(2.0, -2.0));
        let report = tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel.y, 2.0);
        assert_eq!(state.ball.pos.y, 3.0);
        assert_eq!(
            report.events,
            vec![GameEvent::WallBounce, GameEvent::TopWallImpact]
        );
    }

    #[test]
    fn test_side_wall_never_signals_impact() {
        let mut state = state_with_ball(Vec2::new(189.0, 200.0), Vec2::new(2.0, 2.0));
        let report = tick(&mut state, &TickInput::default());
        assert!(!report.events.contains(&GameEvent::TopWallImpact));
    }

    #[test]
    fn test_floor_exit_requests_restart_without_moving() {
        // Paddle parked on the left so the ball passes it
        let mut state = state_with_ball(Vec2::new(180.0, 391.0), Vec2::new(0.0, 2.0));
        state.paddle.left = 0.0;

        let report = tick(&mut state, &TickInput::default());

        assert_eq!(report.command, Some(Command::Restart));
        assert_eq!(state.ball.pos, Vec2::new(180.0, 391.0));
    }

    #[test]
    fn test_paddle_hit_flips_and_escalates() {
        // Paddle [50, 150], band past 380
        let mut state = state_with_ball(Vec2::new(100.0, 379.0), Vec2::new(2.0, 3.0));
        let report = tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel.y, -4.0);
        assert_eq!(state.ball.pos, Vec2::new(102.0, 375.0));
        assert_eq!(report.events, vec![GameEvent::PaddleBounce { speed: 4.0 }]);
        assert_eq!(report.command, None);
    }

    #[test]
    fn test_paddle_miss_outside_span() {
        let mut state = state_with_ball(Vec2::new(20.0, 379.0), Vec2::new(0.0, 3.0));
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel.y, 3.0);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_floor_exit_above_centred_paddle() {
        // Default layout: paddle [50, 150] right under the ball
        let mut state = state_with_ball(Vec2::new(100.0, 391.0), Vec2::new(0.0, 2.0));
        assert_eq!(state.paddle.left, 50.0);

        let report = tick(&mut state, &TickInput::default());

        assert_eq!(report.command, Some(Command::Restart));
        assert!(report.events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(100.0, 391.0));
        assert_eq!(state.ball.vel, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_speed_keeps_escalating() {
        let mut state = state_with_ball(Vec2::new(100.0, 300.0), Vec2::new(0.0, 2.0));
        let mut hits = 0;
        for _ in 0..5000 {
            let report = tick(&mut state, &TickInput::default());
            hits += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PaddleBounce { .. }))
                .count();
            // Once a step outgrows the paddle band the ball jumps the floor line
            if report.command.is_some() {
                break;
            }
        }
        assert!(hits >= 5);
        assert_eq!(state.ball.vel.y.abs(), 2.0 + hits as f32);
    }

    #[test]
    fn test_side_wall_and_paddle_in_same_step() {
        let mut state = state_with_ball(Vec2::new(189.0, 379.0), Vec2::new(2.0, 2.0));
        state.paddle.left = 100.0;

        let report = tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel, Vec2::new(-2.0, -3.0));
        assert_eq!(
            report.events,
            vec![GameEvent::WallBounce, GameEvent::PaddleBounce { speed: 3.0 }]
        );
    }

    #[test]
    fn test_moves_apply_before_ball() {
        // Ball just left of the paddle; one move left puts the paddle under it
        let mut state = state_with_ball(Vec2::new(45.0, 379.0), Vec2::new(0.0, 2.0));
        let input = TickInput {
            moves: vec![PaddleMove::Left],
        };
        let report = tick(&mut state, &input);
        assert_eq!(state.paddle.left, 30.0);
        assert_eq!(report.events, vec![GameEvent::PaddleBounce { speed: 3.0 }]);
    }
}
