//! Shape generation for the ball trail

use glam::Vec2;

use crate::consts::{MIN_GHOST_RADIUS, TRAIL_SHRINK};
use crate::sim::Ball;

/// One faded copy of the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Ghosts trailing the ball, nearest first.
///
/// Ghost `i` sits `i * spacing` velocity-lengths behind the ball, shrinks by
/// `TRAIL_SHRINK` per index and fades linearly to zero at the last index.
pub fn trail_ghosts(ball: &Ball, count: usize, spacing: f32) -> Vec<Ghost> {
    (0..count)
        .map(|i| {
            let t = i as f32;
            Ghost {
                center: ball.pos - ball.vel * t * spacing,
                radius: (ball.radius - t * TRAIL_SHRINK).max(MIN_GHOST_RADIUS),
                alpha: 1.0 - (t + 1.0) / count as f32,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghosts_fade_and_shrink_behind_ball() {
        let ball = Ball::new(Vec2::new(100.0, 100.0), Vec2::new(2.0, -2.0), 10.0);
        let ghosts = trail_ghosts(&ball, 5, 5.0);

        assert_eq!(ghosts.len(), 5);
        assert_eq!(ghosts[0].center, ball.pos);
        assert_eq!(ghosts[2].center, Vec2::new(80.0, 120.0));
        assert_eq!(ghosts[3].radius, 4.0);
        assert!((ghosts[0].alpha - 0.8).abs() < 1e-6);
        assert!(ghosts[4].alpha.abs() < 1e-6);

        for pair in ghosts.windows(2) {
            assert!(pair[1].alpha < pair[0].alpha);
            assert!(pair[1].radius < pair[0].radius);
        }
    }

    #[test]
    fn test_small_ball_radius_floor() {
        let ball = Ball::new(Vec2::ZERO, Vec2::X, 3.0);
        let ghosts = trail_ghosts(&ball, 4, 5.0);
        assert!(ghosts.iter().all(|g| g.radius >= MIN_GHOST_RADIUS));
    }

    #[test]
    fn test_no_ghosts() {
        let ball = Ball::new(Vec2::ZERO, Vec2::X, 10.0);
        assert!(trail_ghosts(&ball, 0, 5.0).is_empty());
    }
}
