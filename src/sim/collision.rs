//! Dot/paddle collision detection
//!
//! Only the point of the dot facing its direction of horizontal travel is
//! tested, and only against the paddle it is travelling toward. A hit
//! reverses the horizontal velocity and nothing else: no spin, no angle
//! change, no position correction.

use glam::IVec2;

use super::rect::Rect;
use super::state::{Dot, Side};

/// The paddle side a dot is heading toward and the point of the dot that
/// would touch it first. `None` while the dot has no horizontal motion.
pub fn leading_edge(center: IVec2, radius: i32, vel_x: i32) -> Option<(Side, IVec2)> {
    if vel_x > 0 {
        Some((Side::Right, IVec2::new(center.x + radius, center.y)))
    } else if vel_x < 0 {
        Some((Side::Left, IVec2::new(center.x - radius, center.y)))
    } else {
        None
    }
}

/// Which paddle, if any, the dot's leading edge is inside
pub fn paddle_hit(center: IVec2, radius: i32, vel_x: i32, left: &Rect, right: &Rect) -> Option<Side> {
    let (side, point) = leading_edge(center, radius, vel_x)?;
    let rect = match side {
        Side::Left => left,
        Side::Right => right,
    };
    rect.contains_point(point).then_some(side)
}

/// Outcome of testing the dot against both paddles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deflection {
    /// Horizontal velocity to use from now on
    pub vel_x: i32,
    /// Last paddle that reversed the dot
    pub hit: Option<Side>,
}

/// Horizontal velocity after paddle contact
///
/// The right paddle is checked first; the left paddle check then sees the
/// possibly reversed velocity.
pub fn deflect(center: IVec2, radius: i32, vel_x: i32, left: &Rect, right: &Rect) -> Deflection {
    let mut out = Deflection { vel_x, hit: None };
    if out.vel_x > 0 && paddle_hit(center, radius, out.vel_x, left, right) == Some(Side::Right) {
        out.vel_x = -out.vel_x;
        out.hit = Some(Side::Right);
    }
    if out.vel_x < 0 && paddle_hit(center, radius, out.vel_x, left, right) == Some(Side::Left) {
        out.vel_x = -out.vel_x;
        out.hit = Some(Side::Left);
    }
    out
}

/// Apply paddle contact to the dot in place
pub fn resolve_paddle_collision(dot: &mut Dot, left: &Rect, right: &Rect) -> Option<Side> {
    let deflection = deflect(dot.center, dot.radius, dot.velocity.x, left, right);
    dot.velocity.x = deflection.vel_x;
    deflection.hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Paddle;

    fn paddles() -> (Rect, Rect) {
        (Paddle::new(Side::Left).rect, Paddle::new(Side::Right).rect)
    }

    #[test]
    fn test_left_paddle_hit_reverses_x() {
        let (left, right) = paddles();
        let mut dot = Dot {
            center: IVec2::new(60, 200),
            velocity: IVec2::new(-5, 3),
            ..Default::default()
        };
        let hit = resolve_paddle_collision(&mut dot, &left, &right);
        assert_eq!(hit, Some(Side::Left));
        assert_eq!(dot.velocity, IVec2::new(5, 3));
    }

    #[test]
    fn test_right_paddle_hit_reverses_x() {
        let (left, right) = paddles();
        let mut dot = Dot {
            center: IVec2::new(432, 170),
            velocity: IVec2::new(5, -3),
            ..Default::default()
        };
        let hit = resolve_paddle_collision(&mut dot, &left, &right);
        assert_eq!(hit, Some(Side::Right));
        assert_eq!(dot.velocity, IVec2::new(-5, -3));
    }

    #[test]
    fn test_moving_away_from_paddle_is_ignored() {
        let (left, right) = paddles();
        // Leading edge on the left paddle, but travelling right
        let mut dot = Dot {
            center: IVec2::new(60, 200),
            velocity: IVec2::new(5, 3),
            ..Default::default()
        };
        assert_eq!(resolve_paddle_collision(&mut dot, &left, &right), None);
        assert_eq!(dot.velocity, IVec2::new(5, 3));
    }

    #[test]
    fn test_miss_above_paddle() {
        let (left, right) = paddles();
        assert_eq!(paddle_hit(IVec2::new(60, 164), 10, -5, &left, &right), None);
        assert_eq!(paddle_hit(IVec2::new(60, 165), 10, -5, &left, &right), Some(Side::Left));
        assert_eq!(paddle_hit(IVec2::new(60, 235), 10, -5, &left, &right), None);
    }

    #[test]
    fn test_leading_edge_follows_direction() {
        let c = IVec2::new(100, 50);
        assert_eq!(leading_edge(c, 10, 3), Some((Side::Right, IVec2::new(110, 50))));
        assert_eq!(leading_edge(c, 10, -3), Some((Side::Left, IVec2::new(90, 50))));
        assert_eq!(leading_edge(c, 10, 0), None);
    }

    #[test]
    fn test_reversed_dot_is_not_flipped_back_next_frame() {
        let (left, right) = paddles();
        let mut dot = Dot {
            center: IVec2::new(435, 200),
            velocity: IVec2::new(5, 0),
            ..Default::default()
        };
        assert_eq!(resolve_paddle_collision(&mut dot, &left, &right), Some(Side::Right));
        // Still overlapping the right paddle, but now heading left
        assert_eq!(resolve_paddle_collision(&mut dot, &left, &right), None);
        assert_eq!(dot.velocity.x, -5);
    }

    #[test]
    fn test_narrow_court_bounces_twice() {
        // Leading edges inside both paddles at once: the right paddle turns
        // the dot around and the left paddle turns it back.
        let left = Rect::new(0, 0, 10, 50);
        let right = Rect::new(20, 0, 10, 50);
        let deflection = deflect(IVec2::new(15, 10), 10, 4, &left, &right);
        assert_eq!(deflection, Deflection { vel_x: 4, hit: Some(Side::Left) });
    }
}
