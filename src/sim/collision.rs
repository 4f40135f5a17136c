//! Collision detection and response
//!
//! Paddle hits redirect the ball by contact position (center = straight up,
//! edges = steep), walls and bricks invert one velocity axis. All responses
//! preserve the ball's speed magnitude.

use glam::Vec2;

use super::geometry::Rect;
use crate::consts::MAX_BOUNCE_ANGLE;

/// Which walls the ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub side: bool,
    pub ceiling: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.side || self.ceiling
    }
}

/// Reflection angle (radians from vertical) for a contact point
///
/// `normalized` is the ball center's position along the paddle, 0 at the left
/// edge and 1 at the right. Values outside [0, 1] happen when the ball clips a
/// paddle corner; they are clamped to the edge angle.
pub fn reflection_angle(normalized: f32) -> f32 {
    (normalized.clamp(0.0, 1.0) - 0.5) * MAX_BOUNCE_ANGLE
}

/// Velocity leaving the paddle at `angle` from vertical, always upward
#[inline]
pub fn bounce_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// Ball center's position along the paddle, normalized by paddle width
pub fn paddle_contact_point(ball: &Rect, paddle: &Rect) -> f32 {
    (ball.center().x - paddle.left()) / paddle.width()
}

/// Does a downward-moving ball land on the paddle?
///
/// The ball's bottom edge has to be inside the paddle's vertical band, so a
/// ball that already slipped past the paddle top is not scooped back up.
pub fn ball_paddle_contact(ball: &Rect, vel: Vec2, paddle: &Rect) -> bool {
    vel.y > 0.0
        && ball.bottom() >= paddle.top()
        && ball.bottom() <= paddle.bottom()
        && ball.overlaps_x(paddle)
}

/// Bounce off the left, right and top walls
///
/// Inverts the velocity axis for each wall touched and clamps the position
/// back into the field. The bottom edge is not a wall: crossing it loses the
/// ball.
pub fn wall_response(pos: &mut Vec2, vel: &mut Vec2, size: f32, field_width: f32) -> WallHit {
    let mut hit = WallHit::default();

    if pos.x <= 0.0 || pos.x + size >= field_width {
        vel.x = -vel.x;
        pos.x = pos.x.clamp(0.0, field_width - size);
        hit.side = true;
    }
    if pos.y <= 0.0 {
        vel.y = -vel.y;
        pos.y = 0.0;
        hit.ceiling = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_pos_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_reflection_angle_range() {
        assert!(reflection_angle(0.5).abs() < 1e-6);
        assert!((reflection_angle(0.0) + PI / 6.0).abs() < 1e-6);
        assert!((reflection_angle(1.0) - PI / 6.0).abs() < 1e-6);
        // Corner clips clamp to the edge angle
        assert_eq!(reflection_angle(-0.2), reflection_angle(0.0));
        assert_eq!(reflection_angle(1.3), reflection_angle(1.0));
    }

    #[test]
    fn test_bounce_velocity_preserves_speed() {
        for i in 0..=10 {
            let angle = reflection_angle(i as f32 / 10.0);
            let vel = bounce_velocity(angle, 6.0);
            assert!((vel.length() - 6.0).abs() < 1e-4);
            assert!(vel.y < 0.0, "paddle bounce must go up");
        }
    }

    #[test]
    fn test_left_edge_bounce() {
        let vel = bounce_velocity(reflection_angle(0.0), 6.0);
        assert!((vel.x - -3.0).abs() < 1e-4);
        assert!((vel.y - -5.196).abs() < 1e-3);
    }

    #[test]
    fn test_paddle_contact() {
        let paddle = rect(350.0, 570.0, 100.0, 15.0);

        // Bottom edge inside the band, moving down
        let ball = rect(392.5, 556.0, 15.0, 15.0);
        assert!(ball_paddle_contact(&ball, Vec2::new(0.0, 6.0), &paddle));
        assert!((paddle_contact_point(&ball, &paddle) - 0.5).abs() < 1e-6);

        // Moving up never counts
        assert!(!ball_paddle_contact(&ball, Vec2::new(0.0, -6.0), &paddle));

        // Already below the paddle band
        let low = rect(392.5, 575.0, 15.0, 15.0);
        assert!(!ball_paddle_contact(&low, Vec2::new(0.0, 6.0), &paddle));

        // Beside the paddle
        let beside = rect(300.0, 556.0, 15.0, 15.0);
        assert!(!ball_paddle_contact(&beside, Vec2::new(0.0, 6.0), &paddle));
    }

    #[test]
    fn test_wall_response() {
        let mut pos = Vec2::new(-2.0, 100.0);
        let mut vel = Vec2::new(-4.0, 3.0);
        let hit = wall_response(&mut pos, &mut vel, 15.0, 800.0);
        assert!(hit.side && !hit.ceiling);
        assert_eq!(pos.x, 0.0);
        assert_eq!(vel, Vec2::new(4.0, 3.0));

        let mut pos = Vec2::new(790.0, -1.0);
        let mut vel = Vec2::new(4.0, -3.0);
        let hit = wall_response(&mut pos, &mut vel, 15.0, 800.0);
        assert!(hit.side && hit.ceiling);
        assert_eq!(pos, Vec2::new(785.0, 0.0));
        assert_eq!(vel, Vec2::new(-4.0, 3.0));

        let mut pos = Vec2::new(400.0, 300.0);
        let mut vel = Vec2::new(4.0, -3.0);
        assert!(!wall_response(&mut pos, &mut vel, 15.0, 800.0).any());
    }
}
