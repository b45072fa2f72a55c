//! The basketball resting at center court

use glam::Vec3;

use super::primitive::{Placement, Primitive, Shape};
use crate::consts::{BALL_LIFT, BALL_RADIUS, BALL_SEGMENTS};
use crate::material::MaterialKey;

pub fn build_ball() -> Primitive {
    Primitive::new(
        Shape::Sphere {
            radius: BALL_RADIUS,
            width_segments: BALL_SEGMENTS,
            height_segments: BALL_SEGMENTS,
        },
        Placement::at(Vec3::new(0.0, BALL_RADIUS + BALL_LIFT, 0.0)),
        MaterialKey::Ball,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_rests_on_slab() {
        let ball = build_ball();
        let Shape::Sphere { radius, .. } = ball.shape else {
            panic!("ball should be a sphere");
        };
        // Bottom of the ball touches the slab's top face at y = 0.1
        let bottom = ball.placement.position.y - radius;
        assert!((bottom - 0.1).abs() < 1e-6);
        assert_eq!(ball.placement.position.x, 0.0);
        assert_eq!(ball.placement.position.z, 0.0);
    }
}
