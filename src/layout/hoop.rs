//! Hoop assemblies: pole, arm, backboard, rim and net
//!
//! Built from a single pole position on the baseline. Everything else is
//! offset toward center court by `facing_direction(x_offset)`, so the left
//! and right hoops are mirror images of each other.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::primitive::{Placement, Primitive, Shape};
use crate::consts::*;
use crate::material::MaterialKey;
use crate::{facing_direction, point_on_circle};

/// One hoop and its support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    pub pole: Primitive,
    pub arm: Primitive,
    pub backboard: Primitive,
    pub rim: Primitive,
    pub net: [Primitive; NET_SEGMENTS],
}

impl Hoop {
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        [&self.pole, &self.arm, &self.backboard, &self.rim]
            .into_iter()
            .chain(self.net.iter())
    }

    pub fn rim_center(&self) -> Vec3 {
        self.rim.placement.position
    }
}

/// Distance from the backboard face to the rim before the empirical scale
pub fn rim_offset() -> f32 {
    BACKBOARD_THICKNESS / 2.0 + RIM_THICKNESS / 2.0 + RIM_CLEARANCE
}

pub fn build_hoop(x_offset: f32) -> Hoop {
    let direction = facing_direction(x_offset);

    let pole_position = Vec3::new(x_offset, POLE_CENTER_Y, 0.0);
    let pole = Primitive::new(
        Shape::Cylinder {
            top_radius: POLE_RADIUS,
            bottom_radius: POLE_RADIUS,
            height: POLE_HEIGHT,
        },
        Placement::at(pole_position),
        MaterialKey::Support,
    );

    let arm_end_x = pole_position.x + direction * ARM_LENGTH;
    let arm = Primitive::line(
        Shape::segment(
            Vec3::new(pole_position.x, HOOP_HEIGHT + ARM_RISE, 0.0),
            Vec3::new(arm_end_x, HOOP_HEIGHT, 0.0),
        ),
        MaterialKey::LineMarking,
    );

    let backboard = Primitive::new(
        Shape::Box {
            width: BACKBOARD_WIDTH,
            height: BACKBOARD_HEIGHT,
            depth: BACKBOARD_THICKNESS,
        },
        Placement::at(Vec3::new(arm_end_x, HOOP_HEIGHT, 0.0))
            .with_rotation(Vec3::new(0.0, -direction * FRAC_PI_2, 0.0)),
        MaterialKey::Backboard,
    );

    let rim_position = Vec3::new(
        arm_end_x + direction * rim_offset() * RIM_OFFSET_SCALE,
        HOOP_HEIGHT - RIM_DROP,
        0.0,
    );
    let rim = Primitive::new(
        Shape::Torus {
            major_radius: RIM_RADIUS,
            tube_radius: RIM_THICKNESS,
            radial_segments: RIM_RADIAL_SEGMENTS,
            tubular_segments: RIM_TUBULAR_SEGMENTS,
        },
        Placement::at(rim_position).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
        MaterialKey::Rim,
    );

    let net = std::array::from_fn(|i| {
        let theta = i as f32 / NET_SEGMENTS as f32 * TAU;
        let top = point_on_circle(
            rim_position.x,
            rim_position.z,
            RIM_RADIUS,
            theta,
            rim_position.y,
        );
        let bottom = top - Vec3::Y * NET_LENGTH;
        Primitive::line(Shape::segment(top, bottom), MaterialKey::Net)
    });

    Hoop {
        pole,
        arm,
        backboard,
        rim,
        net,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror_x;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    fn all_points(hoop: &Hoop) -> Vec<Vec3> {
        hoop.primitives().flat_map(|p| p.anchor_points()).collect()
    }

    #[test]
    fn test_left_hoop_positions() {
        // Left baseline faces +x, so the arm reaches in to -15 + 0.4
        let hoop = build_hoop(-15.0);
        assert!(close(hoop.pole.placement.position, Vec3::new(-15.0, 2.0, 0.0)));
        assert!(close(
            hoop.backboard.placement.position,
            Vec3::new(-14.6, 3.05, 0.0)
        ));
        assert!((rim_offset() - 0.07).abs() < 1e-6);
        assert!(close(hoop.rim_center(), Vec3::new(-14.11, 2.9, 0.0)));

        let arm = hoop.arm.shape.line_points().unwrap();
        assert!(close(arm[0], Vec3::new(-15.0, 3.55, 0.0)));
        assert!(close(arm[1], Vec3::new(-14.6, 3.05, 0.0)));
    }

    #[test]
    fn test_rim_hangs_over_the_court() {
        for x in [-15.0f32, 15.0] {
            let hoop = build_hoop(x);
            let rim = hoop.rim_center();
            assert!(rim.x.abs() < x.abs(), "rim at {} outside baseline {}", rim.x, x);
            assert!((rim.x.abs() - 14.11).abs() < EPS);
        }
    }

    #[test]
    fn test_backboard_faces_center_court() {
        let left = build_hoop(-15.0);
        let right = build_hoop(15.0);
        assert!((left.backboard.placement.rotation.y + FRAC_PI_2).abs() < 1e-6);
        assert!((right.backboard.placement.rotation.y - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_rim_lies_flat() {
        let hoop = build_hoop(15.0);
        assert_eq!(hoop.rim.placement.rotation, Vec3::new(FRAC_PI_2, 0.0, 0.0));
        assert_eq!(
            hoop.rim.shape,
            Shape::Torus {
                major_radius: 0.45,
                tube_radius: 0.05,
                radial_segments: 16,
                tubular_segments: 100
            }
        );
    }

    #[test]
    fn test_net_segments() {
        let hoop = build_hoop(-15.0);
        let rim = hoop.rim_center();
        assert_eq!(hoop.net.len(), 8);

        for (i, segment) in hoop.net.iter().enumerate() {
            let points = segment.shape.line_points().unwrap();
            let (top, bottom) = (points[0], points[1]);
            assert!(((top - bottom).length() - 0.5).abs() < 1e-5);
            assert_eq!(top.x, bottom.x);
            assert_eq!(top.z, bottom.z);
            assert_eq!(top.y, rim.y);

            let offset = top - rim;
            assert!((offset.x.hypot(offset.z) - 0.45).abs() < 1e-5);
            let expected = i as f32 * TAU / 8.0;
            let actual = offset.z.atan2(offset.x).rem_euclid(TAU);
            assert!((actual - expected).abs() < 1e-4, "segment {i} at {actual}");
        }
    }

    proptest! {
        #[test]
        fn prop_hoops_mirror_each_other(x in 0.5f32..50.0) {
            let left = build_hoop(-x);
            let right = build_hoop(x);

            let left_points = all_points(&left);
            let right_points = all_points(&right);
            prop_assert_eq!(left_points.len(), right_points.len());
            for p in &left_points {
                let mirrored = mirror_x(*p);
                prop_assert!(
                    right_points.iter().any(|q| close(*q, mirrored)),
                    "no mirror for {:?}", p
                );
            }

            prop_assert_eq!(
                left.backboard.placement.rotation.y,
                -right.backboard.placement.rotation.y
            );
        }
    }
}
