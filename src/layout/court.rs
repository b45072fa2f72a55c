//! Court surface and line markings

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::arc::ArcCurve;
use super::primitive::{Placement, Primitive, Shape};
use crate::consts::*;
use crate::facing_direction;
use crate::material::MaterialKey;

/// The wooden court slab, centered at the origin
pub fn build_court_slab() -> Primitive {
    Primitive::new(
        Shape::Box {
            width: COURT_LENGTH,
            height: COURT_THICKNESS,
            depth: COURT_WIDTH,
        },
        Placement::at(Vec3::ZERO),
        MaterialKey::CourtFloor,
    )
}

/// Center line across the court width and the center circle
pub fn build_center_markings() -> [Primitive; 2] {
    let half_width = COURT_WIDTH / 2.0;
    let center_line = Primitive::line(
        Shape::segment(
            Vec3::new(0.0, CENTER_MARKING_Y, -half_width),
            Vec3::new(0.0, CENTER_MARKING_Y, half_width),
        ),
        MaterialKey::LineMarking,
    );

    let circle = ArcCurve::circle(0.0, 0.0, CENTER_CIRCLE_RADIUS)
        .with_samples(CURVE_SAMPLES)
        .at_height(CENTER_MARKING_Y);
    let center_circle = Primitive::line(
        Shape::PolylineLoop {
            points: circle.points().collect(),
        },
        MaterialKey::LineMarking,
    );

    [center_line, center_circle]
}

/// One three-point marking: the arc plus its two straight side lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreePointLine {
    pub arc: ArcCurve,
    pub arc_line: Primitive,
    pub sides: [Primitive; 2],
}

impl ThreePointLine {
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        std::iter::once(&self.arc_line).chain(self.sides.iter())
    }
}

/// Half-angle where the straight side lines meet the arc
pub fn three_point_angle() -> f32 {
    (THREE_POINT_SIDE_OFFSET / THREE_POINT_RADIUS).acos()
}

/// Build the three-point marking for the baseline at `x_offset`.
///
/// The arc is centered at `(-x_offset, 0)` and bulges toward center court;
/// the side lines run from the baseline at `x_offset` to `z = ±side offset`.
pub fn build_three_point_line(x_offset: f32) -> ThreePointLine {
    let direction = facing_direction(x_offset);
    let angle = three_point_angle();

    let (start, end) = if direction < 0.0 {
        (-angle, angle)
    } else {
        (PI - angle, PI + angle)
    };
    let arc = ArcCurve::new(-x_offset, 0.0, THREE_POINT_RADIUS, start, end, false)
        .with_samples(CURVE_SAMPLES)
        .at_height(THREE_POINT_Y);
    let arc_line = Primitive::line(
        Shape::Polyline {
            points: arc.points().collect(),
        },
        MaterialKey::LineMarking,
    );

    let arc_x = x_offset + direction * THREE_POINT_RADIUS * angle.cos();
    let near_side = Primitive::line(
        Shape::segment(
            Vec3::new(x_offset, THREE_POINT_Y, -THREE_POINT_SIDE_OFFSET),
            Vec3::new(arc_x, THREE_POINT_Y, -THREE_POINT_SIDE_OFFSET),
        ),
        MaterialKey::LineMarking,
    );
    let far_side = Primitive::line(
        Shape::segment(
            Vec3::new(arc_x, THREE_POINT_Y, THREE_POINT_SIDE_OFFSET),
            Vec3::new(x_offset, THREE_POINT_Y, THREE_POINT_SIDE_OFFSET),
        ),
        MaterialKey::LineMarking,
    );

    ThreePointLine {
        arc,
        arc_line,
        sides: [near_side, far_side],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror_x;
    use proptest::prelude::*;

    fn marking_points(line: &ThreePointLine) -> Vec<Vec3> {
        line.primitives().flat_map(|p| p.anchor_points()).collect()
    }

    #[test]
    fn test_court_slab_is_fixed_box() {
        let slab = build_court_slab();
        assert_eq!(
            slab.shape,
            Shape::Box {
                width: 30.0,
                height: 0.2,
                depth: 15.0
            }
        );
        assert_eq!(slab.placement.position, Vec3::ZERO);
        assert_eq!(slab.placement.rotation, Vec3::ZERO);
        assert_eq!(slab, build_court_slab());
    }

    #[test]
    fn test_center_markings() {
        let [line, circle] = build_center_markings();
        assert_eq!(
            line.shape.line_points().unwrap(),
            &[Vec3::new(0.0, 0.11, -7.5), Vec3::new(0.0, 0.11, 7.5)]
        );

        let Shape::PolylineLoop { points } = &circle.shape else {
            panic!("center circle should be a closed loop");
        };
        assert_eq!(points.len(), 64);
        for (i, p) in points.iter().enumerate() {
            assert!((p.x.hypot(p.z) - 1.8).abs() < 1e-4, "point {i} off radius");
            assert_eq!(p.y, 0.11);
        }
        // 64 evenly spaced angles starting at 0
        let step = std::f32::consts::TAU / 64.0;
        assert!((points[1].z.atan2(points[1].x) - step).abs() < 1e-4);
    }

    #[test]
    fn test_three_point_line_left_side() {
        let line = build_three_point_line(-15.0);
        let angle = three_point_angle();
        assert!((angle - 0.8006).abs() < 1e-3);
        assert_eq!(line.primitives().count(), 3);

        let [near, far] = &line.sides;
        let near = near.shape.line_points().unwrap();
        let far = far.shape.line_points().unwrap();
        assert!((near[0] - Vec3::new(-15.0, 0.201, -4.7)).length() < 1e-5);
        assert!((near[1] - Vec3::new(-10.3, 0.201, -4.7)).length() < 1e-4);
        assert!((far[0] - Vec3::new(-10.3, 0.201, 4.7)).length() < 1e-4);
        assert!((far[1] - Vec3::new(-15.0, 0.201, 4.7)).length() < 1e-5);
    }

    #[test]
    fn test_three_point_arc_bulges_toward_center() {
        // Arc for the left call is centered on the opposite baseline
        let line = build_three_point_line(-15.0);
        assert_eq!(line.arc.center_x, 15.0);
        let points = line.arc_line.shape.line_points().unwrap();
        let apex = points[points.len() / 2];
        assert!(apex.x < 15.0 && apex.x > 0.0);

        let right = build_three_point_line(15.0);
        assert_eq!(right.arc.center_x, -15.0);
        let points = right.arc_line.shape.line_points().unwrap();
        let apex = points[points.len() / 2];
        assert!(apex.x > -15.0 && apex.x < 0.0);
    }

    proptest! {
        #[test]
        fn prop_three_point_arc_on_radius(x_offset in -40.0f32..40.0) {
            let line = build_three_point_line(x_offset);
            let points = line.arc_line.shape.line_points().unwrap();
            prop_assert_eq!(points.len(), 64);
            for p in points {
                let dx = p.x - (-x_offset);
                let d = (dx * dx + p.z * p.z).sqrt();
                prop_assert!((d - 6.75).abs() < 1e-3);
                prop_assert_eq!(p.y, 0.201);
            }
        }

        #[test]
        fn prop_three_point_lines_mirror_each_other(x in 0.5f32..40.0) {
            let left = marking_points(&build_three_point_line(-x));
            let right = marking_points(&build_three_point_line(x));
            prop_assert_eq!(left.len(), right.len());
            for p in &left {
                let mirrored = mirror_x(*p);
                prop_assert!(
                    right.iter().any(|q| (*q - mirrored).length() < 1e-3),
                    "no mirror for {:?}", p
                );
            }
        }
    }
}
