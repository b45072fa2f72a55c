//! Circular arcs on the court plane
//!
//! An arc is defined in the XZ plane by:
//! - center (x, z) and radius
//! - start/end angle, swept counter-clockwise unless `clockwise` is set
//! - sample count and the height `y` the samples are lifted to
//!
//! Angles are measured from +X toward +Z, so `theta` maps to
//! `(cx + r cos θ, y, cz + r sin θ)`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::point_on_circle;

const SPAN_EPSILON: f32 = 1e-6;

/// A sampled circular arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcCurve {
    pub center_x: f32,
    pub center_z: f32,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
    pub samples: usize,
    pub y: f32,
}

impl ArcCurve {
    pub fn new(
        center_x: f32,
        center_z: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) -> Self {
        Self {
            center_x,
            center_z,
            radius,
            start_angle,
            end_angle,
            clockwise,
            samples: crate::consts::CURVE_SAMPLES,
            y: 0.0,
        }
    }

    /// Full counter-clockwise circle starting at angle 0
    pub fn circle(center_x: f32, center_z: f32, radius: f32) -> Self {
        Self::new(center_x, center_z, radius, 0.0, TAU, false)
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn at_height(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Signed sweep from start to end (negative when clockwise)
    pub fn angular_span(&self) -> f32 {
        let mut span = self.end_angle - self.start_angle;
        while span < 0.0 {
            span += TAU;
        }
        while span > TAU {
            span -= TAU;
        }

        // An exact full turn normalizes to 0 or TAU; keep it a full turn
        let same_points = span < SPAN_EPSILON;
        if same_points {
            span = if (self.end_angle - self.start_angle).abs() < SPAN_EPSILON {
                0.0
            } else {
                TAU
            };
        }

        if self.clockwise && !same_points {
            span = if (span - TAU).abs() < SPAN_EPSILON {
                -TAU
            } else {
                span - TAU
            };
        }
        span
    }

    /// Whether the sweep closes on itself
    pub fn is_full_turn(&self) -> bool {
        (self.angular_span().abs() - TAU).abs() < SPAN_EPSILON
    }

    /// Angle of the `i`-th sample
    ///
    /// Open arcs include both endpoints; a full turn stops one step short of
    /// its start so the loop has no duplicated point.
    pub fn angle_at(&self, i: usize) -> f32 {
        let divisions = if self.is_full_turn() {
            self.samples
        } else {
            self.samples.saturating_sub(1)
        }
        .max(1);
        let t = i as f32 / divisions as f32;
        self.start_angle + t * self.angular_span()
    }

    /// Lazily evaluated sample points; restartable by calling again
    pub fn points(&self) -> ArcPoints {
        ArcPoints {
            arc: *self,
            next: 0,
        }
    }

    /// Horizontal distance from the arc's center to `p`
    pub fn radial_distance(&self, p: Vec3) -> f32 {
        let dx = p.x - self.center_x;
        let dz = p.z - self.center_z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Iterator over the sample points of an [`ArcCurve`]
#[derive(Debug, Clone)]
pub struct ArcPoints {
    arc: ArcCurve,
    next: usize,
}

impl Iterator for ArcPoints {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.next >= self.arc.samples {
            return None;
        }
        let theta = self.arc.angle_at(self.next);
        self.next += 1;
        Some(point_on_circle(
            self.arc.center_x,
            self.arc.center_z,
            self.arc.radius,
            theta,
            self.arc.y,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.arc.samples.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcPoints {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_circle_has_no_duplicate_endpoint() {
        let circle = ArcCurve::circle(0.0, 0.0, 1.8).with_samples(64);
        let points: Vec<Vec3> = circle.points().collect();
        assert_eq!(points.len(), 64);
        assert!((points[0] - Vec3::new(1.8, 0.0, 0.0)).length() < 1e-5);
        // Last sample is one step before the start
        let last_theta = circle.angle_at(63);
        assert!((last_theta - TAU * 63.0 / 64.0).abs() < 1e-5);
    }

    #[test]
    fn test_open_arc_includes_both_endpoints() {
        let arc = ArcCurve::new(0.0, 0.0, 2.0, 0.0, PI / 2.0, false).with_samples(5);
        let points: Vec<Vec3> = arc.points().collect();
        assert_eq!(points.len(), 5);
        assert!((points[0] - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!((points[4] - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_clockwise_span_is_negative() {
        let arc = ArcCurve::new(0.0, 0.0, 1.0, 0.0, PI / 2.0, true);
        assert!((arc.angular_span() + 1.5 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_span_wraps_across_zero() {
        // -0.5 -> 0.5 counter-clockwise is a 1 radian sweep, not 2π - 1
        let arc = ArcCurve::new(0.0, 0.0, 1.0, -0.5, 0.5, false);
        assert!((arc.angular_span() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_points_are_restartable() {
        let arc = ArcCurve::new(3.0, -1.0, 2.0, 0.2, 1.4, false).at_height(0.5);
        let first: Vec<Vec3> = arc.points().collect();
        let second: Vec<Vec3> = arc.points().collect();
        assert_eq!(first, second);
        assert_eq!(arc.points().len(), arc.samples);
        for p in first {
            assert!((arc.radial_distance(p) - 2.0).abs() < 1e-4);
            assert_eq!(p.y, 0.5);
        }
    }
}
