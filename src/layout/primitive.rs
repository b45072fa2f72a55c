//! Geometric primitives emitted by the layout builders

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::material::MaterialKey;

/// Shape of a primitive, in its local frame.
///
/// Line shapes carry world-space points and are placed with an identity
/// transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        top_radius: f32,
        bottom_radius: f32,
        height: f32,
    },
    Torus {
        major_radius: f32,
        tube_radius: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Closed polyline, last point connects back to the first
    PolylineLoop { points: Vec<Vec3> },
    /// Open polyline
    Polyline { points: Vec<Vec3> },
}

impl Shape {
    /// Two-point open polyline
    pub fn segment(from: Vec3, to: Vec3) -> Self {
        Shape::Polyline {
            points: vec![from, to],
        }
    }

    /// Whether this shape is drawn as lines rather than triangles
    pub fn is_line(&self) -> bool {
        matches!(self, Shape::PolylineLoop { .. } | Shape::Polyline { .. })
    }

    /// Line points, if this is a line shape
    pub fn line_points(&self) -> Option<&[Vec3]> {
        match self {
            Shape::PolylineLoop { points } | Shape::Polyline { points } => Some(points),
            _ => None,
        }
    }
}

/// Position and Euler XYZ rotation (radians)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-world transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.quat(), self.position)
    }
}

/// A placed shape with its material reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub shape: Shape,
    pub placement: Placement,
    pub material: MaterialKey,
}

impl Primitive {
    pub fn new(shape: Shape, placement: Placement, material: MaterialKey) -> Self {
        Self {
            shape,
            placement,
            material,
        }
    }

    /// World-space line primitive
    pub fn line(shape: Shape, material: MaterialKey) -> Self {
        Self::new(shape, Placement::default(), material)
    }

    /// Characteristic world points: line vertices, or the placement origin for meshes
    pub fn anchor_points(&self) -> Vec<Vec3> {
        match self.shape.line_points() {
            Some(points) => points.to_vec(),
            None => vec![self.placement.position],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_placement() {
        assert_eq!(Placement::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_quarter_turn_about_x_lays_xy_plane_flat() {
        let placement =
            Placement::at(Vec3::new(1.0, 2.0, 3.0)).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let m = placement.matrix();
        // +Y in the local frame ends up along +Z
        let p = m.transform_point3(Vec3::Y);
        assert!((p - Vec3::new(1.0, 2.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_line_anchor_points() {
        let seg = Primitive::line(Shape::segment(Vec3::ZERO, Vec3::X), MaterialKey::Net);
        assert_eq!(seg.anchor_points(), vec![Vec3::ZERO, Vec3::X]);
        assert!(seg.shape.is_line());
    }
}
