//! Tessellation of layout primitives into GPU-ready vertex/index lists
//!
//! Solids follow the usual Three.js generator conventions: boxes and spheres
//! centered on the origin, cylinders along +Y, tori in the XY plane.
//! Line shapes become line lists in world space.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;
use crate::layout::Shape;

const CYLINDER_RADIAL_SEGMENTS: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshTopology {
    Triangles,
    Lines,
}

#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: MeshTopology,
}

impl MeshData {
    fn triangles(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            topology: MeshTopology::Triangles,
        }
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            MeshTopology::Triangles => self.indices.len() / 3,
            MeshTopology::Lines => 0,
        }
    }
}

pub fn tessellate(shape: &Shape) -> MeshData {
    match shape {
        Shape::Box {
            width,
            height,
            depth,
        } => box_mesh(*width, *height, *depth),
        Shape::Cylinder {
            top_radius,
            bottom_radius,
            height,
        } => cylinder_mesh(*top_radius, *bottom_radius, *height, CYLINDER_RADIAL_SEGMENTS),
        Shape::Torus {
            major_radius,
            tube_radius,
            radial_segments,
            tubular_segments,
        } => torus_mesh(*major_radius, *tube_radius, *radial_segments, *tubular_segments),
        Shape::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere_mesh(*radius, *width_segments, *height_segments),
        Shape::Polyline { points } => line_mesh(points, false),
        Shape::PolylineLoop { points } => line_mesh(points, true),
    }
}

fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) / 2.0;
    // (normal, u axis, v axis) with u x v = normal so faces wind CCW from outside
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (s, t) in corners {
            let position = (normal + u * s + v * t) * half;
            let uv = [(s + 1.0) / 2.0, (1.0 - t) / 2.0];
            vertices.push(
                Vertex::new(position.to_array(), normal.to_array(), uv)
                    .with_tangent([u.x, u.y, u.z, 1.0]),
            );
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData::triangles(vertices, indices)
}

fn cylinder_mesh(top_radius: f32, bottom_radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let half_height = height / 2.0;
    let slope = (bottom_radius - top_radius) / height;
    let ring = radial_segments + 1;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side: row 0 at the top, row 1 at the bottom
    for row in 0..=1u32 {
        let v = row as f32;
        let radius = v * (bottom_radius - top_radius) + top_radius;
        for x in 0..=radial_segments {
            let u = x as f32 / radial_segments as f32;
            let theta = u * TAU;
            let (sin, cos) = theta.sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            vertices.push(
                Vertex::new(
                    [radius * sin, half_height - v * height, radius * cos],
                    normal.to_array(),
                    [u, v],
                )
                .with_tangent([cos, 0.0, -sin, 1.0]),
            );
        }
    }
    for x in 0..radial_segments {
        let a = x;
        let b = x + ring;
        let c = x + 1 + ring;
        let d = x + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    // Caps
    for (radius, y, ny) in [(top_radius, half_height, 1.0), (bottom_radius, -half_height, -1.0)] {
        if radius <= 0.0 {
            continue;
        }
        let center = vertices.len() as u32;
        vertices.push(Vertex::new([0.0, y, 0.0], [0.0, ny, 0.0], [0.5, 0.5]));
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vertex::new(
                [radius * sin, y, radius * cos],
                [0.0, ny, 0.0],
                [0.5 + 0.5 * sin, 0.5 + 0.5 * cos * ny],
            ));
        }
        for x in 0..radial_segments {
            if ny > 0.0 {
                indices.extend_from_slice(&[center, center + x + 1, center + x + 2]);
            } else {
                indices.extend_from_slice(&[center, center + x + 2, center + x + 1]);
            }
        }
    }

    MeshData::triangles(vertices, indices)
}

/// Torus around the Z axis, lying in the XY plane
fn torus_mesh(major_radius: f32, tube_radius: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);

    let mut vertices = Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);
    let mut indices = Vec::with_capacity((radial_segments * tubular_segments * 6) as usize);

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let (sin_u, cos_u) = u.sin_cos();

            let ring = major_radius + tube_radius * v.cos();
            let position = Vec3::new(ring * cos_u, ring * sin_u, tube_radius * v.sin());
            let center = Vec3::new(major_radius * cos_u, major_radius * sin_u, 0.0);
            let normal = (position - center).normalize_or_zero();

            vertices.push(
                Vertex::new(
                    position.to_array(),
                    normal.to_array(),
                    [
                        i as f32 / tubular_segments as f32,
                        j as f32 / radial_segments as f32,
                    ],
                )
                .with_tangent([-sin_u, cos_u, 0.0, 1.0]),
            );
        }
    }

    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData::triangles(vertices, indices)
}

fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let stride = width_segments + 1;

    let mut vertices = Vec::with_capacity((stride * (height_segments + 1)) as usize);
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let phi = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let theta = u * TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let normal = Vec3::new(-cos_theta * phi.sin(), phi.cos(), sin_theta * phi.sin());
            vertices.push(
                Vertex::new((normal * radius).to_array(), normal.to_array(), [u, v])
                    .with_tangent([sin_theta, 0.0, cos_theta, 1.0]),
            );
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData::triangles(vertices, indices)
}

fn line_mesh(points: &[Vec3], closed: bool) -> MeshData {
    let vertices: Vec<Vertex> = points.iter().map(|p| Vertex::line(p.to_array())).collect();
    let n = vertices.len() as u32;

    let mut indices = Vec::with_capacity(2 * vertices.len());
    for i in 1..n {
        indices.extend_from_slice(&[i - 1, i]);
    }
    if closed && n > 2 {
        indices.extend_from_slice(&[n - 1, 0]);
    }

    MeshData {
        vertices,
        indices,
        topology: MeshTopology::Lines,
    }
}
