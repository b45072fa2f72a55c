//! Retained scene graph
//!
//! Nodes are only ever added; the court is built once and lives for the
//! whole session.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::layout::Primitive;
use crate::material::{Color, ColorPolicy, Material, Palette, colors};

/// Stable reference to a node in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub u32);

/// Anything primitives can be registered into
pub trait SceneSink {
    fn add_primitive(&mut self, primitive: Primitive) -> NodeHandle;
}

/// A primitive with its material resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub handle: NodeHandle,
    pub primitive: Primitive,
    pub material: Material,
}

/// A light's color and intensity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    /// Color premultiplied by intensity
    pub fn radiance(&self) -> Color {
        self.color.scaled(self.intensity)
    }
}

/// Directional light shining from `position` toward the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionalLight {
    pub light: Light,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector from the lit surface toward the light
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

/// Background and lights of the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneLighting {
    pub background: Color,
    pub ambient: Light,
    pub directional: DirectionalLight,
}

const AMBIENT_INTENSITY: f32 = 0.5;
const DIRECTIONAL_INTENSITY: f32 = 0.8;
const DIRECTIONAL_POSITION: Vec3 = Vec3::new(10.0, 20.0, 15.0);

impl SceneLighting {
    pub fn new(palette: &Palette) -> Self {
        Self {
            background: palette.color(colors::BACKGROUND),
            ambient: Light {
                color: Color::WHITE,
                intensity: AMBIENT_INTENSITY,
            },
            directional: DirectionalLight {
                light: Light {
                    color: Color::WHITE,
                    intensity: DIRECTIONAL_INTENSITY,
                },
                position: DIRECTIONAL_POSITION,
            },
        }
    }
}

/// Retained list of scene nodes plus lighting
#[derive(Debug, Clone)]
pub struct SceneGraph {
    palette: Palette,
    nodes: Vec<SceneNode>,
    pub lighting: SceneLighting,
}

impl SceneGraph {
    pub fn new(policy: ColorPolicy) -> Self {
        let palette = Palette::new(policy);
        Self {
            palette,
            nodes: Vec::new(),
            lighting: SceneLighting::new(&palette),
        }
    }

    pub fn policy(&self) -> ColorPolicy {
        self.palette.policy()
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneSink for SceneGraph {
    fn add_primitive(&mut self, primitive: Primitive) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u32);
        let material = self.palette.resolve(primitive.material);
        self.nodes.push(SceneNode {
            handle,
            primitive,
            material,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CourtLayout;
    use crate::material::MaterialKey;

    #[test]
    fn test_register_layout() {
        let layout = CourtLayout::build();
        let mut scene = SceneGraph::new(ColorPolicy::Raw);
        let handles = layout.register(&mut scene);

        assert_eq!(handles.len(), layout.primitive_count());
        assert_eq!(scene.len(), handles.len());
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(handle.0 as usize, i);
        }
        for (node, primitive) in scene.nodes().iter().zip(layout.primitives()) {
            assert_eq!(&node.primitive, primitive);
        }
    }

    #[test]
    fn test_nodes_resolve_materials_under_policy() {
        let mut scene = SceneGraph::new(ColorPolicy::LinearizedForPbr);
        let handle = scene.add_primitive(crate::layout::build_court_slab());
        let node = scene.get(handle).unwrap();
        let expected = Palette::new(ColorPolicy::LinearizedForPbr).resolve(MaterialKey::CourtFloor);
        assert_eq!(node.material, expected);
        assert!(scene.get(NodeHandle(99)).is_none());
    }

    #[test]
    fn test_lighting_defaults() {
        let scene = SceneGraph::new(ColorPolicy::default());
        let lighting = scene.lighting;
        assert_eq!(lighting.background, Color::BLACK);
        assert_eq!(lighting.ambient.intensity, 0.5);
        assert_eq!(lighting.directional.light.intensity, 0.8);
        let dir = lighting.directional.direction_to_light();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.y > 0.0);
    }
}
