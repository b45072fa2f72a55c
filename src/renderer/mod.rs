//! WebGPU rendering module
//!
//! Tessellates scene nodes once, then draws them with a depth-tested
//! forward pass: opaque solids, lines, then the translucent backboards.

pub mod mesh;
pub mod pipeline;
pub mod texture;
pub mod vertex;

pub use mesh::{MeshData, MeshTopology, tessellate};
pub use pipeline::{DrawPass, SceneRenderer, SurfaceFormats, pick_surface_format};
pub use vertex::Vertex;
