//! WebGPU render pipeline for the court scene
//!
//! Every scene node is uploaded once at start-up. Each frame only the
//! camera/light uniform changes.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::mesh::{MeshTopology, tessellate};
use super::texture::{MapSet, create_sampler};
use super::vertex::Vertex;
use crate::controls::OrbitControls;
use crate::error::SceneError;
use crate::material::{ColorPolicy, Shading};
use crate::scene::{SceneGraph, SceneLighting, SceneNode};
#[cfg(target_arch = "wasm32")]
use crate::textures::BallMap;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ============================================================================
// GPU DATA STRUCTURES (must match scene_shader.wgsl)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    view_proj: [[f32; 4]; 4], // offset 0
    camera_pos: [f32; 4],     // offset 64
    light_dir: [f32; 4],      // offset 80
    light_color: [f32; 4],    // offset 96
    ambient: [f32; 4],        // offset 112
    tone: [f32; 4],           // offset 128: exposure, tone mapping flag
}

impl FrameUniform {
    pub fn new(
        controls: &OrbitControls,
        aspect: f32,
        lighting: &SceneLighting,
        policy: ColorPolicy,
        exposure: f32,
    ) -> Self {
        let eye = controls.eye();
        let to_light = lighting.directional.direction_to_light();
        let direct = lighting.directional.light.radiance();
        let ambient = lighting.ambient.radiance();
        Self {
            view_proj: controls.view_projection(aspect).to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            light_dir: [to_light.x, to_light.y, to_light.z, 0.0],
            light_color: [direct.r, direct.g, direct.b, 1.0],
            ambient: [ambient.r, ambient.g, ambient.b, 1.0],
            tone: [
                exposure,
                if policy.tone_mapping() { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct NodeUniform {
    model: [[f32; 4]; 4], // offset 0
    color: [f32; 4],      // offset 64: rgb + opacity
    params: [f32; 4],     // offset 80: shininess, metalness, roughness
    mode: [f32; 4],       // offset 96: shading mode, texture maps flag
}

impl NodeUniform {
    pub fn from_node(node: &SceneNode) -> Self {
        let material = &node.material;
        let params = match material.shading {
            Shading::Basic => [0.0; 4],
            Shading::Phong { shininess } => [shininess, 0.0, 0.0, 0.0],
            Shading::Standard {
                metalness,
                roughness,
            } => [0.0, metalness, roughness, 0.0],
        };
        let c = material.color;
        Self {
            model: node.primitive.placement.matrix().to_cols_array_2d(),
            color: [c.r, c.g, c.b, material.opacity],
            params,
            mode: [
                material.shading.mode() as f32,
                if material.uses_texture_maps() { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

/// Which pipeline a node is drawn with, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrawPass {
    Opaque,
    Lines,
    Transparent,
}

impl DrawPass {
    pub fn for_node(node: &SceneNode) -> Self {
        if node.primitive.shape.is_line() {
            DrawPass::Lines
        } else if node.material.is_transparent() {
            DrawPass::Transparent
        } else {
            DrawPass::Opaque
        }
    }
}

/// Storage format of the surface and the format frames are rendered through.
/// Browsers only offer non-sRGB canvas formats, so sRGB encoding comes from
/// an sRGB view of the plain storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFormats {
    pub surface: wgpu::TextureFormat,
    pub render: wgpu::TextureFormat,
}

impl SurfaceFormats {
    /// Extra view formats the surface must be configured with
    pub fn view_formats(&self) -> Vec<wgpu::TextureFormat> {
        if self.render == self.surface {
            vec![]
        } else {
            vec![self.render]
        }
    }
}

/// Pick the surface formats for a color policy: sRGB-encoding output when
/// linear colors are tone mapped, a plain format when colors pass through raw.
pub fn pick_surface_format(
    formats: &[wgpu::TextureFormat],
    policy: ColorPolicy,
) -> Option<SurfaceFormats> {
    let want_srgb = policy.srgb_output();
    let surface = formats
        .iter()
        .find(|f| f.is_srgb() == want_srgb)
        .or_else(|| formats.first())
        .copied()?;
    let render = if want_srgb {
        surface.add_srgb_suffix()
    } else {
        surface.remove_srgb_suffix()
    };
    Some(SurfaceFormats { surface, render })
}

struct GpuNode {
    pass: DrawPass,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    #[allow(dead_code)]
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uses_maps: bool,
}

// ============================================================================
// SCENE RENDERER
// ============================================================================

pub struct SceneRenderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_format: wgpu::TextureFormat,

    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    map_layout: wgpu::BindGroupLayout,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    sampler: wgpu::Sampler,
    default_maps: wgpu::BindGroup,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    ball_maps: MapSet,
    ball_bind_group: wgpu::BindGroup,

    depth_view: wgpu::TextureView,
    nodes: Vec<GpuNode>,

    lighting: SceneLighting,
    policy: ColorPolicy,
    exposure: f32,
    clear_color: wgpu::Color,

    pub size: (u32, u32),
}

impl SceneRenderer {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        scene: &SceneGraph,
        exposure: f32,
    ) -> Result<Self, SceneError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("court-scene-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let policy = scene.policy();
        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let formats = pick_surface_format(&surface_caps.formats, policy)
            .ok_or(SceneError::NoSurfaceFormat)?;
        log::info!(
            "Using surface format {:?} rendered as {:?} for color policy {}",
            formats.surface,
            formats.render,
            policy.as_str()
        );

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: formats.surface,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: formats.view_formats(),
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene_shader.wgsl").into()),
        });

        let uniform_entry = |visibility| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[uniform_entry(
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let node_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("node_bind_group_layout"),
            entries: &[uniform_entry(
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let map_layout = MapSet::layout(&device);

        let controls = OrbitControls::default();
        let aspect = config.width as f32 / config.height as f32;
        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame"),
            contents: bytemuck::bytes_of(&FrameUniform::new(
                &controls,
                aspect,
                &scene.lighting,
                policy,
                exposure,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let sampler = create_sampler(&device);
        let default_maps = MapSet::placeholders(&device, &queue, policy).bind_group(
            &device,
            &map_layout,
            &sampler,
            "default_maps",
        );
        let ball_maps = MapSet::placeholders(&device, &queue, policy);
        let ball_bind_group = ball_maps.bind_group(&device, &map_layout, &sampler, "ball_maps");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &node_layout, &map_layout],
            immediate_size: 0,
        });

        let make_pipeline = |label: &str,
                             topology: wgpu::PrimitiveTopology,
                             blend: Option<wgpu::BlendState>,
                             depth_write_enabled: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: formats.render,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let opaque_pipeline = make_pipeline(
            "opaque_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::BlendState::REPLACE),
            true,
        );
        // Drawn last without depth writes so the backboard never hides the rim behind it
        let transparent_pipeline = make_pipeline(
            "transparent_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );
        let line_pipeline = make_pipeline(
            "line_pipeline",
            wgpu::PrimitiveTopology::LineList,
            Some(wgpu::BlendState::REPLACE),
            true,
        );

        let depth_view = create_depth_view(&device, config.width, config.height);

        let mut nodes: Vec<GpuNode> = scene
            .nodes()
            .iter()
            .map(|node| upload_node(&device, &node_layout, node))
            .collect();
        // Stable sort keeps construction order within each pass
        nodes.sort_by_key(|n| n.pass);
        log::info!("Uploaded {} scene nodes", nodes.len());

        let bg = scene.lighting.background;
        let clear_color = wgpu::Color {
            r: bg.r as f64,
            g: bg.g as f64,
            b: bg.b as f64,
            a: 1.0,
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_format: formats.render,
            opaque_pipeline,
            transparent_pipeline,
            line_pipeline,
            frame_buffer,
            frame_bind_group,
            map_layout,
            sampler,
            default_maps,
            ball_maps,
            ball_bind_group,
            depth_view,
            nodes,
            lighting: scene.lighting,
            policy,
            exposure,
            clear_color,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, new_width, new_height);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Swap a loaded image into the ball's map set
    #[cfg(target_arch = "wasm32")]
    pub fn upload_ball_map(&mut self, map: BallMap, image: &web_sys::HtmlImageElement) {
        let texture = super::texture::MapTexture::from_image(
            &self.device,
            &self.queue,
            map,
            self.policy,
            image,
        );
        self.ball_maps.replace(map, texture);
        self.ball_bind_group =
            self.ball_maps
                .bind_group(&self.device, &self.map_layout, &self.sampler, "ball_maps");
        log::debug!("{} map bound to ball", map.label());
    }

    pub fn render(&mut self, controls: &OrbitControls) -> Result<(), wgpu::SurfaceError> {
        let frame = FrameUniform::new(
            controls,
            self.aspect(),
            &self.lighting,
            self.policy,
            self.exposure,
        );
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.render_format),
            ..Default::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            let mut current: Option<DrawPass> = None;
            for node in &self.nodes {
                if current != Some(node.pass) {
                    render_pass.set_pipeline(match node.pass {
                        DrawPass::Opaque => &self.opaque_pipeline,
                        DrawPass::Lines => &self.line_pipeline,
                        DrawPass::Transparent => &self.transparent_pipeline,
                    });
                    current = Some(node.pass);
                }
                let maps = if node.uses_maps {
                    &self.ball_bind_group
                } else {
                    &self.default_maps
                };
                render_pass.set_bind_group(1, &node.bind_group, &[]);
                render_pass.set_bind_group(2, maps, &[]);
                render_pass.set_vertex_buffer(0, node.vertex_buffer.slice(..));
                render_pass.set_index_buffer(node.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..node.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_node(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, node: &SceneNode) -> GpuNode {
    let mesh = tessellate(&node.primitive.shape);
    debug_assert_eq!(mesh.topology == MeshTopology::Lines, node.primitive.shape.is_line());

    let label = format!("node_{}", node.handle.0);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&label),
        contents: bytemuck::bytes_of(&NodeUniform::from_node(node)),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    GpuNode {
        pass: DrawPass::for_node(node),
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
        uniform_buffer,
        bind_group,
        uses_maps: node.material.uses_texture_maps(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CourtLayout;
    use crate::material::MaterialKey;
    use glam::{Mat4, Vec3};
    use wgpu::TextureFormat;

    fn court_scene(policy: ColorPolicy) -> SceneGraph {
        let mut scene = SceneGraph::new(policy);
        CourtLayout::build().register(&mut scene);
        scene
    }

    #[test]
    fn test_uniform_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 144);
        assert_eq!(std::mem::size_of::<NodeUniform>(), 112);
    }

    #[test]
    fn test_surface_format_follows_policy() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        let pbr = pick_surface_format(&formats, ColorPolicy::LinearizedForPbr).unwrap();
        assert_eq!(pbr.surface, TextureFormat::Bgra8UnormSrgb);
        assert_eq!(pbr.render, TextureFormat::Bgra8UnormSrgb);
        assert!(pbr.view_formats().is_empty());

        let raw = pick_surface_format(&formats, ColorPolicy::Raw).unwrap();
        assert_eq!(raw.surface, TextureFormat::Bgra8Unorm);
        assert_eq!(raw.render, TextureFormat::Bgra8Unorm);

        // Raw colors never go through an sRGB encode, even on an sRGB-only surface
        let srgb_only = pick_surface_format(&[TextureFormat::Rgba8UnormSrgb], ColorPolicy::Raw).unwrap();
        assert_eq!(srgb_only.surface, TextureFormat::Rgba8UnormSrgb);
        assert_eq!(srgb_only.render, TextureFormat::Rgba8Unorm);
        assert_eq!(srgb_only.view_formats(), vec![TextureFormat::Rgba8Unorm]);

        assert_eq!(pick_surface_format(&[], ColorPolicy::Raw), None);
    }

    #[test]
    fn test_browser_canvas_formats_get_srgb_view() {
        // What WebGPU canvases report: no sRGB storage formats at all
        let canvas = [
            TextureFormat::Bgra8Unorm,
            TextureFormat::Rgba8Unorm,
            TextureFormat::Rgba16Float,
        ];
        let pbr = pick_surface_format(&canvas, ColorPolicy::LinearizedForPbr).unwrap();
        assert_eq!(pbr.surface, TextureFormat::Bgra8Unorm);
        assert!(pbr.render.is_srgb());
        assert_eq!(pbr.render, TextureFormat::Bgra8UnormSrgb);
        assert_eq!(pbr.view_formats(), vec![TextureFormat::Bgra8UnormSrgb]);

        let raw = pick_surface_format(&canvas, ColorPolicy::Raw).unwrap();
        assert!(!raw.render.is_srgb());
        assert!(raw.view_formats().is_empty());
    }

    #[test]
    fn test_draw_passes() {
        let scene = court_scene(ColorPolicy::LinearizedForPbr);
        let transparent: Vec<MaterialKey> = scene
            .nodes()
            .iter()
            .filter(|n| DrawPass::for_node(n) == DrawPass::Transparent)
            .map(|n| n.primitive.material)
            .collect();
        assert_eq!(transparent, vec![MaterialKey::Backboard; 2]);

        for node in scene.nodes() {
            if node.primitive.shape.is_line() {
                assert_eq!(DrawPass::for_node(node), DrawPass::Lines);
            }
        }
        assert!(DrawPass::Opaque < DrawPass::Lines && DrawPass::Lines < DrawPass::Transparent);
    }

    #[test]
    fn test_node_uniform_flags_only_ball_maps() {
        let scene = court_scene(ColorPolicy::Raw);
        for node in scene.nodes() {
            let uniform = NodeUniform::from_node(node);
            let textured = uniform.mode[1] > 0.5;
            assert_eq!(textured, node.primitive.material == MaterialKey::Ball);
            assert_eq!(uniform.mode[0], node.material.shading.mode() as f32);
            assert_eq!(uniform.color[3], node.material.opacity);
            assert_eq!(
                Mat4::from_cols_array_2d(&uniform.model),
                node.primitive.placement.matrix()
            );
        }
    }

    #[test]
    fn test_frame_uniform_tone_mapping_flag() {
        let scene = court_scene(ColorPolicy::Raw);
        let controls = OrbitControls::default();
        let raw = FrameUniform::new(&controls, 1.5, &scene.lighting, ColorPolicy::Raw, 1.2);
        let pbr = FrameUniform::new(
            &controls,
            1.5,
            &scene.lighting,
            ColorPolicy::LinearizedForPbr,
            1.2,
        );
        assert_eq!(raw.tone, [1.2, 0.0, 0.0, 0.0]);
        assert_eq!(pbr.tone, [1.2, 1.0, 0.0, 0.0]);
        let eye = Vec3::new(raw.camera_pos[0], raw.camera_pos[1], raw.camera_pos[2]);
        assert!((eye - Vec3::new(0.0, 15.0, 30.0)).length() < 1e-3);
        let dir = Vec3::new(raw.light_dir[0], raw.light_dir[1], raw.light_dir[2]);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }
}
