use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::render::common::{align_to, binding_size, grow_capacity, premul_alpha_blend};
use crate::render::{RenderCtx, RenderTarget};

use super::{
    DEPTH_FORMAT, DrawUniform, MeshData, MeshDraw, MeshId, MeshVertex, Topology, depth_state,
    pack_draw_uniforms,
};

/// Mesh renderer.
///
/// Owns registered meshes, their GPU buffers, the per-draw uniform buffer and a
/// depth texture matching the surface. All GPU objects are created lazily and rebuilt
/// when the surface format (or, for depth, the surface size) changes.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: Option<Pipelines>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    draw_ubo: Option<wgpu::Buffer>,
    draw_capacity: usize,
    draw_stride: u64,

    meshes: Vec<MeshSlot>,
    depth: Option<DepthTarget>,

    view_proj: Mat4,
    queued: Vec<MeshDraw>,

    warned_unknown_mesh: bool,
}

struct Pipelines {
    triangles: wgpu::RenderPipeline,
    triangles_culled: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
}

impl Pipelines {
    fn for_mesh(&self, topology: Topology, cull_back_faces: bool) -> &wgpu::RenderPipeline {
        match (topology, cull_back_faces) {
            (Topology::Lines, _) => &self.lines,
            (Topology::Triangles, true) => &self.triangles_culled,
            (Topology::Triangles, false) => &self.triangles,
        }
    }
}

struct DepthTarget {
    size: (u32, u32),
    // Held so the view's texture lives as long as the slot.
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct MeshSlot {
    data: MeshData,
    gpu: Option<GpuMesh>,
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mesh; its buffers are uploaded on the next `render`.
    pub fn add_mesh(&mut self, data: MeshData) -> anyhow::Result<MeshId> {
        data.validate()?;
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(MeshSlot { data, gpu: None });
        Ok(id)
    }

    /// Sets the camera transform shared by every draw of the current frame.
    pub fn set_view_projection(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
    }

    pub fn queue(&mut self, draw: MeshDraw) {
        self.queued.push(draw);
    }

    /// Draws every queued mesh into `target` and clears the queue.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let mut draws = std::mem::take(&mut self.queued);

        let known = self.meshes.len();
        let before = draws.len();
        draws.retain(|d| (d.mesh.0 as usize) < known);
        if draws.len() != before && !self.warned_unknown_mesh {
            log::debug!("MeshRenderer: draw with unregistered mesh skipped");
            self.warned_unknown_mesh = true;
        }

        if draws.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_meshes(ctx);
        self.ensure_draw_capacity(ctx, draws.len());
        self.ensure_depth(ctx);

        self.write_draw_uniforms(ctx, &draws);

        let Some(pipelines) = self.pipelines.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(depth) = self.depth.as_ref() else { return };

        let mut rpass = target.load_pass("orrery mesh pass", Some(&depth.view));

        for (slot, draw) in draws.iter().enumerate() {
            let mesh = &self.meshes[draw.mesh.0 as usize];
            let Some(gpu) = mesh.gpu.as_ref() else { continue };

            let offset = (slot as u64 * self.draw_stride) as u32;
            rpass.set_pipeline(pipelines.for_mesh(mesh.data.topology, mesh.data.cull_back_faces));
            rpass.set_bind_group(0, bind_group, &[offset]);
            rpass.set_vertex_buffer(0, gpu.vbo.slice(..));
            rpass.set_index_buffer(gpu.ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..gpu.index_count, 0, 0..1);
        }
    }

    fn write_draw_uniforms(&self, ctx: &RenderCtx<'_>, draws: &[MeshDraw]) {
        let Some(ubo) = self.draw_ubo.as_ref() else { return };
        let bytes = pack_draw_uniforms(self.view_proj, draws, self.draw_stride as usize);
        ctx.queue.write_buffer(ubo, 0, &bytes);
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>) {
        let size = (ctx.surface_size.0.max(1), ctx.surface_size.1.max(1));
        if self.depth.as_ref().is_some_and(|d| d.size == size) {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("orrery mesh depth"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!("mesh depth target {}x{}", size.0, size.1);
        self.depth = Some(DepthTarget { size, _texture: texture, view });
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipelines.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("orrery mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: true,
                            min_binding_size: binding_size::<DrawUniform>(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("orrery mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let build = |label: &'static str,
                     topology: wgpu::PrimitiveTopology,
                     cull_mode: Option<wgpu::Face>| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[MeshVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(depth_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let pipelines = Pipelines {
            triangles: build(
                "orrery mesh pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                None,
            ),
            triangles_culled: build(
                "orrery mesh pipeline (culled)",
                wgpu::PrimitiveTopology::TriangleList,
                Some(wgpu::Face::Back),
            ),
            lines: build("orrery line pipeline", wgpu::PrimitiveTopology::LineList, None),
        };

        log::debug!("mesh pipelines built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipelines = Some(pipelines);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings depend on the layout; rebuild them too.
        self.bind_group = None;
        self.draw_ubo = None;
        self.draw_capacity = 0;
    }

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        for (i, slot) in self.meshes.iter_mut().enumerate() {
            if slot.gpu.is_some() {
                continue;
            }

            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("orrery mesh vbo"),
                contents: bytemuck::cast_slice(&slot.data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            // Index buffer writes must be 4-byte aligned; pad odd u16 counts.
            let mut indices = slot.data.indices.clone();
            if indices.len() % 2 == 1 {
                indices.push(0);
            }
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("orrery mesh ibo"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            log::debug!(
                "uploaded mesh {i}: {} vertices, {} indices",
                slot.data.vertices.len(),
                slot.data.indices.len()
            );

            slot.gpu = Some(GpuMesh {
                vbo,
                ibo,
                index_count: slot.data.indices.len() as u32,
            });
        }
    }

    fn ensure_draw_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.draw_capacity && self.draw_ubo.is_some() && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_to(std::mem::size_of::<DrawUniform>() as u64, alignment);
        let capacity = grow_capacity(required, 16);

        let draw_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery mesh draw ubo"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_ubo,
                    offset: 0,
                    size: binding_size::<DrawUniform>(),
                }),
            }],
        });

        self.draw_ubo = Some(draw_ubo);
        self.bind_group = Some(bind_group);
        self.draw_capacity = capacity;
        self.draw_stride = stride;
    }
}
