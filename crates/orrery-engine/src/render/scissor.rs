use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::paint::Color;
use crate::render::common::{grow_capacity, premul_alpha_blend};
use crate::render::{RenderCtx, RenderTarget};

/// A region filled with a solid color, clipped by a scissor rect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScissorFill {
    /// Region in logical pixels.
    pub rect: Rect,
    pub color: Color,
}

/// Fills scissor-clipped regions: a fullscreen triangle per region, limited by
/// `set_scissor_rect`. Regions are filled in slice order.
#[derive(Default)]
pub struct ScissorFillRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl ScissorFillRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, fills: &[ScissorFill]) {
        // Resolve scissors first; regions fully outside the surface are skipped.
        let visible: Vec<((u32, u32, u32, u32), FillInstance)> = fills
            .iter()
            .filter_map(|f| {
                let scissor = f.rect.to_scissor(ctx.scale_factor, ctx.surface_size)?;
                Some((scissor, FillInstance { color: f.color.to_array() }))
            })
            .collect();

        if visible.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_instance_capacity(ctx, visible.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        let raw: Vec<FillInstance> = visible.iter().map(|(_, inst)| *inst).collect();
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&raw));

        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let mut rpass = target.load_pass("orrery scissor fill pass", None);
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, instance_vbo.slice(..));

        for (i, ((sx, sy, sw, sh), _)) in visible.iter().enumerate() {
            let i = i as u32;
            rpass.set_scissor_rect(*sx, *sy, *sw, *sh);
            rpass.draw(0..3, i..i + 1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery scissor fill shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scissor_fill.wgsl").into()),
        });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("orrery scissor fill pipeline layout"),
                    bind_group_layouts: &[],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("orrery scissor fill pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[FillInstance::layout()],
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
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let capacity = grow_capacity(required, 8);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery scissor fill instance vbo"),
            size: (capacity * std::mem::size_of::<FillInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = capacity;
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillInstance {
    color: [f32; 4],
}

impl FillInstance {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FillInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
