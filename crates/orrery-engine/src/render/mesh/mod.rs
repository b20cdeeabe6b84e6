//! Indexed mesh rendering with per-draw model matrices.
//!
//! Meshes are registered once (CPU side) and uploaded lazily on the first frame.
//! Each frame the caller sets one view-projection, queues `MeshDraw`s, and calls
//! `MeshRenderer::render`. Every draw owns a slot in a dynamic-offset uniform buffer,
//! so one draw's uniforms can never leak into another's.
//!
//! Draws are issued in queue order against a depth buffer.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::paint::Color;

pub mod geometry;
mod renderer;

pub use renderer::MeshRenderer;

/// Handle to a mesh registered with a `MeshRenderer`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(pub(crate) u32);

impl MeshId {
    /// Rebuilds a handle from its raw index. Draws naming a mesh the renderer does
    /// not know are skipped.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x3  // normal
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
}

/// Static geometry for one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
    pub topology: Topology,
    /// Closed convex meshes (spheres) cull back faces; flat quads are two-sided.
    pub cull_back_faces: bool,
}

impl MeshData {
    /// Checks that indices reference existing vertices and form whole primitives.
    pub fn validate(&self) -> anyhow::Result<()> {
        let per_primitive = match self.topology {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        };
        anyhow::ensure!(!self.indices.is_empty(), "mesh has no indices");
        anyhow::ensure!(
            self.indices.len() % per_primitive == 0,
            "index count {} is not a multiple of {per_primitive}",
            self.indices.len()
        );
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= self.vertices.len()) {
            anyhow::bail!("index {bad} out of range for {} vertices", self.vertices.len());
        }
        Ok(())
    }
}

/// How a draw is lit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shading {
    /// Flat color.
    Unlit,
    /// Diffuse light from the world origin, never darker than `ambient`.
    Lit { ambient: f32 },
}

/// One queued draw: mesh + model matrix + per-draw uniforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshDraw {
    pub mesh: MeshId,
    pub model: Mat4,
    pub color: Color,
    pub shading: Shading,
}

/// GPU-side per-draw uniform block.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct DrawUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: lit flag (0/1), y: ambient floor, zw: padding.
    pub params: [f32; 4],
}

impl DrawUniform {
    pub(crate) fn new(view_proj: Mat4, draw: &MeshDraw) -> Self {
        let params = match draw.shading {
            Shading::Unlit => [0.0, 1.0, 0.0, 0.0],
            Shading::Lit { ambient } => [1.0, ambient.clamp(0.0, 1.0), 0.0, 0.0],
        };
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: draw.model.to_cols_array_2d(),
            color: draw.color.to_array(),
            params,
        }
    }
}

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth test shared by every mesh pipeline.
///
/// `LessEqual` lets a later draw at equal depth overwrite an earlier one, so flat
/// scenes resolve in queue order.
pub(crate) fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Uniform bytes for `draws`: slot `i` (at `i * stride`) belongs to `draws[i]`.
pub(crate) fn pack_draw_uniforms(view_proj: Mat4, draws: &[MeshDraw], stride: usize) -> Vec<u8> {
    let size = std::mem::size_of::<DrawUniform>();
    let mut bytes = vec![0u8; stride * draws.len()];
    for (slot, draw) in draws.iter().enumerate() {
        let u = DrawUniform::new(view_proj, draw);
        let start = slot * stride;
        bytes[start..start + size].copy_from_slice(bytemuck::bytes_of(&u));
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn draw_at(z: f32) -> MeshDraw {
        MeshDraw {
            mesh: MeshId(0),
            model: Mat4::from_translation(Vec3::new(0.0, 0.0, z)),
            color: Color::RED,
            shading: Shading::Unlit,
        }
    }

    #[test]
    fn uniform_slots_follow_queue_order() {
        let draws = [draw_at(5.0), draw_at(-5.0), draw_at(0.0)];
        let stride = 256;
        let bytes = pack_draw_uniforms(Mat4::IDENTITY, &draws, stride);
        assert_eq!(bytes.len(), 3 * stride);

        for (slot, z) in [5.0, -5.0, 0.0].into_iter().enumerate() {
            let start = slot * stride;
            let u: DrawUniform = bytemuck::pod_read_unaligned(
                &bytes[start..start + std::mem::size_of::<DrawUniform>()],
            );
            assert_eq!(u.model[3][2], z);
        }
    }

    #[test]
    fn equal_depth_lets_later_draws_win() {
        let state = depth_state();
        assert_eq!(state.format, wgpu::TextureFormat::Depth32Float);
        assert!(state.depth_write_enabled);
        assert_eq!(state.depth_compare, wgpu::CompareFunction::LessEqual);
    }

    #[test]
    fn uniform_layout_is_uniform_compatible() {
        // Two mat4 + two vec4, no implicit padding.
        assert_eq!(std::mem::size_of::<DrawUniform>(), 160);
    }

    #[test]
    fn uniform_encodes_shading() {
        let mut d = draw_at(0.0);
        assert_eq!(DrawUniform::new(Mat4::IDENTITY, &d).params[0], 0.0);
        d.shading = Shading::Lit { ambient: 0.3 };
        let u = DrawUniform::new(Mat4::IDENTITY, &d);
        assert_eq!(u.params[0], 1.0);
        assert!((u.params[1] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut q = geometry::quad();
        q.indices[2] = 9;
        assert!(q.validate().is_err());
    }

    #[test]
    fn validate_rejects_partial_primitive() {
        let mut l = geometry::axis_line(Vec3::Y);
        l.indices.push(0);
        assert!(l.validate().is_err());
    }
}
