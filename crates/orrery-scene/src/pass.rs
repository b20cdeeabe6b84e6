//! Per-frame render pass over a `World`.
//!
//! Scene code talks to a `GraphicsContext`; the wgpu-backed `MeshFrame` is one
//! implementation and tests use a recording one. Every `DrawCall` carries its own
//! matrix and material, so nothing set for one body is visible to the next.

use anyhow::Result;
use glam::Mat4;

use orrery_engine::coords::Viewport;
use orrery_engine::paint::Color;
use orrery_engine::render::{
    MeshData, MeshDraw, MeshId, MeshRenderer, RenderCtx, RenderTarget, Shading,
};

use crate::body::Material;
use crate::camera::Camera;
use crate::transform::world_matrix;
use crate::world::World;

/// One draw with everything it needs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub model: Mat4,
    pub material: Material,
    pub shading: Shading,
}

/// Draw sink for one frame.
pub trait GraphicsContext {
    fn set_view_projection(&mut self, view_proj: Mat4);
    fn draw(&mut self, call: DrawCall);
}

/// Untransformed scene furniture (axes, guides) drawn before the bodies.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Decoration {
    pub mesh: MeshId,
    pub color: Color,
}

/// Sets the camera once, then draws every body in declaration order.
pub fn render_frame<G>(world: &World, camera: &Camera, viewport: Viewport, gfx: &mut G)
where
    G: GraphicsContext + ?Sized,
{
    render_frame_with(world, camera, viewport, &[], gfx);
}

/// `render_frame` with decorations drawn between the camera setup and the bodies.
pub fn render_frame_with<G>(
    world: &World,
    camera: &Camera,
    viewport: Viewport,
    decorations: &[Decoration],
    gfx: &mut G,
) where
    G: GraphicsContext + ?Sized,
{
    gfx.set_view_projection(camera.view_projection(viewport));
    draw_decorations(decorations, gfx);

    for (id, body) in world.iter() {
        gfx.draw(DrawCall {
            mesh: body.mesh,
            model: world_matrix(world, id),
            material: body.material,
            shading: body.shading,
        });
    }
}

/// Draws each decoration unlit with an identity model matrix.
pub fn draw_decorations<G>(decorations: &[Decoration], gfx: &mut G)
where
    G: GraphicsContext + ?Sized,
{
    for d in decorations {
        gfx.draw(DrawCall {
            mesh: d.mesh,
            model: Mat4::IDENTITY,
            material: Material::Flat(d.color),
            shading: Shading::Unlit,
        });
    }
}

/// `GraphicsContext` backed by the engine's `MeshRenderer`.
///
/// Textures are not sampled; textured materials draw their fallback color.
#[derive(Default)]
pub struct MeshFrame {
    renderer: MeshRenderer,
    warned_textured: bool,
}

impl MeshFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, data: MeshData) -> Result<MeshId> {
        self.renderer.add_mesh(data)
    }

    /// Submits everything drawn since the last flush.
    pub fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.renderer.render(ctx, target);
    }
}

impl GraphicsContext for MeshFrame {
    fn set_view_projection(&mut self, view_proj: Mat4) {
        self.renderer.set_view_projection(view_proj);
    }

    fn draw(&mut self, call: DrawCall) {
        if let Some(texture) = call.material.texture() {
            if !self.warned_textured {
                log::debug!("MeshFrame: texture {texture:?} not loaded; drawing fallback colors");
                self.warned_textured = true;
            }
        }

        self.renderer.queue(MeshDraw {
            mesh: call.mesh,
            model: call.model,
            color: call.material.base_color(),
            shading: call.shading,
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::body::Body;
    use glam::Vec3;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Recorded {
        ViewProjection(Mat4),
        Draw(DrawCall),
    }

    #[derive(Default)]
    pub(crate) struct RecordingContext {
        pub(crate) log: Vec<Recorded>,
    }

    impl RecordingContext {
        pub(crate) fn draws(&self) -> Vec<DrawCall> {
            self.log
                .iter()
                .filter_map(|r| match r {
                    Recorded::Draw(d) => Some(*d),
                    Recorded::ViewProjection(_) => None,
                })
                .collect()
        }
    }

    impl GraphicsContext for RecordingContext {
        fn set_view_projection(&mut self, view_proj: Mat4) {
            self.log.push(Recorded::ViewProjection(view_proj));
        }

        fn draw(&mut self, call: DrawCall) {
            self.log.push(Recorded::Draw(call));
        }
    }

    fn two_body_world() -> World {
        let mut w = World::new();
        let sun = w
            .add_body(Body::new("sun", MeshId::from_raw(0), Material::Flat(Color::RED)))
            .unwrap();
        w.add_body(
            Body::new("earth", MeshId::from_raw(1), Material::Flat(Color::CYAN))
                .with_parent(sun)
                .with_orbit(0.7, 0.0)
                .with_scale(Vec3::splat(0.1)),
        )
        .unwrap();
        w
    }

    #[test]
    fn view_projection_precedes_draws_in_declaration_order() {
        let w = two_body_world();
        let cam = Camera::flat();
        let mut gfx = RecordingContext::default();

        render_frame(&w, &cam, Viewport::new(700.0, 700.0), &mut gfx);

        assert_eq!(gfx.log.len(), 3);
        assert!(matches!(gfx.log[0], Recorded::ViewProjection(_)));
        let draws = gfx.draws();
        assert_eq!(draws[0].material, Material::Flat(Color::RED));
        assert_eq!(draws[1].material, Material::Flat(Color::CYAN));
    }

    #[test]
    fn each_draw_carries_its_own_world_matrix() {
        let w = two_body_world();
        let mut gfx = RecordingContext::default();
        render_frame(&w, &Camera::flat(), Viewport::new(700.0, 700.0), &mut gfx);

        let draws = gfx.draws();
        assert_eq!(draws[0].model, Mat4::IDENTITY);
        let earth_pos = draws[1].model.transform_point3(Vec3::ZERO);
        assert!(earth_pos.abs_diff_eq(Vec3::new(0.7, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn decorations_draw_first_with_identity_model() {
        let w = two_body_world();
        let axes = [
            Decoration { mesh: MeshId::from_raw(5), color: Color::RED },
            Decoration { mesh: MeshId::from_raw(6), color: Color::GREEN },
        ];
        let mut gfx = RecordingContext::default();
        render_frame_with(&w, &Camera::flat(), Viewport::new(700.0, 700.0), &axes, &mut gfx);

        let draws = gfx.draws();
        assert_eq!(draws.len(), 4);
        assert_eq!(draws[0].mesh, MeshId::from_raw(5));
        assert_eq!(draws[1].mesh, MeshId::from_raw(6));
        assert!(draws[..2].iter().all(|d| d.model == Mat4::IDENTITY && d.shading == Shading::Unlit));
    }

    #[test]
    fn empty_world_still_sets_camera() {
        let mut gfx = RecordingContext::default();
        render_frame(&World::new(), &Camera::flat(), Viewport::new(10.0, 10.0), &mut gfx);
        assert_eq!(gfx.log.len(), 1);
    }
}
