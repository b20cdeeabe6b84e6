use anyhow::{Context, Result};

use orrery_engine::coords::Viewport;
use orrery_engine::input::{InputFrame, Key};
use orrery_engine::paint::Color;
use orrery_engine::render::mesh::geometry;
use orrery_engine::render::{RenderCtx, RenderTarget};
use orrery_engine::time::FrameTime;

use crate::camera::Camera;
use crate::descriptor::SystemDescriptor;
use crate::pass::{GraphicsContext, MeshFrame, render_frame};
use crate::tuning::RateTuner;
use crate::world::World;

use super::{Exercise, ExerciseControl, Playback, control_for};

/// Rad/s per tuning unit: descriptor rates are per-frame speeds at 60 Hz.
pub const UNITS_PER_SECOND: f32 = 60.0;

/// Sphere bodies orbiting in the XZ plane with a switchable camera.
pub struct SolarSystem {
    world: World,
    camera: Camera,
    tuner: RateTuner,
    frame: MeshFrame,
    playback: Playback,
}

impl SolarSystem {
    pub fn new(descriptor: &SystemDescriptor) -> Result<Self> {
        let mut frame = MeshFrame::new();
        let sphere = frame
            .add_mesh(geometry::uv_sphere(32, 16))
            .context("failed to build sphere mesh")?;
        let world = descriptor.build(sphere, UNITS_PER_SECOND)?;

        let playback = Playback::new(&world);
        Ok(Self {
            world,
            camera: Camera::solar_system(),
            tuner: RateTuner::new(UNITS_PER_SECOND)?,
            frame,
            playback,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Issues this frame's draws into any graphics context.
    pub fn record<G>(&self, viewport: Viewport, gfx: &mut G)
    where
        G: GraphicsContext + ?Sized,
    {
        render_frame(&self.world, &self.camera, viewport, gfx);
    }
}

impl Exercise for SolarSystem {
    fn name(&self) -> &str {
        "solar-system"
    }

    fn clear_color(&self) -> Color {
        Color::BLACK
    }

    fn update(&mut self, time: FrameTime, input: &InputFrame) -> ExerciseControl {
        if input.pressed(Key::C) {
            let mode = self.camera.toggle();
            log::info!("camera: {mode:?}");
        }

        self.tuner.handle(&mut self.world, input);
        self.playback.step(&mut self.world, time.dt, input);

        control_for(input)
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        render_frame(&self.world, &self.camera, ctx.viewport, &mut self.frame);
        self.frame.flush(ctx, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Material;
    use crate::camera::ProjectionMode;
    use crate::exercise::tests::{frame_time, held, pressed};
    use crate::pass::tests::RecordingContext;
    use crate::transform::world_matrix;
    use glam::Vec3;
    use orrery_engine::input::{InputEvent, KeyState};

    fn preset() -> SolarSystem {
        SolarSystem::new(&SystemDescriptor::solar_system().unwrap()).unwrap()
    }

    fn body_pos(ex: &SolarSystem, name: &str) -> Vec3 {
        let id = ex.world().find(name).unwrap();
        world_matrix(ex.world(), id).transform_point3(Vec3::ZERO)
    }

    #[test]
    fn planets_keep_their_orbit_radius() {
        let mut ex = preset();
        for i in 0..30 {
            ex.update(frame_time(1.0 / 60.0, i), &InputFrame::default());
        }
        for (name, d) in [("Mercury", 20.0), ("Venus", 35.0), ("Earth", 50.0), ("Mars", 65.0)] {
            let p = body_pos(&ex, name);
            assert!((p.length() - d).abs() < 1e-3, "{name}");
            assert!(p.y.abs() < 1e-4, "{name} left the XZ plane");
        }
        assert!(body_pos(&ex, "Sun").abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn one_second_advances_sixty_frames_of_speed() {
        let mut ex = preset();
        let id = ex.world().find("Mercury").unwrap();
        let start = ex.world().get(id).unwrap().orbit_angle;

        ex.update(frame_time(1.0, 1), &InputFrame::default());

        let end = ex.world().get(id).unwrap().orbit_angle;
        assert!((end - start - 0.02 * 60.0).abs() < 1e-5);
    }

    #[test]
    fn c_toggles_camera() {
        let mut ex = preset();
        ex.update(frame_time(0.0, 0), &pressed(&[Key::C]));
        assert_eq!(ex.camera().mode, ProjectionMode::Orthographic);
        ex.update(frame_time(0.0, 1), &pressed(&[Key::C]));
        assert_eq!(ex.camera().mode, ProjectionMode::Perspective);
    }

    #[test]
    fn holding_c_toggles_camera_once() {
        let mut ex = preset();
        let (mut state, mut frame) = held(Key::C, 0);
        ex.update(frame_time(0.0, 0), &frame);
        assert_eq!(ex.camera().mode, ProjectionMode::Orthographic);

        for i in 1..4 {
            frame.clear();
            state.apply_event(&mut frame, InputEvent::Key { key: Key::C, state: KeyState::Pressed, repeat: true });
            ex.update(frame_time(1.0 / 60.0, i), &frame);
            assert_eq!(ex.camera().mode, ProjectionMode::Orthographic);
        }
    }

    #[test]
    fn tuned_rate_is_used_on_the_same_frame() {
        let mut ex = preset();
        let earth = ex.world().find("Earth").unwrap();
        let before = ex.world().get(earth).unwrap().orbit_angle;

        // Earth is the third tunable body.
        ex.update(frame_time(1.0, 1), &pressed(&[Key::Digit3, Key::ArrowRight]));

        let b = ex.world().get(earth).unwrap();
        assert!((b.orbit_rate - 0.66).abs() < 1e-4);
        assert!((b.orbit_angle - before - 0.66).abs() < 1e-4);
    }

    #[test]
    fn textured_planets_record_fallback_materials() {
        let ex = preset();
        let mut gfx = RecordingContext::default();
        ex.record(Viewport::new(700.0, 700.0), &mut gfx);

        let draws = gfx.draws();
        assert_eq!(draws.len(), 5);
        assert_eq!(draws[0].material, Material::Flat(Color::from_hex(0xffff00)));
        assert!(draws[1..]
            .iter()
            .all(|d| matches!(d.material, Material::Textured { .. })));
    }
}
