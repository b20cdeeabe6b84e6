use std::f32::consts::{PI, TAU};

use anyhow::Result;
use glam::Vec3;

use orrery_engine::coords::Viewport;
use orrery_engine::input::InputFrame;
use orrery_engine::paint::Color;
use orrery_engine::render::mesh::geometry;
use orrery_engine::render::{RenderCtx, RenderTarget};
use orrery_engine::time::FrameTime;

use crate::body::{Body, Material};
use crate::camera::Camera;
use crate::pass::{Decoration, GraphicsContext, MeshFrame, render_frame_with};
use crate::world::World;

use super::{Exercise, ExerciseControl, Playback, control_for};

/// Flat Sun, Earth and Moon quads over red/green X/Y axes.
pub struct SunEarthMoon {
    world: World,
    camera: Camera,
    axes: [Decoration; 2],
    frame: MeshFrame,
    playback: Playback,
}

impl SunEarthMoon {
    pub fn new() -> Result<Self> {
        let mut frame = MeshFrame::new();
        let quad = frame.add_mesh(geometry::quad())?;
        let x_axis = frame.add_mesh(geometry::axis_line(Vec3::X))?;
        let y_axis = frame.add_mesh(geometry::axis_line(Vec3::Y))?;

        let mut world = World::new();
        world.add_body(
            Body::new("sun", quad, Material::Flat(Color::RED))
                .with_spin(PI / 4.0)
                .with_scale(Vec3::new(0.2, 0.2, 1.0)),
        )?;
        let earth = world.add_body(
            Body::new("earth", quad, Material::Flat(Color::CYAN))
                .with_orbit(0.7, PI / 6.0)
                .with_spin(PI)
                .with_scale(Vec3::new(0.1, 0.1, 1.0)),
        )?;
        world.add_body(
            Body::new("moon", quad, Material::Flat(Color::YELLOW))
                .with_parent(earth)
                .with_orbit(0.2, TAU)
                .with_spin(PI)
                .with_scale(Vec3::new(0.05, 0.05, 1.0)),
        )?;

        let playback = Playback::new(&world);
        Ok(Self {
            world,
            camera: Camera::flat(),
            axes: [
                Decoration { mesh: x_axis, color: Color::RED },
                Decoration { mesh: y_axis, color: Color::GREEN },
            ],
            frame,
            playback,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Issues this frame's draws into any graphics context.
    pub fn record<G>(&self, viewport: Viewport, gfx: &mut G)
    where
        G: GraphicsContext + ?Sized,
    {
        render_frame_with(&self.world, &self.camera, viewport, &self.axes, gfx);
    }
}

impl Exercise for SunEarthMoon {
    fn name(&self) -> &str {
        "sun-earth-moon"
    }

    fn clear_color(&self) -> Color {
        Color::rgb(0.2, 0.3, 0.4)
    }

    fn update(&mut self, time: FrameTime, input: &InputFrame) -> ExerciseControl {
        self.playback.step(&mut self.world, time.dt, input);
        control_for(input)
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        render_frame_with(&self.world, &self.camera, ctx.viewport, &self.axes, &mut self.frame);
        self.frame.flush(ctx, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::tests::{frame_time, pressed};
    use crate::pass::tests::RecordingContext;
    use crate::transform::world_matrix;
    use orrery_engine::input::Key;

    fn position(ex: &SunEarthMoon, name: &str) -> Vec3 {
        let id = ex.world().find(name).unwrap();
        world_matrix(ex.world(), id).transform_point3(Vec3::ZERO)
    }

    #[test]
    fn first_frame_leaves_bodies_at_start() {
        let mut ex = SunEarthMoon::new().unwrap();
        ex.update(frame_time(0.0, 0), &InputFrame::default());
        assert!(position(&ex, "earth").abs_diff_eq(Vec3::new(0.7, 0.0, 0.0), 1e-6));
        assert!(position(&ex, "moon").abs_diff_eq(Vec3::new(0.9, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn moon_stays_at_fixed_distance_from_earth() {
        let mut ex = SunEarthMoon::new().unwrap();
        for i in 0..50 {
            ex.update(frame_time(0.037, i), &InputFrame::default());
            let d = position(&ex, "moon").distance(position(&ex, "earth"));
            assert!((d - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn earth_completes_a_year_in_twelve_seconds() {
        let mut ex = SunEarthMoon::new().unwrap();
        ex.update(frame_time(12.0, 1), &InputFrame::default());
        assert!(position(&ex, "earth").abs_diff_eq(Vec3::new(0.7, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn axes_are_drawn_before_bodies() {
        let ex = SunEarthMoon::new().unwrap();
        let mut gfx = RecordingContext::default();
        ex.record(Viewport::new(700.0, 700.0), &mut gfx);

        let draws = gfx.draws();
        assert_eq!(draws.len(), 5);
        assert_eq!(draws[0].material, Material::Flat(Color::RED));
        assert_eq!(draws[1].material, Material::Flat(Color::GREEN));
        assert_eq!(draws[2].material, Material::Flat(Color::RED));
        assert_eq!(draws[3].material, Material::Flat(Color::CYAN));
        assert_eq!(draws[4].material, Material::Flat(Color::YELLOW));
    }

    #[test]
    fn pause_freezes_and_reset_restores() {
        let mut ex = SunEarthMoon::new().unwrap();
        ex.update(frame_time(1.0, 1), &InputFrame::default());
        let moved = position(&ex, "earth");

        ex.update(frame_time(1.0, 2), &pressed(&[Key::Space]));
        assert!(ex.playback.is_paused());
        assert!(position(&ex, "earth").abs_diff_eq(moved, 1e-6));

        ex.update(frame_time(1.0, 3), &pressed(&[Key::R]));
        assert!(position(&ex, "earth").abs_diff_eq(Vec3::new(0.7, 0.0, 0.0), 1e-6));
    }
}
