//! The runnable exercises.
//!
//! Each owns its world, camera, and renderers. The studio calls `update` then
//! `draw` once per frame.

use orrery_engine::input::{InputFrame, Key};
use orrery_engine::paint::Color;
use orrery_engine::render::{RenderCtx, RenderTarget};
use orrery_engine::time::FrameTime;

use crate::animate::advance;
use crate::world::World;

mod quadrants;
mod solar_system;
mod sun_earth_moon;

pub use quadrants::{Quadrants, quadrant_fills};
pub use solar_system::{SolarSystem, UNITS_PER_SECOND};
pub use sun_earth_moon::SunEarthMoon;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExerciseControl {
    Continue,
    Exit,
}

pub trait Exercise {
    fn name(&self) -> &str;

    fn clear_color(&self) -> Color;

    /// Consumes this frame's input and advances the animation by `time.dt`.
    fn update(&mut self, time: FrameTime, input: &InputFrame) -> ExerciseControl;

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>);
}

/// `Escape` leaves every exercise.
pub(crate) fn control_for(input: &InputFrame) -> ExerciseControl {
    if input.pressed(Key::Escape) {
        ExerciseControl::Exit
    } else {
        ExerciseControl::Continue
    }
}

/// Pause (`Space`) and angle reset (`R`) for the animated exercises.
#[derive(Debug, Clone)]
pub(crate) struct Playback {
    paused: bool,
    initial: World,
}

impl Playback {
    pub(crate) fn new(world: &World) -> Self {
        Self {
            paused: false,
            initial: world.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn step(&mut self, world: &mut World, dt: f32, input: &InputFrame) {
        if input.pressed(Key::Space) {
            self.paused = !self.paused;
            log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
        }

        if input.pressed(Key::R) {
            // Rates stay as tuned; only the angles go back.
            for ((_, start), body) in self.initial.iter().zip(world.bodies_mut()) {
                body.spin_angle = start.spin_angle;
                body.orbit_angle = start.orbit_angle;
            }
            log::info!("angles reset");
        }

        if !self.paused {
            advance(world, dt);
        }
    }
}
