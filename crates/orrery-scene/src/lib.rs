//! Orrery scene crate.
//!
//! Bodies and their world, the per-frame angle update and transform composition,
//! cameras, the render pass, rate tuning, JSON system descriptors, and the three
//! exercises built from them.

pub mod animate;
pub mod body;
pub mod camera;
pub mod descriptor;
pub mod exercise;
pub mod pass;
pub mod transform;
pub mod tuning;
pub mod world;

pub use animate::advance;
pub use body::{Axis, Body, BodyId, Material, TextureHandle};
pub use camera::{Camera, OrthoExtent, OrthographicParams, PerspectiveParams, Projection, ProjectionMode};
pub use descriptor::{BodyDescriptor, SystemDescriptor};
pub use exercise::{Exercise, ExerciseControl, Quadrants, SolarSystem, SunEarthMoon};
pub use pass::{DrawCall, GraphicsContext, MeshFrame, render_frame};
pub use transform::{orbital_placement, world_matrix};
pub use tuning::{RateTuner, TuneEvent};
pub use world::World;
