//! Orrery engine crate.
//!
//! Platform and GPU runtime pieces shared by the exercises: the winit loop,
//! the wgpu device, frame timing, keyboard input, and the mesh and scissor
//! renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
