//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them lazily
//! on first use.
//!
//! - `mesh`: indexed meshes placed by per-draw model matrices (world space, y-up)
//! - `scissor`: solid fills clipped to logical-pixel rects (screen space, y-down)

mod common;
mod ctx;
pub mod mesh;
mod scissor;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshData, MeshDraw, MeshId, MeshRenderer, Shading, Topology};
pub use scissor::{ScissorFill, ScissorFillRenderer};
