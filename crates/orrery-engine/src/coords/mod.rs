//! Screen-space geometry shared by renderers and exercises.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! World-space maths (matrices, vectors) uses `glam` instead.

mod rect;
mod viewport;

pub use rect::Rect;
pub use viewport::Viewport;
