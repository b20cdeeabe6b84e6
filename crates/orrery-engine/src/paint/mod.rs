//! Color model shared by renderers and scenes (linear, premultiplied alpha).

mod color;

pub use color::Color;
