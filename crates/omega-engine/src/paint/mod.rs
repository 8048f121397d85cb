//! Color model shared by the scene and the GPU backend.
//!
//! Colors are linear premultiplied RGBA; see [`Color`].

pub mod color;

pub use color::Color;
