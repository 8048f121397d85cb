//! GPU rendering subsystem.
//!
//! Renderers consume projected scene data and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them
//! lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod bodies;
mod common;
mod ctx;

pub use bodies::BodyRenderer;
pub use ctx::{RenderCtx, RenderTarget};
