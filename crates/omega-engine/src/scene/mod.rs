//! Scene model consumed by the GPU backend.
//!
//! Responsibilities:
//! - store renderer-agnostic bodies (position, radius, color)
//! - project bodies into screen-space discs for a given camera and viewport

mod body;
mod projection;

pub use body::{Body, BodyId, Scene};
pub use projection::{ScreenDisc, project_bodies};
