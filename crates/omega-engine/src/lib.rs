//! Omega engine crate.
//!
//! A continuous render loop (clock, viewport tracking, camera projection
//! sync, frame scheduling) plus the wgpu/winit pieces that host it and the
//! command bridge animations use to talk to their supervisor.

pub mod error;

pub mod camera;
pub mod coords;
pub mod render_loop;
pub mod scene;
pub mod time;

pub mod core;
pub mod device;
pub mod render;
pub mod window;

pub mod bridge;
pub mod logging;
pub mod paint;

pub use error::{BackendError, BridgeError, FrameError};
