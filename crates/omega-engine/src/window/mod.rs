//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and drives one render loop per
//! window on redraw requests.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
