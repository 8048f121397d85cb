//! Continuous render loop.
//!
//! A [`RenderScheduler`] owns one [`RenderContext`] (backend, camera, scene)
//! and advances it one tick per host frame callback:
//!
//! 1. raw timestamp -> [`FrameClock`](crate::time::FrameClock)
//! 2. host size -> [`ViewportMonitor`] -> backend resize + camera sync
//! 3. caller update
//! 4. backend render
//! 5. re-arm through the host, unless cancelled
//!
//! Scheduling is single-threaded and cooperative. The host decides when frames
//! happen; the scheduler only asks for the next one.

mod backend;
mod config;
mod handle;
mod host;
mod monitor;
mod scheduler;

pub use backend::{RenderBackend, RenderContext};
pub use config::LoopConfig;
pub use handle::LoopHandle;
pub use host::{FrameHost, FrameUpdate};
pub use monitor::ViewportMonitor;
pub use scheduler::{LoopState, RenderScheduler, TickOutcome, TickReport};
