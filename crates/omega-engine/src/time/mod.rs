//! Time subsystem.
//!
//! Converts raw host timestamps into loop-relative frame timing.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick(raw_ms)` once per frame callback to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
