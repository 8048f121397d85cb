//! Size types shared by the render loop, the backend and the host.
//!
//! Canonical space is logical pixels (DPI-independent). Backends convert to
//! physical pixels with the device pixel ratio when configuring their output.

mod viewport;

pub use viewport::ViewportSize;
