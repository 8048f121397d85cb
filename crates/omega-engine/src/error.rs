//! Error taxonomy for the render loop and its collaborators.
//!
//! Transient conditions (`InvalidViewportSize`, `ClockRegression`) are
//! absorbed by the scheduler and only logged. Structural failures
//! (`BackendUnavailable`, `Update`) end the loop that raised them.

use thiserror::Error;

use crate::render_loop::LoopState;

/// Errors produced while driving a render loop.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The host reported a drawable size with a zero dimension.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewportSize { width: u32, height: u32 },

    /// A raw timestamp moved backward (or was not finite).
    #[error("frame clock regressed from {previous_ms}ms to {current_ms}ms")]
    ClockRegression { previous_ms: f64, current_ms: f64 },

    /// The render backend rejected a size or render call.
    #[error("render backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),

    /// The caller-supplied per-frame update failed.
    #[error("frame update failed: {0:#}")]
    Update(anyhow::Error),

    /// `start` was called on a loop that already left the idle state.
    #[error("render loop cannot start from the {0:?} state")]
    NotIdle(LoopState),
}

impl FrameError {
    /// Returns `true` for conditions the scheduler recovers from on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FrameError::InvalidViewportSize { .. } | FrameError::ClockRegression { .. }
        )
    }
}

/// Failures reported by a [`RenderBackend`](crate::render_loop::RenderBackend).
#[derive(Debug, Error)]
pub enum BackendError {
    /// The surface or device ran out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Any other unrecoverable device failure.
    #[error("device failure: {0}")]
    Device(String),
}

/// Failures of the command-logging bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("bridge stream i/o failed")]
    Io(#[from] std::io::Error),

    #[error("malformed bridge record")]
    Json(#[from] serde_json::Error),
}
