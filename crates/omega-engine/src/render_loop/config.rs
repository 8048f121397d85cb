use crate::camera::CameraSynchronizer;
use crate::time::FrameClock;

/// Render loop tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Upper bound for the device pixel ratio handed to the backend.
    ///
    /// `None` passes the host ratio through unchanged. The default of `2.0`
    /// caps fill cost on very dense displays.
    pub max_pixel_ratio: Option<f64>,

    /// Aspect ratio changes at or below this value do not rebuild the projection.
    pub aspect_epsilon: f32,

    /// Upper bound for `FrameTime::dt`, in seconds.
    pub max_dt: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: Some(2.0),
            aspect_epsilon: CameraSynchronizer::DEFAULT_EPSILON,
            max_dt: FrameClock::DEFAULT_MAX_DT,
        }
    }
}

impl LoopConfig {
    pub fn with_max_pixel_ratio(mut self, max: Option<f64>) -> Self {
        self.max_pixel_ratio = max;
        self
    }

    pub fn with_aspect_epsilon(mut self, epsilon: f32) -> Self {
        self.aspect_epsilon = epsilon;
        self
    }

    pub fn with_max_dt(mut self, max_dt: f64) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Sanitizes a host-reported pixel ratio and applies the cap.
    ///
    /// Non-finite or non-positive ratios fall back to `1.0`.
    pub fn clamp_pixel_ratio(&self, raw: f64) -> f64 {
        let ratio = if raw.is_finite() && raw > 0.0 { raw } else { 1.0 };
        match self.max_pixel_ratio {
            Some(max) if max > 0.0 => ratio.min(max),
            _ => ratio,
        }
    }
}
