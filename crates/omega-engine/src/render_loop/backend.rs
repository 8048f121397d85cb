use crate::camera::Camera;
use crate::coords::ViewportSize;
use crate::error::BackendError;

/// Output side of a render loop.
///
/// Calls are synchronous from the scheduler's point of view. Any error is
/// treated as fatal for the loop that issued the call.
pub trait RenderBackend {
    type Scene;
    type Camera: Camera;

    /// Logical output size last applied through
    /// [`set_output_size`](RenderBackend::set_output_size), if any.
    fn output_size(&self) -> Option<ViewportSize>;

    fn set_output_size(&mut self, size: ViewportSize) -> Result<(), BackendError>;

    /// Device pixel ratio currently applied.
    fn pixel_ratio(&self) -> f64;

    /// Sets the device pixel ratio used to derive the physical output size.
    fn set_pixel_ratio(&mut self, ratio: f64) -> Result<(), BackendError>;

    fn render(&mut self, scene: &Self::Scene, camera: &Self::Camera) -> Result<(), BackendError>;
}

/// Everything one render loop mutates.
///
/// A context belongs to exactly one scheduler; independent loops need
/// independent contexts.
pub struct RenderContext<B: RenderBackend> {
    pub backend: B,
    pub camera: B::Camera,
    pub scene: B::Scene,
}

impl<B: RenderBackend> RenderContext<B> {
    pub fn new(backend: B, camera: B::Camera, scene: B::Scene) -> Self {
        Self { backend, camera, scene }
    }
}
