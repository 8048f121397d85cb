//! Camera contract and projection reconciliation.
//!
//! The render loop only needs two things from a camera: an aspect ratio it can
//! overwrite and a way to rebuild the projection afterwards. Everything else
//! (position, orientation, field of view) belongs to the concrete camera type.

mod perspective;
mod sync;

pub use perspective::PerspectiveCamera;
pub use sync::CameraSynchronizer;

/// Camera operations used by [`CameraSynchronizer`].
pub trait Camera {
    /// Aspect ratio (width / height) the projection was built with.
    fn aspect(&self) -> f32;

    /// Overwrites the aspect ratio. Takes effect on the next
    /// [`update_projection_matrix`](Camera::update_projection_matrix).
    fn set_aspect(&mut self, aspect: f32);

    /// Rebuilds the projection from the current parameters.
    fn update_projection_matrix(&mut self);
}
