use crate::coords::ViewportSize;

use super::Camera;

/// Keeps a camera projection in step with the viewport aspect ratio.
///
/// Holds the aspect ratio last applied to the camera. Projection rebuilds are
/// skipped whenever a new viewport size maps to the same ratio (within
/// `epsilon`), so proportional resizes and repeated identical sizes cost
/// nothing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSynchronizer {
    aspect: f32,
    epsilon: f32,
}

impl CameraSynchronizer {
    pub const DEFAULT_EPSILON: f32 = 1e-6;

    /// Starts from an explicitly known aspect ratio.
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            epsilon: Self::DEFAULT_EPSILON,
        }
    }

    /// Starts from the aspect ratio the camera currently carries.
    pub fn for_camera<C: Camera + ?Sized>(camera: &C) -> Self {
        Self::new(camera.aspect())
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Aspect ratio last applied to the camera.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Applies the aspect ratio of `size` to `camera` if it changed.
    ///
    /// Returns `true` when the projection was rebuilt.
    pub fn sync<C: Camera + ?Sized>(&mut self, camera: &mut C, size: ViewportSize) -> bool {
        let aspect = size.aspect();
        if (aspect - self.aspect).abs() <= self.epsilon {
            return false;
        }

        camera.set_aspect(aspect);
        camera.update_projection_matrix();
        log::debug!("camera aspect {:.4} -> {:.4} ({size})", self.aspect, aspect);
        self.aspect = aspect;
        true
    }
}
