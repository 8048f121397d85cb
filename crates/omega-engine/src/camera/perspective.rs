use glam::{Mat4, Vec3, Vec4};

use super::Camera;

/// Right-handed perspective camera with a look-at view.
///
/// Projection uses wgpu clip space (depth in `[0, 1]`). Matrices are cached and
/// only rebuilt through [`update_projection_matrix`](Camera::update_projection_matrix)
/// or [`look_at`](PerspectiveCamera::look_at).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    eye: Vec3,
    target: Vec3,
    up: Vec3,

    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
}

impl PerspectiveCamera {
    /// Creates a camera at the origin looking down `-Z`.
    ///
    /// `fov_y_degrees` is the vertical field of view in degrees.
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
        };
        cam.look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        cam.update_projection_matrix();
        cam
    }

    /// Moves the camera to `eye`, orienting it toward `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.eye = eye;
        self.target = target;
        self.up = up;
        self.view = Mat4::look_at_rh(eye, target, up);
        self.view_projection = self.projection * self.view;
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection
    }

    /// Transforms a world-space point to clip space.
    pub fn to_clip(&self, point: Vec3) -> Vec4 {
        self.view_projection * point.extend(1.0)
    }

    /// Vertical projection scale (`1 / tan(fov_y / 2)`).
    ///
    /// Multiplying a world-space length by this factor and dividing by clip
    /// `w` yields its extent in NDC units.
    pub fn focal_scale(&self) -> f32 {
        self.projection.y_axis.y
    }
}

impl Camera for PerspectiveCamera {
    fn aspect(&self) -> f32 {
        self.aspect
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
        self.view_projection = self.projection * self.view;
    }
}
