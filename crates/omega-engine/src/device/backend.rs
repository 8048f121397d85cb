use std::sync::Arc;

use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::camera::PerspectiveCamera;
use crate::coords::ViewportSize;
use crate::error::BackendError;
use crate::render::{BodyRenderer, RenderCtx, RenderTarget};
use crate::render_loop::RenderBackend;
use crate::scene::{project_bodies, Scene};

use super::{Gpu, GpuInit, SurfaceErrorAction};

/// wgpu-backed [`RenderBackend`] drawing a [`Scene`] into a window surface.
///
/// Sizes arrive in logical pixels; the surface is configured at
/// `logical * pixel_ratio` physical pixels.
pub struct GpuBackend {
    window: Arc<Window>,
    gpu: Gpu,
    logical: Option<ViewportSize>,
    pixel_ratio: f64,
    bodies: BodyRenderer,
}

impl GpuBackend {
    pub async fn new(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new(window.clone(), init).await?;
        Ok(Self {
            window,
            gpu,
            logical: None,
            pixel_ratio: 1.0,
            bodies: BodyRenderer::new(),
        })
    }

    fn apply_physical_size(&mut self) {
        let Some(logical) = self.logical else { return };
        let physical = physical_size(logical, self.pixel_ratio);
        if self.gpu.resize(physical) {
            log::debug!(
                "surface reconfigured to {}x{} (logical {logical}, ratio {})",
                physical.width,
                physical.height,
                self.pixel_ratio
            );
        }
    }
}

impl RenderBackend for GpuBackend {
    type Scene = Scene;
    type Camera = PerspectiveCamera;

    fn output_size(&self) -> Option<ViewportSize> {
        self.logical
    }

    fn set_output_size(&mut self, size: ViewportSize) -> Result<(), BackendError> {
        self.logical = Some(size);
        self.apply_physical_size();
        Ok(())
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn set_pixel_ratio(&mut self, ratio: f64) -> Result<(), BackendError> {
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(BackendError::Device(format!("invalid pixel ratio {ratio}")));
        }
        self.pixel_ratio = ratio;
        self.apply_physical_size();
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), BackendError> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(BackendError::OutOfMemory),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                };
            }
        };

        let viewport = self.logical.unwrap_or_else(|| {
            let size = self.gpu.size();
            ViewportSize::clamped(size.width, size.height)
        });
        let discs = project_bodies(scene, camera, viewport);

        {
            let ctx = RenderCtx::new(
                self.gpu.device(),
                self.gpu.queue(),
                self.gpu.surface_format(),
                viewport,
            );
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            target.clear(scene.background.to_wgpu());
            self.bodies.render(&ctx, &mut target, &discs);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        Ok(())
    }
}

/// Physical surface size for a logical size at the given pixel ratio.
fn physical_size(logical: ViewportSize, pixel_ratio: f64) -> PhysicalSize<u32> {
    let (width, height) = logical.to_physical(pixel_ratio);
    PhysicalSize::new(width, height)
}
