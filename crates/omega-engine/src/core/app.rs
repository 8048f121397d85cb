use winit::event::WindowEvent;

use crate::camera::PerspectiveCamera;
use crate::coords::ViewportSize;
use crate::scene::Scene;
use crate::time::FrameTime;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Cancel the running render loop. The scene and camera are kept.
    Pause,
    /// Start a fresh render loop over the kept scene and camera.
    Resume,
    Exit,
}

/// What an app hands to the runtime once the window exists.
pub struct SceneInit {
    pub camera: PerspectiveCamera,
    pub scene: Scene,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Builds the camera and scene for a window of `viewport` logical pixels.
    ///
    /// Called once, when the window and GPU are ready.
    fn init(&mut self, viewport: ViewportSize) -> anyhow::Result<SceneInit>;

    /// Advances the scene by one frame. An error stops the render loop.
    fn update(&mut self, scene: &mut Scene, frame: FrameTime) -> anyhow::Result<()>;

    /// Called for window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once when the event loop is shutting down.
    fn on_exit(&mut self) {}
}
