use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::ViewportSize;
use crate::core::{App, AppControl, SceneInit};
use crate::device::{GpuBackend, GpuInit};
use crate::render_loop::{
    FrameHost, FrameUpdate, LoopConfig, LoopState, RenderContext, RenderScheduler, TickOutcome,
};
use crate::scene::Scene;
use crate::time::FrameTime;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub loop_config: LoopConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "omega".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            loop_config: LoopConfig::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until the window closes or the app
    /// exits.
    ///
    /// Returns the error that stopped the render loop, if any.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Adapts an [`App`] to the scheduler's update seam.
struct AppUpdate<A>(A);

impl<A: App> FrameUpdate<Scene> for AppUpdate<A> {
    fn update(&mut self, scene: &mut Scene, frame: FrameTime) -> Result<()> {
        self.0.update(scene, frame)
    }
}

/// The window as seen by the render loop.
struct WindowHost<'a> {
    window: &'a Window,
}

impl FrameHost for WindowHost<'_> {
    fn display_size(&self) -> (u32, u32) {
        logical_size(self.window.inner_size(), self.window.scale_factor())
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}

fn logical_size(physical: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let logical: LogicalSize<f64> = physical.to_logical(scale_factor);
    (logical.width.round() as u32, logical.height.round() as u32)
}

type Scheduler<A> = RenderScheduler<GpuBackend, AppUpdate<A>>;

struct ActiveWindow<A: App> {
    window: Arc<Window>,
    scheduler: Scheduler<A>,
}

struct AppState<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,

    /// The app until its window exists; afterwards it lives in the scheduler.
    pending: Option<A>,
    active: Option<ActiveWindow<A>>,

    started: Instant,
    error: Option<anyhow::Error>,
}

impl<A: App + 'static> AppState<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            pending: Some(app),
            active: None,
            started: Instant::now(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn activate(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let backend = pollster::block_on(GpuBackend::new(window.clone(), self.gpu_init.clone()))
            .context("GPU initialization failed for window")?;

        let (w, h) = logical_size(window.inner_size(), window.scale_factor());
        let viewport = ViewportSize::clamped(w, h);

        let Some(app) = self.pending.as_mut() else {
            anyhow::bail!("app already handed to a render loop");
        };
        let SceneInit { camera, scene } = app.init(viewport).context("app init failed")?;
        let Some(app) = self.pending.take() else {
            anyhow::bail!("app already handed to a render loop");
        };

        let context = RenderContext::new(backend, camera, scene);
        let mut scheduler =
            RenderScheduler::new(context, AppUpdate(app), self.config.loop_config.clone());
        scheduler.start(&mut WindowHost { window: &window })?;

        log::info!("window ready at {viewport}, render loop #{}", scheduler.id());
        self.active = Some(ActiveWindow { window, scheduler });
        Ok(())
    }

    /// Replaces a cancelled loop with a fresh one over the same context.
    fn resume(&mut self) -> Result<()> {
        let Some(ActiveWindow { window, scheduler }) = self.active.take() else {
            return Ok(());
        };

        if scheduler.state() != LoopState::Cancelled {
            log::debug!("resume ignored; render loop #{} is {:?}", scheduler.id(), scheduler.state());
            self.active = Some(ActiveWindow { window, scheduler });
            return Ok(());
        }

        let (context, update) = scheduler.into_parts();
        let mut fresh = RenderScheduler::new(context, update, self.config.loop_config.clone());
        let started = fresh.start(&mut WindowHost { window: &window });
        log::info!("render loop #{} resumed", fresh.id());

        self.active = Some(ActiveWindow { window, scheduler: fresh });
        started?;
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(active) = self.active.as_mut() else { return };

        let raw_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let mut host = WindowHost { window: &active.window };

        match active.scheduler.tick(&mut host, raw_ms) {
            Ok(TickOutcome::Cancelled(_)) => {
                log::info!("render loop #{} stopped by its handle", active.scheduler.id());
            }
            Ok(TickOutcome::Rendered(_) | TickOutcome::Skipped) => {}
            Err(err) => self.fail(event_loop, anyhow::Error::new(err).context("render loop failed")),
        }
    }
}

impl<A: App + 'static> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.active.is_some() {
            return;
        }

        if let Err(e) = self.activate(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Frames are requested by the render loop itself.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(active) = self.active.as_mut() else { return };
        if active.window.id() != window_id {
            return;
        }

        match active.scheduler.update_mut().0.on_window_event(&event) {
            AppControl::Continue => {}
            AppControl::Pause => {
                active.scheduler.cancel();
                log::info!("render loop #{} paused", active.scheduler.id());
            }
            AppControl::Resume => {
                if let Err(e) = self.resume() {
                    self.fail(event_loop, e.context("failed to resume render loop"));
                    return;
                }
            }
            AppControl::Exit => {
                active.scheduler.cancel();
                event_loop.exit();
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            // The render loop polls the size every tick; these are only hints.
            WindowEvent::Resized(size) => {
                log::trace!("window resized to {}x{}", size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::trace!("scale factor changed to {scale_factor}");
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(active) = self.active.as_mut() {
            active.scheduler.cancel();
            active.scheduler.update_mut().0.on_exit();
        } else if let Some(app) = self.pending.as_mut() {
            app.on_exit();
        }
    }
}
