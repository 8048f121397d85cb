mod orrery;

use std::io::Stdout;

use anyhow::Result;
use glam::Vec3;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use omega_engine::bridge::CommandBridge;
use omega_engine::camera::PerspectiveCamera;
use omega_engine::coords::ViewportSize;
use omega_engine::core::{App, AppControl, SceneInit};
use omega_engine::device::GpuInit;
use omega_engine::logging::{init_logging, LoggingConfig};
use omega_engine::paint::Color;
use omega_engine::scene::Scene;
use omega_engine::time::FrameTime;
use omega_engine::window::{Runtime, RuntimeConfig};
use omega_engine::BridgeError;

use orrery::Orrery;

/// Orrery animation that reports recording commands on stdout.
///
/// Keys: Space pauses/resumes, S requests a screenshot, Escape quits.
struct Studio {
    orrery: Option<Orrery>,
    bridge: CommandBridge<Stdout>,
    paused: bool,
}

impl Studio {
    fn new() -> Self {
        Self {
            orrery: None,
            bridge: CommandBridge::stdout(),
            paused: false,
        }
    }

    fn report(&mut self, send: impl FnOnce(&mut CommandBridge<Stdout>) -> Result<(), BridgeError>) {
        if let Err(e) = send(&mut self.bridge) {
            log::warn!("bridge write failed: {e}");
        }
    }

    fn on_key(&mut self, key: KeyCode) -> AppControl {
        match key {
            KeyCode::Space if self.paused => {
                self.paused = false;
                self.report(CommandBridge::start);
                AppControl::Resume
            }
            KeyCode::Space => {
                self.paused = true;
                self.report(CommandBridge::stop);
                AppControl::Pause
            }
            KeyCode::KeyS => {
                self.report(CommandBridge::screenshot);
                AppControl::Continue
            }
            KeyCode::Escape => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }
}

impl App for Studio {
    fn init(&mut self, viewport: ViewportSize) -> Result<SceneInit> {
        // The aspect ratio is corrected by the render loop on its first frame.
        let mut camera = PerspectiveCamera::new(40.0, 2.0, 0.1, 1000.0);
        camera.look_at(Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO, Vec3::Z);

        let mut scene = Scene::new(Color::from_hex(0x05060d));
        self.orrery = Some(Orrery::populate(&mut scene));

        log::info!("orrery ready at {viewport}");
        self.report(CommandBridge::start);
        Ok(SceneInit { camera, scene })
    }

    fn update(&mut self, scene: &mut Scene, frame: FrameTime) -> Result<()> {
        if let Some(orrery) = &self.orrery {
            orrery.advance(scene, frame.elapsed);
        }
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.on_key(*code),
            _ => AppControl::Continue,
        }
    }

    fn on_exit(&mut self) {
        self.report(CommandBridge::done);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "omega orrery".to_string(),
        initial_size: LogicalSize::new(960.0, 540.0),
        ..Default::default()
    };

    Runtime::run(config, GpuInit::default(), Studio::new())
}
