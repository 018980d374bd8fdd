//! Sunfall -- window, renderer and state controller wiring.
//!
//! winit drives the event loop via `ApplicationHandler`. Window events are
//! translated into `InputEvent`s and buffered; each `RedrawRequested` hands the
//! buffer to `Control::run_frame`, presents the recorded `DrawList`, then calls
//! `Control::end_frame` to pace to the target FPS and refreshes the caption.

mod config;
mod states;
mod sun;

use std::path::Path;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use config::{load_config_or_default, GameConfig};
use sf_assets::AssetTables;
use sf_core::canvas::DrawList;
use sf_core::control::{Control, FrameStatus};
use sf_core::error::ControlError;
use sf_core::input::InputEvent;
use sf_platform::translate_window_event;
use sf_render::{GpuContext, RectRenderer};
use states::{build_states, GamePersist};

const CONFIG_PATH: &str = "assets/config/game.json";

struct GameWindow {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: RectRenderer,
    canvas: DrawList,
    control: Control<GamePersist>,
    pending_events: Vec<InputEvent>,
    caption: String,
}

impl GameWindow {
    fn new(window: Arc<Window>, config: &GameConfig, assets: &AssetTables) -> Result<Self, ControlError> {
        let gpu = GpuContext::new(window.clone()).unwrap_or_else(|e| panic!("{e}"));
        let renderer = RectRenderer::new(&gpu.device, gpu.surface_format);
        let canvas = DrawList::new(gpu.size.0, gpu.size.1);

        let mut control = Control::new(config.control_config());
        control.setup_states(build_states(config, assets), &config.start_state)?;

        Ok(Self {
            window,
            gpu,
            renderer,
            canvas,
            control,
            pending_events: Vec::new(),
            caption: config.caption.clone(),
        })
    }

    /// One full frame. Returns `Stopped` once the controller has quit.
    fn frame(&mut self) -> Result<FrameStatus, ControlError> {
        let status = self
            .control
            .run_frame(self.pending_events.drain(..), &mut self.canvas)?;
        self.renderer.render(&self.gpu, &self.canvas);
        if status == FrameStatus::Stopped {
            return Ok(status);
        }
        self.control.end_frame();

        let caption = self.control.caption();
        if caption != self.caption {
            self.window.set_title(&caption);
            self.caption = caption;
        }
        Ok(status)
    }
}

struct App {
    config: GameConfig,
    assets: AssetTables,
    state: Option<GameWindow>,
    error: Option<ControlError>,
}

impl App {
    fn new(config: GameConfig, assets: AssetTables) -> Self {
        Self {
            config,
            assets,
            state: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ControlError) {
        log::error!("Controller error: {err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = sf_platform::create_window(event_loop, &self.config.platform_config())
            .unwrap_or_else(|e| panic!("Failed to create window: {e}"));
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        match GameWindow::new(window, &self.config, &self.assets) {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if let Some(input) = translate_window_event(&event) {
            state.pending_events.push(input);
        }

        match event {
            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.canvas.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::RedrawRequested => match state.frame() {
                Ok(FrameStatus::Running) => {}
                Ok(FrameStatus::Stopped) => {
                    log::info!("Controller stopped, exiting.");
                    event_loop.exit();
                }
                Err(err) => self.fail(event_loop, err),
            },

            _ => {}
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Sunfall starting...");

    let config = load_config_or_default(Path::new(CONFIG_PATH))
        .unwrap_or_else(|e| panic!("{e}"));
    let assets = AssetTables::load(&config.asset_dirs(), config.colorkey);

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, assets);
    event_loop.run_app(&mut app).expect("Event loop error");

    if let Some(err) = app.error {
        log::error!("Exiting with error: {err}");
        std::process::exit(1);
    }
}
