use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::platform::{translate_window_event, WindowInput};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Logical pixels scrolled per wheel line.
    pub line_height: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tack".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            line_height: 24.0,
        }
    }
}

/// Returned by app callbacks to keep the loop running or stop it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`Runtime`].
pub trait WindowApp {
    /// Window input, already translated to logical pixels.
    fn on_input(&mut self, input: WindowInput) -> AppControl;

    /// One presented frame. Animation-frame work runs here.
    fn on_frame(&mut self, frame_index: u64) -> AppControl;
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: WindowApp + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<A> {
    config: RuntimeConfig,
    app: A,
    window: Option<Window>,
    frame_index: u64,
    exit_requested: bool,
}

impl<A: WindowApp> AppState<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            window: None,
            frame_index: 0,
            exit_requested: false,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::debug!("window {:?} created", window.id());
        self.window = Some(window);
        Ok(())
    }

    fn apply(&mut self, control: AppControl) {
        if control == AppControl::Exit {
            self.exit_requested = true;
        }
    }
}

impl<A: WindowApp> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to create initial window: {e:#}");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw keeps animation frames flowing.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let scale = self.window.as_ref().map_or(1.0, Window::scale_factor);

        if let Some(input) = translate_window_event(&event, scale, self.config.line_height) {
            if input == WindowInput::CloseRequested {
                self.window = None;
                self.exit_requested = true;
            } else {
                let control = self.app.on_input(input);
                self.apply(control);
            }
        }

        if let WindowEvent::RedrawRequested = event {
            let control = self.app.on_frame(self.frame_index);
            self.frame_index = self.frame_index.wrapping_add(1);
            self.apply(control);
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
