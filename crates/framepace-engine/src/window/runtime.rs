use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::DriverConfig;
use crate::display::TitleSurface;
use crate::driver::{DriverState, FrameOutcome};
use crate::host::Pacer;
use crate::loader::EngineLoader;
use crate::scene::Engine;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "framepace".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Windowed host for a `FrameDriver`.
///
/// Runs the `Pacer` schedule on the winit event loop thread:
/// - frame loop: one refresh per `RedrawRequested`, re-armed with `request_redraw`
///   before the frame body runs
/// - sample timer: polled in `about_to_wait`; the loop sleeps with
///   `ControlFlow::WaitUntil(deadline)` so samples keep coming while no redraws do
///
/// The loader runs under `pollster::block_on` inside `resumed`, so the timer cannot
/// fire while the engine initializes. A deadline that passes during that time fires
/// as soon as the loader returns.
pub struct Runtime;

impl Runtime {
    /// Opens the window, loads the engine built by `engine` and drives it until the
    /// window closes.
    ///
    /// Engine initialization failure ends the loop before the first frame and is
    /// returned as the error.
    pub fn run<E, F>(config: RuntimeConfig, driver: DriverConfig, engine: F) -> Result<()>
    where
        E: Engine + 'static,
        F: FnOnce(Arc<Window>) -> E + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(config, driver, engine);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct HostState<E, F>
where
    E: Engine,
{
    config: RuntimeConfig,
    driver_config: DriverConfig,
    engine: Option<F>,

    window: Option<Arc<Window>>,
    pacer: Pacer<E::Scene, TitleSurface>,

    failure: Option<anyhow::Error>,
}

impl<E, F> HostState<E, F>
where
    E: Engine,
    F: FnOnce(Arc<Window>) -> E,
{
    fn new(config: RuntimeConfig, driver_config: DriverConfig, engine: F) -> Self {
        // System start: the sample timer runs from here, independent of the loader.
        Self {
            pacer: Pacer::new(&driver_config, Instant::now()),
            config,
            driver_config,
            engine: Some(engine),
            window: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    /// Creates the window and runs the loader to completion before any redraw is
    /// requested.
    fn boot(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let Some(make_engine) = self.engine.take() else {
            return Ok(());
        };

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_visible(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let surface = TitleSurface::new(Arc::clone(&window), self.config.title.clone());
        let loader = EngineLoader::new(make_engine(Arc::clone(&window)), self.driver_config.payload.clone());

        let ready = pollster::block_on(loader.load(surface))?;
        if let Some(late) = self.pacer.start(ready, Instant::now())? {
            log::info!("engine init outlasted the sample period; window closed at {} fps", late.fps);
        }

        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let window = &self.window;
        let outcome = self.pacer.on_refresh(Instant::now(), || {
            if let Some(window) = window {
                window.request_redraw();
            }
        });

        if outcome == FrameOutcome::Halted && self.failure.is_none() {
            self.fail(event_loop, anyhow!("frame loop halted after a scene failure"));
        }
    }
}

impl<E, F> ApplicationHandler for HostState<E, F>
where
    E: Engine,
    F: FnOnce(Arc<Window>) -> E,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }

        if let Err(e) = self.boot(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pacer.poll_timer(Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline()));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!(
                    "close requested after {} frames and {} samples, last sample {} fps",
                    self.pacer.frames(),
                    self.pacer.samples_taken(),
                    self.pacer.driver().counter().last_sample()
                );
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if self.pacer.driver().state() != DriverState::Halted {
                    self.redraw(event_loop);
                }
            }
            _ => {}
        }
    }
}
