use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::SurfaceSize;
use crate::device::{GpuInit, PresentConfig, WgpuBackend};
use crate::surface::{FrameOutcome, FramePresenter, RenderSurface};

use super::pending::PendingResize;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub present: PresentConfig,
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glaze".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            present: PresentConfig::default(),
            gpu: GpuInit::default(),
        }
    }
}

/// Entry point for the runtime.
///
/// Opens one window, binds a [`RenderSurface`] to it and maps window lifecycle
/// events onto surface calls:
/// - first resume: create window, attach
/// - suspend / occluded: detach; resume / visible again: attach
/// - resize / scale change: queued, applied before the next tick
/// - redraw: tick (requested continuously; vsync paces the loop)
/// - close: final detach, exit
pub struct Runtime;

impl Runtime {
    /// Runs until the window closes or a frame fails unrecoverably.
    ///
    /// `FrameError::Timeout` skips the frame; any other error surfaced by the
    /// surface ends the loop and is returned.
    pub fn run<P>(config: RuntimeConfig, presenter: P) -> Result<()>
    where
        P: FramePresenter<WgpuBackend> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host::new(config, presenter);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct Host<P>
where
    P: FramePresenter<WgpuBackend> + 'static,
{
    config: RuntimeConfig,

    /// Handed to the surface when the window is created.
    presenter: Option<P>,

    // Declared before `window` so the surface is released while the window is alive.
    surface: Option<RenderSurface<WgpuBackend, P>>,
    window: Option<Arc<Window>>,

    pending_resize: PendingResize,

    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<P> Host<P>
where
    P: FramePresenter<WgpuBackend> + 'static,
{
    fn new(config: RuntimeConfig, presenter: P) -> Self {
        Self {
            config,
            presenter: Some(presenter),
            surface: None,
            window: None,
            pending_resize: PendingResize::default(),
            failure: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.request_exit(event_loop);
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let presenter = self
            .presenter
            .take()
            .context("presenter already consumed by a previous window")?;

        let backend = WgpuBackend::new(Arc::clone(&window), self.config.gpu.clone());
        self.surface = Some(RenderSurface::new(backend, presenter, self.config.present.clone()));
        self.window = Some(window);
        Ok(())
    }

    /// Current drawable size. winit already reports device pixels.
    fn current_size(&self) -> Option<SurfaceSize> {
        self.window.as_ref().map(|w| SurfaceSize::from(w.inner_size()))
    }

    fn attach(&mut self, event_loop: &ActiveEventLoop) {
        let current = self.current_size();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if let Err(e) = self.pending_resize.attach(surface, current) {
            let err = anyhow::Error::new(e).context("failed to attach render surface");
            self.fail(event_loop, err);
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn detach(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.detach();
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut surface) = self.surface.take() {
            surface.close();
        }
        self.window = None;
        self.request_exit(event_loop);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match self.pending_resize.frame(surface) {
            Ok(FrameOutcome::Recovered) => log::info!("render surface recovered"),
            Ok(_) => {}
            Err(e) => {
                let err = anyhow::Error::new(e).context("render surface failed");
                self.fail(event_loop, err);
            }
        }
    }
}

impl<P> ApplicationHandler for Host<P>
where
    P: FramePresenter<WgpuBackend> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window(event_loop) {
                self.fail(event_loop, e);
                return;
            }
        }

        self.attach(event_loop);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.detach();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        let active = self.surface.as_ref().is_some_and(|s| s.is_active());
        if active {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close(event_loop),

            WindowEvent::Resized(new_size) => {
                self.pending_resize.queue(SurfaceSize::from(new_size));
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.current_size() {
                    self.pending_resize.queue(size);
                }
            }

            WindowEvent::Occluded(true) => {
                log::debug!("window occluded");
                self.detach();
            }

            WindowEvent::Occluded(false) => {
                log::debug!("window visible");
                self.attach(event_loop);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
