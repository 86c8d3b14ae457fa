use crate::coords::{SurfaceSize, Viewport};
use crate::device::{AttachError, FrameError, GraphicsBackend, PresentConfig, SurfaceResources, TickError};
use crate::time::FrameClock;

use super::{FrameOutcome, FramePresenter, SurfaceState, SurfaceStats};

/// GPU presentation surface with rebuild-on-failure semantics.
///
/// Owns device, swapchain, backbuffer and render target view as one unit
/// ([`SurfaceResources`]) plus the presenter drawing into them.
///
/// Lifecycle:
/// - `attach` builds everything, base resources first, then the presenter's
/// - `detach` tears down in reverse; repeated calls are no-ops
/// - `resize` is a full detach + attach; swapchains are never resized in place
/// - `tick` renders one frame; `RecreateTarget` / `DeviceRemoved` failures are
///   absorbed by a rebuild, every other failure is returned as-is
/// - `close` is a final detach
///
/// All calls must come from the thread that owns the window.
pub struct RenderSurface<B: GraphicsBackend, P: FramePresenter<B>> {
    resources: Option<SurfaceResources<B>>,
    backend: B,
    presenter: P,
    config: PresentConfig,
    size: SurfaceSize,
    state: SurfaceState,
    clock: FrameClock,
    stats: SurfaceStats,
}

impl<B: GraphicsBackend, P: FramePresenter<B>> RenderSurface<B, P> {
    /// Creates an inactive surface. Nothing touches the GPU until `attach`.
    pub fn new(backend: B, presenter: P, config: PresentConfig) -> Self {
        let clock = FrameClock::for_refresh_rate(config.refresh_rate_hz);
        Self {
            resources: None,
            backend,
            presenter,
            config,
            size: SurfaceSize::default(),
            state: SurfaceState::Inactive,
            clock,
            stats: SurfaceStats::default(),
        }
    }

    /// Builds device, swapchain, backbuffer and render target view at `size`,
    /// then lets the presenter build its own resources.
    ///
    /// Does nothing if already active. Fails with [`AttachError::Closed`] after
    /// `close`. On failure nothing stays allocated and the surface is inactive.
    pub fn attach(&mut self, size: SurfaceSize) -> Result<(), AttachError> {
        match self.state {
            SurfaceState::Closed => return Err(AttachError::Closed),
            SurfaceState::Active => {
                log::trace!("attach ignored: surface already active");
                return Ok(());
            }
            SurfaceState::Inactive => {}
        }

        self.size = size;

        let resources = SurfaceResources::create(&mut self.backend, size, &self.config)?;
        self.presenter
            .on_attach(&resources)
            .map_err(AttachError::Presenter)?;

        self.resources = Some(resources);
        self.state = SurfaceState::Active;
        self.stats.attaches += 1;
        self.clock.reset();

        log::info!("render surface attached at {}x{}", size.width, size.height);
        Ok(())
    }

    /// Releases presenter resources, then view, backbuffer, swapchain, device.
    pub fn detach(&mut self) {
        let Some(resources) = self.resources.take() else {
            return;
        };

        if self.state == SurfaceState::Active {
            self.state = SurfaceState::Inactive;
        }

        self.presenter.on_detach();
        drop(resources);

        log::debug!("render surface detached");
    }

    /// Rebuilds the surface at `size`.
    ///
    /// While inactive the size is only remembered for the next attach. A resize
    /// to the current size is skipped.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), AttachError> {
        match self.state {
            SurfaceState::Closed => Ok(()),
            SurfaceState::Inactive => {
                self.size = size;
                Ok(())
            }
            SurfaceState::Active if size == self.size => Ok(()),
            SurfaceState::Active => {
                log::debug!(
                    "resizing render surface {}x{} -> {}x{}",
                    self.size.width,
                    self.size.height,
                    size.width,
                    size.height
                );
                self.rebuild(size)
            }
        }
    }

    /// Renders and presents one frame. A no-op unless active.
    pub fn tick(&mut self) -> Result<FrameOutcome, TickError> {
        if self.state != SurfaceState::Active {
            return Ok(FrameOutcome::Idle);
        }

        match self.draw_frame() {
            Ok(()) => {
                self.stats.frames_presented += 1;
                Ok(FrameOutcome::Presented)
            }
            Err(err) if err.is_recoverable() => {
                log::warn!("{err}; rebuilding render surface");
                self.rebuild(self.size)?;
                self.stats.recoveries += 1;
                Ok(FrameOutcome::Recovered)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Final detach. The surface ignores every later tick and refuses to attach.
    pub fn close(&mut self) {
        self.detach();
        if self.state != SurfaceState::Closed {
            self.state = SurfaceState::Closed;
            log::info!("render surface closed");
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SurfaceState::Active
    }

    /// Current (or pending, while inactive) size in device pixels.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Viewport bound at the start of each frame.
    pub fn viewport(&self) -> Viewport {
        Viewport::covering(self.size)
    }

    pub fn resources(&self) -> Option<&SurfaceResources<B>> {
        self.resources.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn config(&self) -> &PresentConfig {
        &self.config
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    fn rebuild(&mut self, size: SurfaceSize) -> Result<(), AttachError> {
        self.detach();
        self.attach(size)
    }

    fn draw_frame(&mut self) -> Result<(), FrameError> {
        let Some(resources) = self.resources.as_ref() else {
            return Ok(());
        };

        let time = self.clock.tick();
        if time.late {
            log::trace!("frame {} late: dt = {:.2} ms", time.frame_index, time.dt * 1000.0);
        }

        let mut frame = self
            .backend
            .begin_frame(resources, Viewport::covering(resources.size()))?;

        self.presenter
            .render_frame(&mut frame, time)
            .map_err(FrameError::from_presenter)?;

        self.backend
            .end_frame(resources, frame, self.config.sync_interval)
    }
}

impl<B: GraphicsBackend, P: FramePresenter<B>> Drop for RenderSurface<B, P> {
    fn drop(&mut self) {
        self.detach();
    }
}
