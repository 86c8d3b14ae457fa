use crate::coords::{SurfaceSize, Viewport};

use super::{AttachError, FrameError, PresentConfig};

/// Creates the GPU resources behind a render surface and drives frame submission.
///
/// Each resource is created from the ones before it, and released by `Drop`.
/// The surface core owns sequencing and recovery; a backend only has to report
/// failures with the right [`FrameError`] kind.
///
/// Backends own their window binding, so they are `'static` values.
pub trait GraphicsBackend: Sized + 'static {
    /// Graphics device plus its submission queue.
    type Device;

    /// Presentation chain bound to the window.
    type Swapchain;

    /// Texture frames are rendered into.
    type Backbuffer;

    /// Output binding over the backbuffer.
    type RenderTargetView;

    /// Per-frame recording state handed to the presenter.
    type Frame<'a>
    where
        Self: 'a;

    fn create_device(&mut self) -> Result<Self::Device, AttachError>;

    fn create_swapchain(
        &mut self,
        device: &Self::Device,
        size: SurfaceSize,
        config: &PresentConfig,
    ) -> Result<Self::Swapchain, AttachError>;

    fn create_backbuffer(
        &mut self,
        device: &Self::Device,
        swapchain: &Self::Swapchain,
    ) -> Result<Self::Backbuffer, AttachError>;

    fn create_render_target_view(
        &mut self,
        device: &Self::Device,
        backbuffer: &Self::Backbuffer,
    ) -> Result<Self::RenderTargetView, AttachError>;

    /// Binds the render target and viewport and opens a frame.
    fn begin_frame<'a>(
        &mut self,
        resources: &'a SurfaceResources<Self>,
        viewport: Viewport,
    ) -> Result<Self::Frame<'a>, FrameError>;

    /// Submits the frame and presents it, waiting `sync_interval` vertical blanks.
    fn end_frame<'a>(
        &mut self,
        resources: &'a SurfaceResources<Self>,
        frame: Self::Frame<'a>,
        sync_interval: u32,
    ) -> Result<(), FrameError>;
}

/// The four resources of an attached surface, valid only together.
///
/// Fields drop in declaration order, which is the required release order:
/// view, backbuffer, swapchain, device.
pub struct SurfaceResources<B: GraphicsBackend> {
    view: B::RenderTargetView,
    backbuffer: B::Backbuffer,
    swapchain: B::Swapchain,
    device: B::Device,
    size: SurfaceSize,
}

impl<B: GraphicsBackend> SurfaceResources<B> {
    /// Builds all resources or none.
    ///
    /// On failure, anything already created is dropped before returning.
    pub fn create(
        backend: &mut B,
        size: SurfaceSize,
        config: &PresentConfig,
    ) -> Result<Self, AttachError> {
        let device = backend.create_device()?;
        let swapchain = backend.create_swapchain(&device, size, config)?;
        let backbuffer = backend.create_backbuffer(&device, &swapchain)?;
        let view = backend.create_render_target_view(&device, &backbuffer)?;

        Ok(Self {
            view,
            backbuffer,
            swapchain,
            device,
            size,
        })
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    pub fn swapchain(&self) -> &B::Swapchain {
        &self.swapchain
    }

    pub fn backbuffer(&self) -> &B::Backbuffer {
        &self.backbuffer
    }

    pub fn view(&self) -> &B::RenderTargetView {
        &self.view
    }

    /// Size the resources were created for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}
