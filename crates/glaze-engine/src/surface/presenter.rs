use crate::device::{GraphicsBackend, SurfaceResources};
use crate::time::FrameTime;

/// Renderer plugged into a [`RenderSurface`](super::RenderSurface).
///
/// The surface calls `on_attach` after its own resources exist and `on_detach`
/// before releasing them, so presenter resources never outlive the device they
/// were created on.
pub trait FramePresenter<B: GraphicsBackend> {
    /// Creates per-attach resources (pipelines, buffers).
    fn on_attach(&mut self, resources: &SurfaceResources<B>) -> anyhow::Result<()> {
        let _ = resources;
        Ok(())
    }

    /// Releases everything created in `on_attach`.
    fn on_detach(&mut self) {}

    /// Records one frame into the bound render target.
    ///
    /// Return a [`FrameError`](crate::device::FrameError) through `anyhow` to
    /// report device loss detected by the renderer itself.
    fn render_frame(&mut self, frame: &mut B::Frame<'_>, time: FrameTime) -> anyhow::Result<()>;
}
