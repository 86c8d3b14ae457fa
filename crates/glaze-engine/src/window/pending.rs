use crate::coords::SurfaceSize;
use crate::device::{AttachError, FrameError, GraphicsBackend, TickError};
use crate::surface::{FrameOutcome, FramePresenter, RenderSurface};

/// Window sizes reported between two frames.
///
/// Only the latest one survives; it is applied right before the next tick, or
/// used as the attach size if the surface comes back first.
#[derive(Debug, Default)]
pub(crate) struct PendingResize {
    size: Option<SurfaceSize>,
}

impl PendingResize {
    pub(crate) fn queue(&mut self, size: SurfaceSize) {
        self.size = Some(size);
    }

    #[cfg(test)]
    pub(crate) fn get(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// Attaches an inactive surface at the queued size, or at `current` when
    /// nothing is queued.
    ///
    /// An active surface is left alone and keeps the queued size for the next
    /// frame.
    pub(crate) fn attach<B, P>(
        &mut self,
        surface: &mut RenderSurface<B, P>,
        current: Option<SurfaceSize>,
    ) -> Result<(), AttachError>
    where
        B: GraphicsBackend,
        P: FramePresenter<B>,
    {
        if surface.is_active() {
            return Ok(());
        }

        match self.size.take().or(current) {
            Some(size) => surface.attach(size),
            None => Ok(()),
        }
    }

    /// Applies the queued size, then ticks.
    ///
    /// A swapchain timeout skips the frame and reports [`FrameOutcome::Idle`].
    pub(crate) fn frame<B, P>(
        &mut self,
        surface: &mut RenderSurface<B, P>,
    ) -> Result<FrameOutcome, TickError>
    where
        B: GraphicsBackend,
        P: FramePresenter<B>,
    {
        if let Some(size) = self.size.take() {
            surface.resize(size)?;
        }

        match surface.tick() {
            Err(TickError::Frame(FrameError::Timeout)) => {
                log::warn!("swapchain acquire timed out; skipping frame");
                Ok(FrameOutcome::Idle)
            }
            other => other,
        }
    }
}
