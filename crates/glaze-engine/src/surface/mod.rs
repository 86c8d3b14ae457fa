//! Render surface lifecycle.
//!
//! [`RenderSurface`] owns the GPU resources bound to a window, rebuilds them on
//! resize and device loss, and drives the begin → render → end frame chain.
//! Hosts call `attach` / `detach` / `resize` / `tick` from their own event loop.

mod presenter;
mod render_surface;
mod state;

#[cfg(test)]
pub(crate) mod mock;

pub use presenter::FramePresenter;
pub use render_surface::RenderSurface;
pub use state::{FrameOutcome, SurfaceState, SurfaceStats};
