//! GPU device + surface resources.
//!
//! This module is responsible for:
//! - the [`GraphicsBackend`] seam the surface core builds on
//! - creating the wgpu device, swapchain, backbuffer and render target view
//! - classifying presentation failures into [`FrameError`] kinds

mod backend;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use backend::{GraphicsBackend, SurfaceResources};
pub use error::{AttachError, FrameError, TickError};
pub use frame::WgpuFrame;
pub use gpu::{WgpuBackbuffer, WgpuBackend, WgpuDevice, WgpuRenderTarget, WgpuSwapchain};
pub use init::{GpuInit, PresentConfig};
