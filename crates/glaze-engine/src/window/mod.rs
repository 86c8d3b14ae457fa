//! winit host.
//!
//! Owns the event loop and the window, and drives a [`RenderSurface`](crate::surface::RenderSurface)
//! from window lifecycle events.

mod pending;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
