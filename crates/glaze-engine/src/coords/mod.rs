//! Size and viewport types shared by the surface core and its backends.
//!
//! Everything here is in device (physical) pixels. Logical sizes only exist at
//! the host boundary, converted once through [`SurfaceSize::from_logical`].

mod size;
mod viewport;

pub use size::SurfaceSize;
pub use viewport::Viewport;
