//! Glaze engine crate.
//!
//! A GPU render surface bound to a desktop window that rebuilds itself on
//! resize and device loss, plus the winit host that drives it.

pub mod coords;
pub mod device;
pub mod logging;
pub mod surface;
pub mod time;
pub mod window;
