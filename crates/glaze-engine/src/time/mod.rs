//! Frame timing.
//!
//! One `FrameClock` per render surface; the surface ticks it once per frame
//! and hands the resulting `FrameTime` to its presenter.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
