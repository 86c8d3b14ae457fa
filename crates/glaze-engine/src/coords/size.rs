/// Surface dimensions in device pixels.
///
/// Swapchain buffers are sized from this at creation time, so every change of
/// `SurfaceSize` implies a full surface rebuild.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Converts a logical layout size into device pixels.
    ///
    /// Each axis is `ceil(logical * scale)`, clamped at zero. Non-finite inputs
    /// collapse to zero.
    pub fn from_logical(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width: scale_axis(width, scale),
            height: scale_axis(height, scale),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Same size with each axis raised to at least one pixel.
    ///
    /// wgpu refuses zero-sized surfaces and textures.
    #[inline]
    pub fn at_least_one(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

fn scale_axis(logical: f64, scale: f64) -> u32 {
    let px = (logical * scale).ceil();
    if px.is_finite() && px > 0.0 {
        // `as` saturates at u32::MAX.
        px as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_logical_identity_scale() {
        assert_eq!(SurfaceSize::from_logical(800.0, 600.0, 1.0), SurfaceSize::new(800, 600));
    }

    #[test]
    fn from_logical_rounds_up() {
        // 801 * 1.25 = 1001.25, 601 * 1.25 = 751.25
        assert_eq!(SurfaceSize::from_logical(801.0, 601.0, 1.25), SurfaceSize::new(1002, 752));
        assert_eq!(SurfaceSize::from_logical(0.5, 0.1, 1.0), SurfaceSize::new(1, 1));
    }

    #[test]
    fn from_logical_common_scales() {
        assert_eq!(SurfaceSize::from_logical(400.0, 300.0, 1.5), SurfaceSize::new(600, 450));
        assert_eq!(SurfaceSize::from_logical(400.0, 300.0, 2.0), SurfaceSize::new(800, 600));
        assert_eq!(SurfaceSize::from_logical(333.0, 222.0, 1.5), SurfaceSize::new(500, 333));
    }

    #[test]
    fn from_logical_clamps_negative_and_nan() {
        assert_eq!(SurfaceSize::from_logical(-10.0, 20.0, 2.0), SurfaceSize::new(0, 40));
        assert_eq!(SurfaceSize::from_logical(f64::NAN, 5.0, 1.0), SurfaceSize::new(0, 5));
        assert_eq!(SurfaceSize::from_logical(5.0, f64::INFINITY, 1.0), SurfaceSize::new(5, 0));
    }

    #[test]
    fn empty_and_at_least_one() {
        let zero = SurfaceSize::new(0, 300);
        assert!(zero.is_empty());
        assert_eq!(zero.at_least_one(), SurfaceSize::new(1, 300));
        assert!(!SurfaceSize::new(1, 1).is_empty());
    }
}
