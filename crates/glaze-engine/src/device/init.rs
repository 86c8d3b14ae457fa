/// Presentation parameters for a render surface.
///
/// The defaults describe the only configuration the surface is built for:
/// one buffer, 60 Hz hint, BGRA8, present on vblank. Backbuffers are always
/// single-sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentConfig {
    /// Number of swapchain buffers.
    ///
    /// Maps to wgpu's desired maximum frame latency.
    pub buffer_count: u32,

    /// Expected display refresh rate.
    ///
    /// This is a hint used for frame pacing diagnostics; the actual cadence is
    /// set by the display through vsync.
    pub refresh_rate_hz: u32,

    /// Preferred swapchain format. Falls back to the first supported format.
    pub format: wgpu::TextureFormat,

    /// Vertical blanks to wait per present. 1 waits for vblank, 0 does not.
    pub sync_interval: u32,

    /// Optional alpha mode preference for the swapchain.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
}

impl PresentConfig {
    /// Present mode implied by `sync_interval`.
    pub fn present_mode(&self) -> wgpu::PresentMode {
        present_mode_for(self.sync_interval)
    }
}

impl Default for PresentConfig {
    fn default() -> Self {
        Self {
            buffer_count: 1,
            refresh_rate_hz: 60,
            format: wgpu::TextureFormat::Bgra8Unorm,
            sync_interval: 1,
            alpha_mode: None,
        }
    }
}

/// Maps a present interval onto a wgpu present mode.
///
/// wgpu has no multi-blank intervals; anything above zero waits one vblank.
pub(crate) fn present_mode_for(sync_interval: u32) -> wgpu::PresentMode {
    if sync_interval == 0 {
        wgpu::PresentMode::AutoNoVsync
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Device-creation parameters for the wgpu backend.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Adapter preference.
    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features.
    ///
    /// Favor an empty set for portability unless a feature is strictly necessary.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_single_buffered_vsync() {
        let cfg = PresentConfig::default();
        assert_eq!(cfg.buffer_count, 1);
        assert_eq!(cfg.refresh_rate_hz, 60);
        assert_eq!(cfg.format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(cfg.present_mode(), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn zero_sync_interval_disables_vsync() {
        let cfg = PresentConfig { sync_interval: 0, ..Default::default() };
        assert_eq!(cfg.present_mode(), wgpu::PresentMode::AutoNoVsync);
        assert_eq!(present_mode_for(2), wgpu::PresentMode::Fifo);
    }
}
