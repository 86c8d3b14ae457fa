use thiserror::Error;

/// Failure while building surface resources.
///
/// Attach failures are fatal: nothing is retried, because a device that could
/// not be created is not expected to appear without an external change.
#[derive(Debug, Error)]
pub enum AttachError {
    #[error("window has no presentation surface: {0}")]
    NoPresentationSurface(String),

    #[error("no suitable GPU adapter: {0}")]
    NoAdapter(String),

    #[error("failed to create graphics device: {0}")]
    DeviceCreation(String),

    #[error("failed to create swapchain: {0}")]
    SwapchainCreation(String),

    #[error("renderer failed to initialize: {0:#}")]
    Presenter(anyhow::Error),

    #[error("surface has been closed")]
    Closed,
}

/// Failure raised while producing or presenting a frame.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The swapchain no longer matches its target and must be rebuilt.
    #[error("render target must be recreated")]
    RecreateTarget,

    /// The graphics device was lost (driver reset, GPU removed).
    #[error("graphics device was removed")]
    DeviceRemoved,

    #[error("timed out acquiring the next swapchain image")]
    Timeout,

    #[error("out of GPU memory")]
    OutOfMemory,

    #[error("presentation failed: {0}")]
    Presentation(String),

    #[error("renderer failed: {0:#}")]
    Renderer(anyhow::Error),
}

impl FrameError {
    /// Whether a full detach/attach cycle is expected to clear this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FrameError::RecreateTarget | FrameError::DeviceRemoved)
    }

    /// Classifies an error returned by a presenter.
    ///
    /// Presenters may return a `FrameError` through `anyhow` to report device
    /// loss they detected themselves; anything else is a renderer failure.
    pub fn from_presenter(err: anyhow::Error) -> Self {
        match err.downcast::<FrameError>() {
            Ok(frame_err) => frame_err,
            Err(other) => FrameError::Renderer(other),
        }
    }
}

impl From<wgpu::SurfaceError> for FrameError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => FrameError::RecreateTarget,
            wgpu::SurfaceError::Timeout => FrameError::Timeout,
            wgpu::SurfaceError::OutOfMemory => FrameError::OutOfMemory,
            wgpu::SurfaceError::Other => {
                FrameError::Presentation("unspecified swapchain error".to_string())
            }
        }
    }
}

/// Error returned from a surface tick.
#[derive(Debug, Error)]
pub enum TickError {
    /// Rebuilding the surface after a recoverable failure did not succeed.
    #[error("surface recovery failed: {0}")]
    Attach(#[from] AttachError),

    /// A frame failure the surface does not recover from.
    #[error(transparent)]
    Frame(#[from] FrameError),
}
