/// Lifecycle state of a render surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceState {
    /// No resources; ticks are ignored.
    Inactive,
    /// Resources are built and ticks render.
    Active,
    /// Finally detached; nothing is serviced anymore.
    Closed,
}

/// Outcome of a single tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The surface was not active; nothing ran.
    Idle,
    /// A frame was rendered and presented.
    Presented,
    /// A recoverable failure occurred and the surface was rebuilt.
    Recovered,
}

/// Lifetime counters for a render surface.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceStats {
    pub frames_presented: u64,
    pub attaches: u64,
    pub recoveries: u64,
}
