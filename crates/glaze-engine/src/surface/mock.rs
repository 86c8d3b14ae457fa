//! Scripted in-memory backend for exercising the surface state machine.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::coords::{SurfaceSize, Viewport};
use crate::device::{AttachError, FrameError, GraphicsBackend, PresentConfig, SurfaceResources};
use crate::time::FrameTime;

use super::FramePresenter;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Kind {
    Device,
    Swapchain,
    Backbuffer,
    View,
}

impl Kind {
    fn created(self) -> &'static str {
        match self {
            Kind::Device => "create_device",
            Kind::Swapchain => "create_swapchain",
            Kind::Backbuffer => "create_backbuffer",
            Kind::View => "create_view",
        }
    }

    fn released(self) -> &'static str {
        match self {
            Kind::Device => "release_device",
            Kind::Swapchain => "release_swapchain",
            Kind::Backbuffer => "release_backbuffer",
            Kind::View => "release_view",
        }
    }
}

/// Everything the mock observed, plus the failures it has been told to inject.
#[derive(Default)]
pub struct LedgerState {
    next_id: u64,
    live: usize,
    events: Vec<&'static str>,
    viewports: Vec<Viewport>,
    swapchain_sizes: Vec<SurfaceSize>,
    sync_intervals: Vec<u32>,

    pub no_window: bool,
    pub fail_create: Option<Kind>,
    pub fail_present: VecDeque<FrameError>,
}

/// Shared view of a [`LedgerState`], held by the test and by the mock objects.
#[derive(Clone, Default)]
pub struct Ledger(Rc<RefCell<LedgerState>>);

impl Ledger {
    pub fn script(&self, f: impl FnOnce(&mut LedgerState)) {
        f(&mut self.0.borrow_mut());
    }

    /// Resources created and not yet dropped.
    pub fn live(&self) -> usize {
        self.0.borrow().live
    }

    pub fn event_kinds(&self) -> Vec<&'static str> {
        self.0.borrow().events.clone()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.0.borrow().events.iter().filter(|e| **e == kind).count()
    }

    pub fn clear_events(&self) {
        self.0.borrow_mut().events.clear();
    }

    pub fn viewports(&self) -> Vec<Viewport> {
        self.0.borrow().viewports.clone()
    }

    pub fn swapchain_sizes(&self) -> Vec<SurfaceSize> {
        self.0.borrow().swapchain_sizes.clone()
    }

    pub fn sync_intervals(&self) -> Vec<u32> {
        self.0.borrow().sync_intervals.clone()
    }

    fn push(&self, event: &'static str) {
        self.0.borrow_mut().events.push(event);
    }

    fn allocate(&self, kind: Kind) -> Result<MockResource, AttachError> {
        let mut state = self.0.borrow_mut();
        if state.fail_create == Some(kind) {
            let reason = format!("scripted {kind:?} failure");
            return Err(match kind {
                Kind::Device => AttachError::DeviceCreation(reason),
                _ => AttachError::SwapchainCreation(reason),
            });
        }

        state.next_id += 1;
        state.live += 1;
        state.events.push(kind.created());

        Ok(MockResource {
            kind,
            id: state.next_id,
            ledger: self.clone(),
        })
    }
}

/// A GPU object stand-in. Every instance has a unique id.
pub struct MockResource {
    kind: Kind,
    id: u64,
    ledger: Ledger,
}

impl MockResource {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for MockResource {
    fn drop(&mut self) {
        let mut state = self.ledger.0.borrow_mut();
        state.live -= 1;
        state.events.push(self.kind.released());
    }
}

pub struct MockFrame {
    pub viewport: Viewport,
    pub device_id: u64,
}

pub struct MockBackend {
    ledger: Ledger,
}

impl MockBackend {
    pub fn new() -> (Self, Ledger) {
        let ledger = Ledger::default();
        (Self { ledger: ledger.clone() }, ledger)
    }
}

impl GraphicsBackend for MockBackend {
    type Device = MockResource;
    type Swapchain = MockResource;
    type Backbuffer = MockResource;
    type RenderTargetView = MockResource;
    type Frame<'a> = MockFrame;

    fn create_device(&mut self) -> Result<MockResource, AttachError> {
        if self.ledger.0.borrow().no_window {
            return Err(AttachError::NoPresentationSurface("no window".to_string()));
        }
        self.ledger.allocate(Kind::Device)
    }

    fn create_swapchain(
        &mut self,
        _device: &MockResource,
        size: SurfaceSize,
        _config: &PresentConfig,
    ) -> Result<MockResource, AttachError> {
        let swapchain = self.ledger.allocate(Kind::Swapchain)?;
        self.ledger.0.borrow_mut().swapchain_sizes.push(size);
        Ok(swapchain)
    }

    fn create_backbuffer(
        &mut self,
        _device: &MockResource,
        _swapchain: &MockResource,
    ) -> Result<MockResource, AttachError> {
        self.ledger.allocate(Kind::Backbuffer)
    }

    fn create_render_target_view(
        &mut self,
        _device: &MockResource,
        _backbuffer: &MockResource,
    ) -> Result<MockResource, AttachError> {
        self.ledger.allocate(Kind::View)
    }

    fn begin_frame<'a>(
        &mut self,
        resources: &'a SurfaceResources<Self>,
        viewport: Viewport,
    ) -> Result<MockFrame, FrameError> {
        let mut state = self.ledger.0.borrow_mut();
        state.events.push("begin_frame");
        state.viewports.push(viewport);

        Ok(MockFrame {
            viewport,
            device_id: resources.device().id(),
        })
    }

    fn end_frame<'a>(
        &mut self,
        _resources: &'a SurfaceResources<Self>,
        _frame: MockFrame,
        sync_interval: u32,
    ) -> Result<(), FrameError> {
        let mut state = self.ledger.0.borrow_mut();
        if let Some(err) = state.fail_present.pop_front() {
            return Err(err);
        }

        state.events.push("present");
        state.sync_intervals.push(sync_interval);
        Ok(())
    }
}

/// Presenter that records its hook calls into the ledger.
pub struct MockPresenter {
    ledger: Ledger,
    attached_device: Option<u64>,

    pub last_viewport: Option<Viewport>,
    pub fail_attach: bool,
    pub fail_render: VecDeque<anyhow::Error>,
}

impl MockPresenter {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            attached_device: None,
            last_viewport: None,
            fail_attach: false,
            fail_render: VecDeque::new(),
        }
    }
}

impl FramePresenter<MockBackend> for MockPresenter {
    fn on_attach(&mut self, resources: &SurfaceResources<MockBackend>) -> anyhow::Result<()> {
        self.ledger.push("presenter_attach");
        if self.fail_attach {
            anyhow::bail!("scripted presenter failure");
        }
        self.attached_device = Some(resources.device().id());
        Ok(())
    }

    fn on_detach(&mut self) {
        self.ledger.push("presenter_detach");
        self.attached_device = None;
    }

    fn render_frame(&mut self, frame: &mut MockFrame, _time: FrameTime) -> anyhow::Result<()> {
        self.ledger.push("render");
        assert_eq!(Some(frame.device_id), self.attached_device, "rendering on a stale device");

        if let Some(err) = self.fail_render.pop_front() {
            return Err(err);
        }

        self.last_viewport = Some(frame.viewport);
        Ok(())
    }
}
