use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use raw_window_handle::HasWindowHandle;
use winit::window::Window;

use crate::coords::{SurfaceSize, Viewport};

use super::init::present_mode_for;
use super::surface;
use super::{AttachError, FrameError, GpuInit, GraphicsBackend, PresentConfig, SurfaceResources, WgpuFrame};

/// wgpu implementation of [`GraphicsBackend`], bound to one winit window.
///
/// Every attach builds a fresh instance, adapter and device, so a lost device
/// is never reused.
pub struct WgpuBackend {
    window: Arc<Window>,
    init: GpuInit,
}

impl WgpuBackend {
    pub fn new(window: Arc<Window>, init: GpuInit) -> Self {
        Self { window, init }
    }

    fn create_surface(
        &self,
        instance: &wgpu::Instance,
    ) -> Result<wgpu::Surface<'static>, AttachError> {
        instance
            .create_surface(Arc::clone(&self.window))
            .map_err(|e| AttachError::NoPresentationSurface(e.to_string()))
    }
}

/// Logical device, its queue, and the objects needed to build swapchains for it.
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter: wgpu::Adapter,
    instance: wgpu::Instance,

    /// Set from the device-lost callback.
    lost: Arc<AtomicBool>,
}

impl WgpuDevice {
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Acquire)
    }
}

/// Configured window surface.
pub struct WgpuSwapchain {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl WgpuSwapchain {
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        self.config.present_mode
    }

    /// Configured extent. Never zero, even for an empty surface.
    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.config.width,
            height: self.config.height,
            depth_or_array_layers: 1,
        }
    }
}

/// Texture frames are rendered into before being copied to the swapchain image.
pub struct WgpuBackbuffer {
    texture: wgpu::Texture,
}

impl WgpuBackbuffer {
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }
}

impl Drop for WgpuBackbuffer {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}

pub struct WgpuRenderTarget {
    view: wgpu::TextureView,
}

impl WgpuRenderTarget {
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl GraphicsBackend for WgpuBackend {
    type Device = WgpuDevice;
    type Swapchain = WgpuSwapchain;
    type Backbuffer = WgpuBackbuffer;
    type RenderTargetView = WgpuRenderTarget;
    type Frame<'a> = WgpuFrame<'a>;

    fn create_device(&mut self) -> Result<WgpuDevice, AttachError> {
        self.window
            .window_handle()
            .map_err(|e| AttachError::NoPresentationSurface(e.to_string()))?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Only steers adapter selection; each swapchain creates its own surface.
        let probe = self.create_surface(&instance)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: self.init.power_preference,
            compatible_surface: Some(&probe),
            force_fallback_adapter: false,
        }))
        .map_err(|e| AttachError::NoAdapter(e.to_string()))?;

        drop(probe);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("glaze device"),
            required_features: self.init.required_features,
            required_limits: self.init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| AttachError::DeviceCreation(e.to_string()))?;

        let lost = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&lost);
        device.set_device_lost_callback(move |reason, message| {
            match reason {
                wgpu::DeviceLostReason::Destroyed => {
                    log::debug!("graphics device destroyed: {message}");
                }
                _ => log::warn!("graphics device lost ({reason:?}): {message}"),
            }
            flag.store(true, Ordering::Release);
        });

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        Ok(WgpuDevice {
            device,
            queue,
            adapter,
            instance,
            lost,
        })
    }

    fn create_swapchain(
        &mut self,
        device: &WgpuDevice,
        size: SurfaceSize,
        config: &PresentConfig,
    ) -> Result<WgpuSwapchain, AttachError> {
        let surface = self.create_surface(&device.instance)?;
        let caps = surface.get_capabilities(&device.adapter);

        let format = surface::choose_surface_format(&caps, config.format).ok_or_else(|| {
            AttachError::SwapchainCreation("no supported surface formats".to_string())
        })?;

        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(AttachError::SwapchainCreation(
                "surface images cannot be a copy destination".to_string(),
            ));
        }

        if size.is_empty() {
            log::debug!("empty surface {}x{}; configuring a 1x1 swapchain", size.width, size.height);
        }
        let extent = size.at_least_one();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
            format,
            width: extent.width,
            height: extent.height,
            present_mode: config.present_mode(),
            alpha_mode: surface::choose_alpha_mode(&caps, config.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: config.buffer_count.max(1),
        };

        surface.configure(&device.device, &surface_config);

        log::debug!(
            "swapchain configured: {}x{} {:?} {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            surface_config.present_mode
        );

        Ok(WgpuSwapchain {
            surface,
            config: surface_config,
        })
    }

    fn create_backbuffer(
        &mut self,
        device: &WgpuDevice,
        swapchain: &WgpuSwapchain,
    ) -> Result<WgpuBackbuffer, AttachError> {
        let texture = device.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glaze backbuffer"),
            size: swapchain.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: swapchain.config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        Ok(WgpuBackbuffer { texture })
    }

    fn create_render_target_view(
        &mut self,
        _device: &WgpuDevice,
        backbuffer: &WgpuBackbuffer,
    ) -> Result<WgpuRenderTarget, AttachError> {
        let view = backbuffer
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok(WgpuRenderTarget { view })
    }

    fn begin_frame<'a>(
        &mut self,
        resources: &'a SurfaceResources<Self>,
        viewport: Viewport,
    ) -> Result<WgpuFrame<'a>, FrameError> {
        let device = resources.device();
        if device.is_lost() {
            return Err(FrameError::DeviceRemoved);
        }

        Ok(WgpuFrame::new(
            &device.device,
            &device.queue,
            resources.swapchain().format(),
            viewport,
            resources.view().view(),
        ))
    }

    fn end_frame<'a>(
        &mut self,
        resources: &'a SurfaceResources<Self>,
        frame: WgpuFrame<'a>,
        sync_interval: u32,
    ) -> Result<(), FrameError> {
        let device = resources.device();
        let swapchain = resources.swapchain();
        debug_assert_eq!(swapchain.present_mode(), present_mode_for(sync_interval));

        if device.is_lost() {
            return Err(FrameError::DeviceRemoved);
        }

        let surface_texture = swapchain.surface.get_current_texture()?;
        if surface_texture.suboptimal {
            log::debug!("swapchain image is suboptimal; presenting anyway");
        }

        let mut encoder = frame.into_encoder();
        encoder.copy_texture_to_texture(
            resources.backbuffer().texture.as_image_copy(),
            surface_texture.texture.as_image_copy(),
            swapchain.extent(),
        );

        device.queue.submit(std::iter::once(encoder.finish()));

        self.window.pre_present_notify();
        surface_texture.present();

        Ok(())
    }
}
