use crate::coords::Viewport;

/// One frame being recorded on the wgpu backend.
///
/// The render target view and viewport are already chosen; presenters open
/// passes through [`WgpuFrame::begin_render_pass`] so both are bound.
/// Dropping a frame without presenting it discards the recorded commands.
pub struct WgpuFrame<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub viewport: Viewport,
    pub encoder: wgpu::CommandEncoder,
    view: &'a wgpu::TextureView,
}

impl<'a> WgpuFrame<'a> {
    pub(crate) fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        format: wgpu::TextureFormat,
        viewport: Viewport,
        view: &'a wgpu::TextureView,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("glaze frame encoder"),
        });

        Self {
            device,
            queue,
            format,
            viewport,
            encoder,
            view,
        }
    }

    pub(crate) fn into_encoder(self) -> wgpu::CommandEncoder {
        self.encoder
    }

    /// Render target view of the backbuffer.
    pub fn view(&self) -> &wgpu::TextureView {
        self.view
    }

    /// Opens a render pass on the backbuffer with the frame viewport applied.
    pub fn begin_render_pass(
        &mut self,
        label: &str,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> wgpu::RenderPass<'_> {
        let view = self.view;
        let viewport = self.viewport;

        let mut pass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if viewport.is_valid() {
            pass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
        }

        pass
    }
}
