use anyhow::Context;
use bytemuck::{Pod, Zeroable};
use glaze_engine::device::{SurfaceResources, WgpuBackend, WgpuFrame};
use glaze_engine::surface::FramePresenter;
use glaze_engine::time::FrameTime;
use wgpu::util::DeviceExt;

/// Radians per second.
const SPIN_SPEED: f32 = 1.2;

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.05,
    g: 0.06,
    b: 0.09,
    a: 1.0,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    pos: [f32; 2],
    color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x3  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const TRIANGLE: [Vertex; 3] = [
    Vertex { pos: [0.0, 0.6], color: [0.95, 0.35, 0.25] },
    Vertex { pos: [-0.52, -0.3], color: [0.25, 0.85, 0.45] },
    Vertex { pos: [0.52, -0.3], color: [0.25, 0.45, 0.95] },
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpinUniform {
    angle: f32,
    aspect: f32,
    _pad: [f32; 2], // 16-byte alignment
}

/// GPU objects tied to one attach; rebuilt every time the surface is.
struct SpinnerGpu {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform: wgpu::Buffer,
    vertices: wgpu::Buffer,
}

/// Sample presenter: a rotating triangle on a dark background.
#[derive(Default)]
pub struct Spinner {
    gpu: Option<SpinnerGpu>,
    angle: f32,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FramePresenter<WgpuBackend> for Spinner {
    fn on_attach(&mut self, resources: &SurfaceResources<WgpuBackend>) -> anyhow::Result<()> {
        let device = resources.device().device();
        let format = resources.swapchain().format();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spinner shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/spinner.wgsl").into()),
        });

        let uniform_size = std::num::NonZeroU64::new(std::mem::size_of::<SpinUniform>() as u64)
            .context("spin uniform has zero size")?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spinner bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(uniform_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("spinner pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spinner pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spinner uniform"),
            size: uniform_size.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spinner bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });

        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spinner vertices"),
            contents: bytemuck::cast_slice(&TRIANGLE),
            usage: wgpu::BufferUsages::VERTEX,
        });

        self.gpu = Some(SpinnerGpu {
            pipeline,
            bind_group,
            uniform,
            vertices,
        });

        let adapter = resources.device().adapter_info();
        log::debug!("spinner resources created for {format:?} on {}", adapter.name);
        Ok(())
    }

    fn on_detach(&mut self) {
        self.gpu = None;
    }

    fn render_frame(&mut self, frame: &mut WgpuFrame<'_>, time: FrameTime) -> anyhow::Result<()> {
        let gpu = self
            .gpu
            .as_ref()
            .context("spinner rendered without being attached")?;

        self.angle = (self.angle + time.dt * SPIN_SPEED) % std::f32::consts::TAU;

        let u = SpinUniform {
            angle: self.angle,
            aspect: frame.viewport.aspect(),
            _pad: [0.0; 2],
        };
        frame.queue.write_buffer(&gpu.uniform, 0, bytemuck::bytes_of(&u));

        let mut pass = frame.begin_render_pass("spinner pass", wgpu::LoadOp::Clear(CLEAR));
        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.vertices.slice(..));
        pass.draw(0..3, 0..1);

        Ok(())
    }
}
