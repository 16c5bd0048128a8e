//! WebGPU surface: backdrop, particles and proximity links

pub mod draw;
pub mod init;
pub mod pipeline;
pub mod resources;
pub mod shaders;

use crate::instances::{DotInstance, LinkInstance};
use crate::mesh::Mesh;
use crate::viewport::ViewUniform;
use field_core::{FrameScene, Params, RenderError, Surface};
use resources::InstanceBuffer;
use wgpu::*;

pub struct PrimarySurface {
    pub device: Device,
    pub queue: Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: SurfaceConfiguration,

    // Pipelines
    pub backdrop_pipeline: RenderPipeline,
    pub dot_pipeline: RenderPipeline,
    pub link_pipeline: RenderPipeline,

    // Bind Groups
    pub view_bind_group: BindGroup,

    // Resources
    pub view_buffer: Buffer,
    pub quad: Mesh,
    pub dots: InstanceBuffer,
    pub links: InstanceBuffer,

    // State
    pub last_view: Option<ViewUniform>,
}

impl PrimarySurface {
    pub async fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Self, RenderError> {
        let ctx = init::init_wgpu(canvas).await?;
        let pipes = pipeline::create_pipelines(&ctx.device, ctx.config.format);

        let view_buffer = resources::create_view_buffer(&ctx.device);
        let view_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("View Bind Group"),
            layout: &pipes.view_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        });

        // Sized for the default field; regrown if a config asks for more
        let n = Params::PARTICLE_COUNT;
        let dots = InstanceBuffer::new::<DotInstance>(&ctx.device, "Dot Instance Buffer", n);
        let links =
            InstanceBuffer::new::<LinkInstance>(&ctx.device, "Link Instance Buffer", n * (n - 1) / 2);

        let quad = Mesh::quad(&ctx.device);

        Ok(Self {
            device: ctx.device,
            queue: ctx.queue,
            surface: ctx.surface,
            surface_config: ctx.config,
            backdrop_pipeline: pipes.backdrop_pipeline,
            dot_pipeline: pipes.dot_pipeline,
            link_pipeline: pipes.link_pipeline,
            view_bind_group,
            view_buffer,
            quad,
            dots,
            links,
            last_view: None,
        })
    }
}

impl Surface for PrimarySurface {
    fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
        }
    }

    fn draw(&mut self, scene: &FrameScene) -> Result<(), RenderError> {
        draw::draw_frame(self, scene)
    }
}
