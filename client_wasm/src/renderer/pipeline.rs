use super::shaders::FIELD_SHADER;
use crate::instances::{DotInstance, LinkInstance};
use crate::mesh::Vertex;
use wgpu::*;

pub struct PipelineState {
    pub backdrop_pipeline: RenderPipeline,
    pub dot_pipeline: RenderPipeline,
    pub link_pipeline: RenderPipeline,
    pub view_layout: BindGroupLayout,
}

const QUAD_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &[VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: VertexFormat::Float32x2,
    }],
};

pub fn create_pipelines(device: &Device, format: TextureFormat) -> PipelineState {
    // 1. View Bind Group Layout
    let view_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("View Bind Group Layout"),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::VERTEX_FRAGMENT,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Field Shader"),
        source: ShaderSource::Wgsl(FIELD_SHADER.into()),
    });

    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Field Pipeline Layout"),
        bind_group_layouts: &[&view_layout],
        push_constant_ranges: &[],
    });

    // 2. Backdrop Pipeline (no vertex buffers)
    let backdrop_pipeline =
        create_pipeline(device, &layout, &shader, format, "Backdrop", "backdrop", &[]);

    // 3. Dot Pipeline
    let dot_instance_layout = VertexBufferLayout {
        array_stride: std::mem::size_of::<DotInstance>() as u64,
        step_mode: VertexStepMode::Instance,
        attributes: &[
            VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: VertexFormat::Float32x4, // center_radius
            },
            VertexAttribute {
                offset: std::mem::size_of::<[f32; 4]>() as u64,
                shader_location: 2,
                format: VertexFormat::Float32x4, // color
            },
        ],
    };
    let dot_pipeline = create_pipeline(
        device,
        &layout,
        &shader,
        format,
        "Dot",
        "dot",
        &[QUAD_LAYOUT, dot_instance_layout],
    );

    // 4. Link Pipeline
    let link_instance_layout = VertexBufferLayout {
        array_stride: std::mem::size_of::<LinkInstance>() as u64,
        step_mode: VertexStepMode::Instance,
        attributes: &[
            VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: VertexFormat::Float32x4, // endpoints
            },
            VertexAttribute {
                offset: std::mem::size_of::<[f32; 4]>() as u64,
                shader_location: 2,
                format: VertexFormat::Float32x4, // color
            },
            VertexAttribute {
                offset: std::mem::size_of::<[f32; 8]>() as u64,
                shader_location: 3,
                format: VertexFormat::Float32, // width
            },
        ],
    };
    let link_pipeline = create_pipeline(
        device,
        &layout,
        &shader,
        format,
        "Link",
        "link",
        &[QUAD_LAYOUT, link_instance_layout],
    );

    PipelineState {
        backdrop_pipeline,
        dot_pipeline,
        link_pipeline,
        view_layout,
    }
}

fn create_pipeline(
    device: &Device,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    format: TextureFormat,
    label: &str,
    stage: &str,
    buffers: &[VertexBufferLayout],
) -> RenderPipeline {
    let vs_entry = format!("vs_{stage}");
    let fs_entry = format!("fs_{stage}");

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some(&vs_entry),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some(&fs_entry),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
