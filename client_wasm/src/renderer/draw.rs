use super::PrimarySurface;
use crate::instances::{dot_instances, link_instances};
use crate::viewport::ViewUniform;
use field_core::{FrameScene, RenderError};
use wgpu::*;

pub fn draw_frame(renderer: &mut PrimarySurface, scene: &FrameScene) -> Result<(), RenderError> {
    let output = match renderer.surface.get_current_texture() {
        Ok(output) => output,
        // Canvas resized or context lost between frames: reconfigure, skip this one
        Err(SurfaceError::Outdated | SurfaceError::Lost) => {
            renderer.surface.configure(&renderer.device, &renderer.surface_config);
            return Ok(());
        }
        Err(e) => {
            return Err(RenderError::Draw(format!(
                "Failed to get current texture: {:?}",
                e
            )))
        }
    };
    let view = output.texture.create_view(&TextureViewDescriptor::default());

    update_buffers(renderer, scene);

    let mut encoder = renderer
        .device
        .create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Field Encoder"),
        });

    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Field Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::TRANSPARENT),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_bind_group(0, &renderer.view_bind_group, &[]);

        // 1. Backdrop
        pass.set_pipeline(&renderer.backdrop_pipeline);
        pass.draw(0..3, 0..1);

        // 2. Dots, then links on top
        pass.set_vertex_buffer(0, renderer.quad.vertex_buffer.slice(..));
        pass.set_index_buffer(renderer.quad.index_buffer.slice(..), IndexFormat::Uint16);

        if renderer.dots.len > 0 {
            pass.set_pipeline(&renderer.dot_pipeline);
            pass.set_vertex_buffer(1, renderer.dots.buffer.slice(..));
            pass.draw_indexed(0..renderer.quad.index_count, 0, 0..renderer.dots.len);
        }

        if renderer.links.len > 0 {
            pass.set_pipeline(&renderer.link_pipeline);
            pass.set_vertex_buffer(1, renderer.links.buffer.slice(..));
            pass.draw_indexed(0..renderer.quad.index_count, 0, 0..renderer.links.len);
        }
    }

    renderer.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    Ok(())
}

fn update_buffers(renderer: &mut PrimarySurface, scene: &FrameScene) {
    let uniform = ViewUniform::new(&scene.bounds, &scene.backdrop);
    let needs_update = renderer
        .last_view
        .map(|last| bytemuck::bytes_of(&last) != bytemuck::bytes_of(&uniform))
        .unwrap_or(true);
    if needs_update {
        renderer
            .queue
            .write_buffer(&renderer.view_buffer, 0, bytemuck::bytes_of(&uniform));
        renderer.last_view = Some(uniform);
    }

    let dots = dot_instances(scene);
    renderer.dots.write(&renderer.device, &renderer.queue, &dots);

    let links = link_instances(scene);
    renderer.links.write(&renderer.device, &renderer.queue, &links);
}
