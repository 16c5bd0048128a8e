use crate::viewport::ViewUniform;
use wgpu::*;

/// Vertex buffer sized for `capacity` instances, regrown on demand
pub struct InstanceBuffer {
    pub buffer: Buffer,
    pub capacity: usize,
    pub len: u32,
    label: &'static str,
    stride: usize,
}

impl InstanceBuffer {
    pub fn new<T: bytemuck::Pod>(device: &Device, label: &'static str, capacity: usize) -> Self {
        let stride = std::mem::size_of::<T>();
        let capacity = capacity.max(1);
        Self {
            buffer: create_instance_buffer(device, label, stride, capacity),
            capacity,
            len: 0,
            label,
            stride,
        }
    }

    /// Upload `items`, growing the buffer when they no longer fit
    pub fn write<T: bytemuck::Pod>(&mut self, device: &Device, queue: &Queue, items: &[T]) {
        if items.len() > self.capacity {
            self.capacity = items.len().next_power_of_two();
            self.buffer = create_instance_buffer(device, self.label, self.stride, self.capacity);
            log::debug!("{} grown to {} instances", self.label, self.capacity);
        }
        if !items.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
        }
        self.len = items.len() as u32;
    }
}

fn create_instance_buffer(device: &Device, label: &str, stride: usize, capacity: usize) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some(label),
        size: (stride * capacity) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub fn create_view_buffer(device: &Device) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some("View Uniform Buffer"),
        size: std::mem::size_of::<ViewUniform>() as u64,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
