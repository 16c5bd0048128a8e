//! View uniform for the GPU surface
//!
//! Pixel-space orthographic projection (origin top-left, y down, like the 2D
//! canvas) plus the backdrop gradient parameters.

use field_core::{Backdrop, Bounds};
use glam::Mat4;

/// View uniform data (matches WGSL `View`, 256-byte aligned)
#[repr(C, align(256))]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform {
    view_proj: [[f32; 4]; 4],          // 64 bytes
    backdrop_center_radius: [f32; 4], // x, y, radius, unused
    backdrop_inner: [f32; 4],
    backdrop_outer: [f32; 4],
    _padding: [f32; 36], // 144 bytes padding to reach 256
}

impl ViewUniform {
    pub fn new(bounds: &Bounds, backdrop: &Backdrop) -> Self {
        Self {
            view_proj: pixel_projection(bounds).to_cols_array_2d(),
            backdrop_center_radius: [backdrop.center.x, backdrop.center.y, backdrop.radius, 0.0],
            backdrop_inner: backdrop.inner.to_array(),
            backdrop_outer: backdrop.outer.to_array(),
            _padding: [0.0; 36],
        }
    }
}

/// Maps (0, 0)..(width, height) with y down onto clip space
pub fn pixel_projection(bounds: &Bounds) -> Mat4 {
    Mat4::orthographic_rh(0.0, bounds.width, bounds.height, 0.0, -1.0, 1.0)
}
