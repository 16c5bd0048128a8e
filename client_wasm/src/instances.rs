//! GPU instance data built from a frame scene

use field_core::FrameScene;

/// One particle (matches shader dot inputs)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DotInstance {
    pub center_radius: [f32; 4], // x, y, radius, unused
    pub color: [f32; 4],         // rgba, alpha already applied
}

/// One connecting line (matches shader link inputs)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LinkInstance {
    pub endpoints: [f32; 4], // x0, y0, x1, y1
    pub color: [f32; 4],     // rgba, opacity already applied
    pub width: f32,
    pub _padding: [f32; 3],
}

pub fn dot_instances(scene: &FrameScene) -> Vec<DotInstance> {
    scene
        .dots
        .iter()
        .map(|dot| DotInstance {
            center_radius: [dot.pos.x, dot.pos.y, dot.radius, 0.0],
            color: dot.color.with_alpha_scaled(dot.alpha).to_array(),
        })
        .collect()
}

pub fn link_instances(scene: &FrameScene) -> Vec<LinkInstance> {
    scene
        .links
        .iter()
        .map(|link| LinkInstance {
            endpoints: [link.from.x, link.from.y, link.to.x, link.to.y],
            color: link.color.with_alpha_scaled(link.opacity).to_array(),
            width: link.width,
            _padding: [0.0; 3],
        })
        .collect()
}
