//! WGSL for the particle field
//!
//! One module, three entry pairs: backdrop (full-screen triangle), dots and
//! links (instanced unit quads). Colors arrive with straight alpha and leave
//! premultiplied, to match the canvas compositing mode.

pub const FIELD_SHADER: &str = r#"
struct View {
    view_proj: mat4x4<f32>,
    backdrop_center_radius: vec4<f32>,
    backdrop_inner: vec4<f32>,
    backdrop_outer: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> view: View;

fn premultiply(c: vec4<f32>) -> vec4<f32> {
    return vec4<f32>(c.rgb * c.a, c.a);
}

// Backdrop

struct BackdropOut {
    @builtin(position) clip: vec4<f32>,
};

@vertex
fn vs_backdrop(@builtin(vertex_index) index: u32) -> BackdropOut {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BackdropOut;
    out.clip = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    return out;
}

@fragment
fn fs_backdrop(in: BackdropOut) -> @location(0) vec4<f32> {
    // Fragment position is in framebuffer pixels, y down
    let radius = max(view.backdrop_center_radius.z, 0.0001);
    let t = clamp(distance(in.clip.xy, view.backdrop_center_radius.xy) / radius, 0.0, 1.0);
    return premultiply(mix(view.backdrop_inner, view.backdrop_outer, t));
}

// Dots

struct DotOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_dot(
    @location(0) corner: vec2<f32>,
    @location(1) center_radius: vec4<f32>,
    @location(2) color: vec4<f32>,
) -> DotOut {
    let world = center_radius.xy + corner * center_radius.z;
    var out: DotOut;
    out.clip = view.view_proj * vec4<f32>(world, 0.0, 1.0);
    out.local = corner;
    out.color = color;
    return out;
}

@fragment
fn fs_dot(in: DotOut) -> @location(0) vec4<f32> {
    let d = length(in.local);
    if (d > 1.0) {
        discard;
    }
    let edge = 1.0 - smoothstep(0.8, 1.0, d);
    return premultiply(vec4<f32>(in.color.rgb, in.color.a * edge));
}

// Links

struct LinkOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_link(
    @location(0) corner: vec2<f32>,
    @location(1) endpoints: vec4<f32>,
    @location(2) color: vec4<f32>,
    @location(3) width: f32,
) -> LinkOut {
    let a = endpoints.xy;
    let b = endpoints.zw;
    let delta = b - a;
    let len = length(delta);
    var dir = vec2<f32>(1.0, 0.0);
    if (len > 0.0001) {
        dir = delta / len;
    }
    let normal = vec2<f32>(-dir.y, dir.x);

    // Sub-pixel lines are drawn one pixel wide and faded instead
    let half_width = max(width, 1.0) * 0.5;
    let t = corner.x * 0.5 + 0.5;
    let world = mix(a, b, t) + normal * corner.y * half_width;

    var out: LinkOut;
    out.clip = view.view_proj * vec4<f32>(world, 0.0, 1.0);
    out.color = vec4<f32>(color.rgb, color.a * min(width, 1.0));
    return out;
}

@fragment
fn fs_link(in: LinkOut) -> @location(0) vec4<f32> {
    return premultiply(in.color);
}
"#;
