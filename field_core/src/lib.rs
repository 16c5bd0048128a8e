//! Particle field core
//!
//! Platform-free simulation for the decorative background: particles drift,
//! bounce off the canvas edges and shimmer; nearby pairs are linked. Surfaces
//! and frame scheduling are traits so the browser bindings (and tests) plug
//! in their own.

pub mod color;
pub mod components;
pub mod config;
pub mod error;
pub mod field;
pub mod params;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod splash;
pub mod systems;

pub use color::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use field::*;
pub use params::*;
pub use renderer::*;
pub use resources::*;
pub use scene::*;
pub use splash::*;
pub use systems::*;

use hecs::World;

/// Advance the field one frame
///
/// Motion is per frame, not per second; the host's frame callback sets the
/// pace. `now_ms` only drives the shimmer.
pub fn step(world: &mut World, time: &mut Time, bounds: &Bounds, now_ms: f64) {
    time.advance_to_ms(now_ms);

    // 1. Move and reflect
    move_particles(world, bounds);

    // 2. Shimmer
    update_alpha(world, time);
}

/// Helper to create a particle entity
pub fn create_particle(world: &mut World, particle: Particle) -> hecs::Entity {
    world.spawn((particle,))
}

/// Spawn `config.particle_count` random particles inside `bounds`
pub fn spawn_field(world: &mut World, bounds: &Bounds, config: &FieldConfig, rng: &mut FieldRng) {
    for _ in 0..config.particle_count {
        create_particle(world, Particle::random(bounds, config, rng));
    }
}
