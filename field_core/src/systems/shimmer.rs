use crate::{Params, Particle, Time};
use hecs::World;

/// Oscillating opacity from time and horizontal position, clamped to [0, 1]
pub fn shimmer_alpha(t: f32, x: f32) -> f32 {
    let phase = t + x * Params::SHIMMER_X_FREQUENCY;
    (Params::SHIMMER_BASE + Params::SHIMMER_AMPLITUDE * phase.sin()).clamp(0.0, 1.0)
}

/// Recompute every particle's alpha for this frame
pub fn update_alpha(world: &mut World, time: &Time) {
    for (_entity, particle) in world.query_mut::<&mut Particle>() {
        particle.alpha = shimmer_alpha(time.now, particle.pos.x);
    }
}
