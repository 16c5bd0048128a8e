use crate::color::Rgba;
use glam::Vec2;

/// Particle component - one drifting point of the field
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2, // px per frame
    pub radius: f32,
    pub color: Rgba,
    pub alpha: f32, // recomputed every frame
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Rgba) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            alpha: 0.0,
        }
    }

    /// Random particle inside `bounds`
    pub fn random(
        bounds: &crate::Bounds,
        config: &crate::FieldConfig,
        rng: &mut crate::FieldRng,
    ) -> Self {
        use rand::seq::SliceRandom;
        use rand::Rng;

        let pos = bounds.clamp(Vec2::new(
            rng.0.gen_range(0.0..bounds.width),
            rng.0.gen_range(0.0..bounds.height),
        ));
        let speed = config.speed_range;
        let vel = Vec2::new(
            rng.0.gen_range(-speed..speed),
            rng.0.gen_range(-speed..speed),
        );
        let radius = if config.radius_max > config.radius_min {
            rng.0.gen_range(config.radius_min..config.radius_max)
        } else {
            config.radius_min
        };
        let color = config
            .palette
            .choose(&mut rng.0)
            .copied()
            .unwrap_or(Rgba::TRANSPARENT);

        Self::new(pos, vel, radius, color)
    }
}
