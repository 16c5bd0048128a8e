use crate::scene::{Backdrop, Dot, FrameScene};
use crate::{find_links, spawn_field, step, Bounds, FieldConfig, FieldRng, Particle, Time};
use hecs::World;

/// One particle field: the fixed particle set plus the state it moves in
///
/// The seed only shapes the initial set; motion after that is deterministic.
pub struct ParticleField {
    pub world: World,
    pub time: Time,
    pub bounds: Bounds,
    pub config: FieldConfig,
}

impl ParticleField {
    pub fn new(config: FieldConfig, bounds: Bounds, seed: u64) -> Self {
        let mut world = World::new();
        let mut rng = FieldRng::new(seed);
        spawn_field(&mut world, &bounds, &config, &mut rng);

        Self {
            world,
            time: Time::new(),
            bounds,
            config,
        }
    }

    /// Advance one frame at host time `now_ms`
    pub fn step(&mut self, now_ms: f64) {
        step(&mut self.world, &mut self.time, &self.bounds, now_ms);
    }

    /// Adopt new bounds; particles outside are clamped, never removed
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        crate::clamp_particles(&mut self.world, &bounds);
    }

    /// Display list for the current state
    pub fn scene(&self, with_links: bool) -> FrameScene {
        let dots = self
            .world
            .query::<&Particle>()
            .iter()
            .map(|(_e, p)| Dot {
                pos: p.pos,
                radius: p.radius,
                color: p.color,
                alpha: p.alpha,
            })
            .collect();

        let links = if with_links {
            find_links(&self.world, &self.config)
        } else {
            Vec::new()
        };

        FrameScene {
            bounds: self.bounds,
            backdrop: Backdrop::for_bounds(&self.bounds, &self.config),
            dots,
            links,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.world.len() as usize
    }

    /// Snapshot of every particle
    pub fn particles(&self) -> Vec<Particle> {
        self.world
            .query::<&Particle>()
            .iter()
            .map(|(_e, p)| *p)
            .collect()
    }
}
