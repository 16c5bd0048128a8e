use crate::{Bounds, Particle};
use hecs::World;

/// Advance every particle by its velocity, reflecting off the bounds
pub fn move_particles(world: &mut World, bounds: &Bounds) {
    for (_entity, particle) in world.query_mut::<&mut Particle>() {
        particle.pos += particle.vel;
        reflect_axis(&mut particle.pos.x, &mut particle.vel.x, bounds.width);
        reflect_axis(&mut particle.pos.y, &mut particle.vel.y, bounds.height);
    }
}

/// Pull every particle inside new bounds without touching velocity
pub fn clamp_particles(world: &mut World, bounds: &Bounds) {
    for (_entity, particle) in world.query_mut::<&mut Particle>() {
        particle.pos = bounds.clamp(particle.pos);
    }
}

/// Elastic reflection on one axis; `pos` ends in `[0, extent)`
fn reflect_axis(pos: &mut f32, vel: &mut f32, extent: f32) {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = vel.abs();
    } else if *pos >= extent {
        *pos = Bounds::max_inside(extent);
        *vel = -vel.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;
    use glam::Vec2;

    fn spawn(world: &mut World, pos: Vec2, vel: Vec2) -> hecs::Entity {
        world.spawn((Particle::new(pos, vel, 1.0, Rgba::TRANSPARENT),))
    }

    #[test]
    fn test_reflects_off_right_edge() {
        let mut world = World::new();
        let bounds = Bounds::new(800.0, 600.0).unwrap();
        let e = spawn(&mut world, Vec2::new(800.0 - 0.01, 300.0), Vec2::new(0.25, 0.0));

        move_particles(&mut world, &bounds);

        let p = *world.get::<&Particle>(e).unwrap();
        assert!(p.vel.x < 0.0, "x velocity flips: {}", p.vel.x);
        assert!(p.pos.x < 800.0 && p.pos.x >= 0.0);
    }

    #[test]
    fn test_reflects_off_top_edge() {
        let mut world = World::new();
        let bounds = Bounds::new(800.0, 600.0).unwrap();
        let e = spawn(&mut world, Vec2::new(10.0, 0.1), Vec2::new(0.0, -0.25));

        move_particles(&mut world, &bounds);

        let p = *world.get::<&Particle>(e).unwrap();
        assert!(p.vel.y > 0.0);
        assert_eq!(p.pos.y, 0.0);
    }

    #[test]
    fn test_interior_motion_keeps_velocity() {
        let mut world = World::new();
        let bounds = Bounds::new(800.0, 600.0).unwrap();
        let e = spawn(&mut world, Vec2::new(100.0, 100.0), Vec2::new(0.2, -0.1));

        move_particles(&mut world, &bounds);

        let p = *world.get::<&Particle>(e).unwrap();
        assert_eq!(p.vel, Vec2::new(0.2, -0.1));
        assert!((p.pos - Vec2::new(100.2, 99.9)).length() < 1e-4);
    }

    #[test]
    fn test_clamp_particles_into_smaller_bounds() {
        let mut world = World::new();
        let e = spawn(&mut world, Vec2::new(700.0, 550.0), Vec2::new(0.1, 0.1));
        let small = Bounds::new(400.0, 300.0).unwrap();

        clamp_particles(&mut world, &small);

        let p = *world.get::<&Particle>(e).unwrap();
        assert!(small.contains(p.pos));
        assert_eq!(p.vel, Vec2::new(0.1, 0.1));
    }
}
