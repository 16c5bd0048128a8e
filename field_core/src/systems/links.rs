use crate::scene::Link;
use crate::{FieldConfig, Particle};
use glam::Vec2;
use hecs::World;

/// Line opacity for two particles `distance` apart
///
/// Linear falloff from `link_alpha` at zero distance to nothing at
/// `max_distance`; `None` at or beyond it.
pub fn link_opacity(distance: f32, max_distance: f32, link_alpha: f32) -> Option<f32> {
    if distance < max_distance {
        Some(link_alpha * (1.0 - distance / max_distance))
    } else {
        None
    }
}

/// Every unordered pair closer than the connection distance
///
/// O(n^2) over the particle count.
pub fn find_links(world: &World, config: &FieldConfig) -> Vec<Link> {
    let positions: Vec<Vec2> = world
        .query::<&Particle>()
        .iter()
        .map(|(_e, p)| p.pos)
        .collect();

    let mut links = Vec::new();
    for (i, &a) in positions.iter().enumerate() {
        for &b in &positions[i + 1..] {
            if let Some(opacity) =
                link_opacity(a.distance(b), config.connection_distance, config.link_alpha)
            {
                links.push(Link {
                    from: a,
                    to: b,
                    color: config.link_color,
                    opacity,
                    width: config.link_width,
                });
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    #[test]
    fn test_link_opacity_decreases_with_distance() {
        let mut last = f32::INFINITY;
        for step in 0..100 {
            let d = step as f32;
            let opacity = link_opacity(d, 100.0, 0.1).unwrap();
            assert!(opacity < last, "{opacity} at {d}");
            last = opacity;
        }
    }

    #[test]
    fn test_no_link_at_or_beyond_distance() {
        assert_eq!(link_opacity(100.0, 100.0, 0.1), None);
        assert_eq!(link_opacity(150.0, 100.0, 0.1), None);
        assert_eq!(link_opacity(0.0, 0.0, 0.1), None);
    }

    #[test]
    fn test_find_links_pairs_once() {
        let mut world = World::new();
        let config = FieldConfig::default();
        for pos in [
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 40.0),  // 50 from first
            Vec2::new(500.0, 500.0), // far from both
        ] {
            world.spawn((Particle::new(pos, Vec2::ZERO, 1.0, Rgba::TRANSPARENT),));
        }

        let links = find_links(&world, &config);

        assert_eq!(links.len(), 1);
        let link = links[0];
        assert!((link.opacity - 0.05).abs() < 1e-6);
        assert_eq!(link.width, config.link_width);
    }
}
