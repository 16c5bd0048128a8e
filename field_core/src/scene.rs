//! Per-frame display list
//!
//! The field produces one `FrameScene` per frame; surfaces only draw it.

use crate::{Bounds, FieldConfig, Rgba};
use glam::Vec2;

/// Radial gradient painted behind the particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub center: Vec2,
    pub radius: f32,
    pub inner: Rgba, // stop 0
    pub outer: Rgba, // stop 1
}

impl Backdrop {
    /// Centered on the canvas, reaching the farther half-extent
    pub fn for_bounds(bounds: &Bounds, config: &FieldConfig) -> Self {
        Self {
            center: bounds.center(),
            radius: bounds.width.max(bounds.height) * 0.5,
            inner: config.backdrop_inner,
            outer: config.backdrop_outer,
        }
    }
}

/// A filled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub alpha: f32,
}

/// A connecting line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Rgba,
    pub opacity: f32,
    pub width: f32,
}

/// Everything one frame draws, in paint order: backdrop, dots, links
#[derive(Debug, Clone, PartialEq)]
pub struct FrameScene {
    pub bounds: Bounds,
    pub backdrop: Backdrop,
    pub dots: Vec<Dot>,
    pub links: Vec<Link>,
}

impl FrameScene {
    /// Backdrop only, for the static surface
    pub fn backdrop_only(bounds: Bounds, config: &FieldConfig) -> Self {
        Self {
            bounds,
            backdrop: Backdrop::for_bounds(&bounds, config),
            dots: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.links.is_empty()
    }
}
