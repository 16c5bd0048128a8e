/// Frame clock for the field
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub now: f32,    // Seconds since the host's time origin
    pub frame: u64,  // Frames stepped since start
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the host timestamp (milliseconds)
    pub fn advance_to_ms(&mut self, now_ms: f64) {
        self.now = (now_ms * 0.001) as f32;
        self.frame += 1;
    }
}

/// Drawable extent in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const UNIT: Bounds = Bounds {
        width: 1.0,
        height: 1.0,
    };

    /// `None` for empty or non-finite extents
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v > 0.0 && v.is_finite();
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    pub fn from_pixels(width: u32, height: u32) -> Option<Self> {
        Self::new(width as f32, height as f32)
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Largest coordinate strictly below `extent`
    pub fn max_inside(extent: f32) -> f32 {
        (extent - extent * f32::EPSILON).max(0.0)
    }

    /// Clamp a point into `[0, width) x [0, height)`
    pub fn clamp(&self, p: glam::Vec2) -> glam::Vec2 {
        glam::Vec2::new(
            p.x.clamp(0.0, Self::max_inside(self.width)),
            p.y.clamp(0.0, Self::max_inside(self.height)),
        )
    }

    pub fn contains(&self, p: glam::Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }
}

/// Random number generator
pub struct FieldRng(pub rand::rngs::StdRng);

impl FieldRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for FieldRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
