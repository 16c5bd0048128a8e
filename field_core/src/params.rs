/// Tuning parameters for the particle field
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const PARTICLE_COUNT: usize = 80;
    pub const MAX_PARTICLE_COUNT: usize = 1000; // links are O(n^2) per frame
    pub const SPEED_RANGE: f32 = 0.25; // px per frame, each axis
    pub const RADIUS_MIN: f32 = 1.0;
    pub const RADIUS_MAX: f32 = 3.0;

    // Palette (gold, bright gold, silver, ivory)
    pub const PALETTE: [&'static str; 4] = [
        "rgba(212, 175, 55, 0.8)",
        "rgba(255, 215, 0, 0.6)",
        "rgba(192, 192, 192, 0.5)",
        "rgba(248, 244, 233, 0.4)",
    ];

    // Shimmer: alpha = BASE + AMPLITUDE * sin(t + x * X_FREQUENCY)
    pub const SHIMMER_BASE: f32 = 0.2;
    pub const SHIMMER_AMPLITUDE: f32 = 0.3;
    pub const SHIMMER_X_FREQUENCY: f32 = 0.01;

    // Links
    pub const CONNECTION_DISTANCE: f32 = 100.0;
    pub const LINK_COLOR: &'static str = "rgba(212, 175, 55, 1)";
    pub const LINK_ALPHA: f32 = 0.1;
    pub const LINK_WIDTH: f32 = 0.5;

    // Backdrop
    pub const BACKDROP_INNER: &'static str = "rgba(10, 25, 49, 0.1)";
    pub const BACKDROP_OUTER: &'static str = "rgba(26, 26, 26, 0.8)";

    // Splash loader
    pub const LOADING_TICK: f32 = 0.1; // seconds between progress increments
    pub const LOADING_STEP_MIN: f32 = 1.0;
    pub const LOADING_STEP_MAX: f32 = 5.0;
    pub const LOADING_HOLD: f32 = 0.8; // seconds after completion before leaving
}
