//! Splash screen loading progress
//!
//! `Idle -> Loading { progress } -> Complete`, advanced by one frame tick.
//! Progress grows by a random step every `Params::LOADING_TICK` seconds of
//! accumulated frame time, so slow frames never lose increments.

use crate::{FieldRng, Params};

/// Loading states
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadingState {
    Idle,
    Loading { progress: f32 }, // 0..100
    Complete,
}

/// Splash progress state machine
pub struct SplashLoader {
    state: LoadingState,
    since_step: f32,
    since_complete: f32,
    rng: FieldRng,
}

impl SplashLoader {
    pub fn new(seed: u64) -> Self {
        Self {
            state: LoadingState::Idle,
            since_step: 0.0,
            since_complete: 0.0,
            rng: FieldRng::new(seed),
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    /// `Idle -> Loading { 0 }`; false from any other state
    pub fn begin(&mut self) -> bool {
        if self.state != LoadingState::Idle {
            return false;
        }
        self.state = LoadingState::Loading { progress: 0.0 };
        self.since_step = 0.0;
        true
    }

    /// Advance by `dt` seconds of frame time
    pub fn tick(&mut self, dt: f32) -> LoadingState {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.state {
            LoadingState::Idle => {}
            LoadingState::Loading { mut progress } => {
                use rand::Rng;

                self.since_step += dt;
                while self.since_step >= Params::LOADING_TICK {
                    self.since_step -= Params::LOADING_TICK;
                    progress += self
                        .rng
                        .0
                        .gen_range(Params::LOADING_STEP_MIN..Params::LOADING_STEP_MAX);
                    if progress >= 100.0 {
                        break;
                    }
                }

                if progress >= 100.0 {
                    log::info!("Splash loading complete");
                    self.state = LoadingState::Complete;
                    self.since_complete = 0.0;
                } else {
                    self.state = LoadingState::Loading { progress };
                }
            }
            LoadingState::Complete => {
                self.since_complete += dt;
            }
        }

        self.state
    }

    /// Whole percent shown on the progress label
    pub fn percentage(&self) -> u8 {
        match self.state {
            LoadingState::Idle => 0,
            LoadingState::Loading { progress } => progress.floor().clamp(0.0, 100.0) as u8,
            LoadingState::Complete => 100,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == LoadingState::Complete
    }

    /// Complete and held long enough for the page to move on
    pub fn ready_to_leave(&self) -> bool {
        self.is_complete() && self.since_complete >= Params::LOADING_HOLD
    }

    /// Back to Idle
    pub fn reset(&mut self) {
        self.state = LoadingState::Idle;
        self.since_step = 0.0;
        self.since_complete = 0.0;
    }
}

impl Default for SplashLoader {
    fn default() -> Self {
        Self::new(12345)
    }
}
