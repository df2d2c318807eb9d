//! Numerical and physical parameters for the simulation
//!
//! - `Parameters` is fixed for the lifetime of a `World`: screen extent,
//!   trail length and the contact normal used when two centers coincide
//! - `FrameConfig` holds the inputs captured at the start of one frame:
//!   gravity strength and sign, speed multiplier, elapsed real time

use super::states::NVec2;

pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 800.0;
pub const MAX_HISTORY: usize = 300;

pub const MAX_GRAVITY: f64 = 1000.0;
pub const DEFAULT_GRAVITY: f64 = 100.0;
pub const MAX_SPEED: f64 = 2.0;
pub const SPEED_STEP: f64 = 0.25;

/// Smallest radius a spawned body can get
pub const MIN_RADIUS: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub width: f64, // screen extent along x
    pub height: f64, // screen extent along y
    pub max_history: usize, // trail length per body
    pub fallback_normal: NVec2, // contact normal when centers coincide exactly
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            max_history: MAX_HISTORY,
            fallback_normal: NVec2::new(1.0, 0.0),
        }
    }
}

impl Parameters {
    /// Largest radius that still fits between opposite walls on both axes.
    pub fn max_radius(&self) -> f64 {
        0.5 * self.width.min(self.height)
    }
}

/// Per-frame inputs. Built once per frame and never mutated during the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    pub gravitational_constant: f64, // >= 0
    pub repulsive: bool,             // flips the sign of G
    pub speed: f64,                  // in [0, MAX_SPEED]
    pub elapsed_seconds: f64,        // real time since the previous frame
}

impl FrameConfig {
    pub fn new(gravitational_constant: f64, repulsive: bool, speed: f64, elapsed_seconds: f64) -> Self {
        Self {
            gravitational_constant: gravitational_constant.max(0.0),
            repulsive,
            speed: speed.clamp(0.0, MAX_SPEED),
            elapsed_seconds: elapsed_seconds.max(0.0),
        }
    }

    /// Simulated time for this step.
    pub fn dt(&self) -> f64 {
        self.elapsed_seconds * self.speed
    }

    /// Signed gravitational constant; negative pushes bodies apart.
    pub fn effective_g(&self) -> f64 {
        if self.repulsive {
            -self.gravitational_constant
        } else {
            self.gravitational_constant
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY, false, 1.0, 1.0 / 60.0)
    }
}
