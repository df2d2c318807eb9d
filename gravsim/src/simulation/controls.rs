//! Interactive settings driven by the viewer
//!
//! `Controls` is the mutable, UI-bound side of the configuration. The physics
//! never reads it directly: each frame takes a `FrameConfig` snapshot via
//! [`Controls::frame_config`].

use super::params::{FrameConfig, DEFAULT_GRAVITY, MAX_GRAVITY, MAX_SPEED, SPEED_STEP};

#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub gravity: f64, // slider value in [0, MAX_GRAVITY]
    pub repulsive: bool,
    pub speed: f64, // multiple of SPEED_STEP in [0, MAX_SPEED]
    pub sound: bool,
    pub spawning: bool, // clicks create bodies
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            repulsive: false,
            speed: 1.0,
            sound: true,
            spawning: false,
        }
    }
}

impl Controls {
    pub fn nudge_gravity(&mut self, delta: f64) {
        self.gravity = (self.gravity + delta).clamp(0.0, MAX_GRAVITY);
    }

    pub fn toggle_repulsive(&mut self) {
        self.repulsive = !self.repulsive;
    }

    pub fn faster(&mut self) {
        self.set_speed(self.speed + SPEED_STEP);
    }

    pub fn slower(&mut self) {
        self.set_speed(self.speed - SPEED_STEP);
    }

    /// Snap to the nearest `SPEED_STEP` inside `[0, MAX_SPEED]`.
    pub fn set_speed(&mut self, speed: f64) {
        let snapped = (speed / SPEED_STEP).round() * SPEED_STEP;
        self.speed = snapped.clamp(0.0, MAX_SPEED);
    }

    pub fn toggle_sound(&mut self) {
        self.sound = !self.sound;
    }

    pub fn toggle_spawning(&mut self) {
        self.spawning = !self.spawning;
    }

    pub fn frame_config(&self, elapsed_seconds: f64) -> FrameConfig {
        FrameConfig::new(self.gravity, self.repulsive, self.speed, elapsed_seconds)
    }
}
