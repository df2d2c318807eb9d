//! Configuration types for loading gravity toy scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. Every section is optional:
//!
//! - [`WorldConfig`]    – screen extent and trail length
//! - [`ControlsConfig`] – starting values for the interactive controls
//! - `preset`           – one of the built-in initial configurations (1..=5)
//! - [`BodyConfig`]     – explicit initial bodies, overriding `preset` when non-empty
//!
//! # YAML format
//!
//! ```yaml
//! world:
//!   width: 800
//!   height: 800
//!   max_history: 300      # trail length
//!
//! controls:
//!   gravity: 100          # 0..=1000
//!   repulsive: false
//!   speed: 1.0            # 0..=2, steps of 0.25
//!   sound: true
//!   spawning: false
//!
//! preset: 3
//!
//! bodies:
//!   - x: [400, 300]
//!     v: [20, 0]
//!     radius: 30
//!   - x: [400, 500]
//!     v: [-20, 0]
//!     radius: 30
//! ```
//!
//! The engine maps this into its runtime [`Scenario`](crate::Scenario).

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::controls::Controls;
use crate::simulation::params::{
    Parameters, MAX_GRAVITY, MAX_HISTORY, MAX_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::simulation::states::{Body, NVec2};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scenario YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("world extent must be positive, got {width} x {height}")]
    Extent { width: f64, height: f64 },

    #[error("max_history must be at least 1")]
    History,

    #[error("gravity {0} is outside 0..=1000")]
    Gravity(f64),

    #[error("speed {0} is outside 0..=2")]
    Speed(f64),

    #[error("body {index}: `{field}` needs 2 components, got {len}")]
    Dimension { index: usize, field: &'static str, len: usize },

    #[error("body {index}: radius must be positive, got {radius}")]
    Radius { index: usize, radius: f64 },

    #[error("body {index}: radius {radius} does not fit a {width} x {height} world")]
    Oversized { index: usize, radius: f64, width: f64, height: f64 },
}

/// Screen extent and trail length
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub max_history: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            max_history: MAX_HISTORY,
        }
    }
}

/// Starting values for the interactive controls
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ControlsConfig {
    pub gravity: f64,
    pub repulsive: bool,
    pub speed: f64,
    pub sound: bool,
    pub spawning: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let c = Controls::default();
        Self {
            gravity: c.gravity,
            repulsive: c.repulsive,
            speed: c.speed,
            sound: c.sound,
            spawning: c.spawning,
        }
    }
}

/// Initial state of a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position in screen units
    #[serde(default = "zero_velocity")]
    pub v: Vec<f64>, // velocity in screen units per second
    pub radius: f64, // mass follows as pi r^2
}

fn zero_velocity() -> Vec<f64> {
    vec![0.0, 0.0]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub world: WorldConfig,
    pub controls: ControlsConfig,
    pub preset: Option<i64>,
    pub bodies: Option<Vec<BodyConfig>>,
}

impl ScenarioConfig {
    /// Parse and validate a scenario.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if !(w.width > 0.0 && w.height > 0.0) {
            return Err(ConfigError::Extent { width: w.width, height: w.height });
        }
        if w.max_history == 0 {
            return Err(ConfigError::History);
        }

        let c = &self.controls;
        if !(0.0..=MAX_GRAVITY).contains(&c.gravity) {
            return Err(ConfigError::Gravity(c.gravity));
        }
        if !(0.0..=MAX_SPEED).contains(&c.speed) {
            return Err(ConfigError::Speed(c.speed));
        }

        let max_radius = self.parameters().max_radius();
        for (index, b) in self.bodies.iter().flatten().enumerate() {
            if b.x.len() != 2 {
                return Err(ConfigError::Dimension { index, field: "x", len: b.x.len() });
            }
            if b.v.len() != 2 {
                return Err(ConfigError::Dimension { index, field: "v", len: b.v.len() });
            }
            if !(b.radius > 0.0) {
                return Err(ConfigError::Radius { index, radius: b.radius });
            }
            if b.radius > max_radius {
                return Err(ConfigError::Oversized {
                    index,
                    radius: b.radius,
                    width: w.width,
                    height: w.height,
                });
            }
        }
        Ok(())
    }

    pub fn parameters(&self) -> Parameters {
        Parameters {
            width: self.world.width,
            height: self.world.height,
            max_history: self.world.max_history,
            ..Parameters::default()
        }
    }

    pub fn controls(&self) -> Controls {
        let mut controls = Controls {
            gravity: self.controls.gravity,
            repulsive: self.controls.repulsive,
            sound: self.controls.sound,
            spawning: self.controls.spawning,
            ..Controls::default()
        };
        controls.set_speed(self.controls.speed);
        controls
    }

    /// Explicit bodies, if the file lists any. An empty list counts as none.
    /// Assumes `validate` passed.
    pub fn explicit_bodies(&self) -> Option<Vec<Body>> {
        let bodies = self.bodies.as_ref().filter(|b| !b.is_empty())?;
        Some(
            bodies
                .iter()
                .map(|bc: &BodyConfig| {
                    Body::new(
                        NVec2::new(bc.x[0], bc.x[1]),
                        NVec2::new(bc.v[0], bc.v[1]),
                        bc.radius,
                    )
                })
                .collect(),
        )
    }
}
