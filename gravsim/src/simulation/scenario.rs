//! Build fully-initialized gravity toy scenarios
//!
//! A scenario starts either from one of the built-in [`Preset`]s or from the
//! explicit body list of a `ScenarioConfig`, and produces the runtime bundle
//! [`Scenario`] containing:
//! - the `World` (parameters, bodies, pairs)
//! - the interactive `Controls`
//! - the random source used for spawning
//!
//! The bundle is inserted into Bevy as a `Resource` and consumed by the
//! viewer's input, physics and drawing systems

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::Rng;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::controls::Controls;
use crate::simulation::params::Parameters;
use crate::simulation::states::{sample_or_low, Body, NVec2, World};

/// Velocity component range for clicked-in bodies
pub const SPAWN_VELOCITY: (f64, f64) = (-50.0, 50.0);
/// Radius range for clicked-in bodies
pub const SPAWN_RADIUS: (f64, f64) = (10.0, 50.0);

/// Built-in initial configurations, numbered 1..=5 on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    TwoSimilar, // 1: two balls of similar size
    Orbit,      // 2: a small ball orbiting a big one
    Binary,     // 3: equal pair circling each other
    Random,     // 4: two random balls
    Three,      // 5: three equal balls
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::TwoSimilar,
        Preset::Orbit,
        Preset::Binary,
        Preset::Random,
        Preset::Three,
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(Preset::TwoSimilar),
            2 => Some(Preset::Orbit),
            3 => Some(Preset::Binary),
            4 => Some(Preset::Random),
            5 => Some(Preset::Three),
            _ => None,
        }
    }

    pub fn index(&self) -> i64 {
        match self {
            Preset::TwoSimilar => 1,
            Preset::Orbit => 2,
            Preset::Binary => 3,
            Preset::Random => 4,
            Preset::Three => 5,
        }
    }

    /// Resolve a requested preset; anything missing or out of range is
    /// replaced by a uniformly random valid preset.
    pub fn select<R: Rng>(requested: Option<i64>, rng: &mut R) -> Self {
        if let Some(preset) = requested.and_then(Preset::from_index) {
            return preset;
        }
        let fallback = Preset::ALL[rng.random_range(0..Preset::ALL.len())];
        match requested {
            Some(index) => log::warn!("no preset {index}, using preset {}", fallback.index()),
            None => log::info!("no preset requested, using preset {}", fallback.index()),
        }
        fallback
    }

    /// Initial bodies for this preset. Only `Random` consults `rng` and the
    /// screen extent in `params`.
    pub fn bodies<R: Rng>(&self, params: &Parameters, rng: &mut R) -> Vec<Body> {
        let body = |x: f64, y: f64, vx: f64, vy: f64, r: f64| {
            Body::new(NVec2::new(x, y), NVec2::new(vx, vy), r)
        };

        match self {
            Preset::TwoSimilar => vec![
                body(400.0, 200.0, 100.0, 30.0, 50.0),
                body(400.0, 400.0, 0.0, 0.0, 70.0),
            ],
            Preset::Orbit => vec![
                body(400.0, 200.0, 130.0, 0.0, 10.0),
                body(400.0, 400.0, 0.0, 0.0, 100.0),
            ],
            Preset::Binary => vec![
                body(400.0, 300.0, 20.0, 0.0, 30.0),
                body(400.0, 500.0, -20.0, 0.0, 30.0),
            ],
            Preset::Random => {
                // radius capped so the disc fits between the walls on small screens
                let max_r = params.max_radius().min(100.0);
                (0..2)
                    .map(|_| {
                        body(
                            rng.random_range(0.0..params.width),
                            rng.random_range(0.0..params.height),
                            rng.random_range(-100.0..100.0),
                            rng.random_range(-100.0..100.0),
                            sample_or_low(rng, 10.0_f64.min(max_r), max_r),
                        )
                    })
                    .collect()
            }
            Preset::Three => vec![
                body(490.0, 300.0, 20.0, 30.0, 50.0),
                body(200.0, 700.0, -40.0, -10.0, 50.0),
                body(600.0, 500.0, 80.0, 0.0, 50.0),
            ],
        }
    }
}

/// Bevy resource representing a fully-initialized gravity toy scenario
///
/// This is the main "runtime bundle": the world state, the interactive
/// controls that feed each frame's `FrameConfig`, and the random source
/// used when the user spawns bodies
#[derive(Resource)]
pub struct Scenario {
    pub world: World,
    pub controls: Controls,
    pub preset: Option<Preset>, // None when the bodies came from the config file
    pub rng: StdRng,
}

impl Scenario {
    /// Build from configuration. `preset_override` (e.g. from the command
    /// line) wins over the file's `preset`; an explicit body list wins over both.
    pub fn build_scenario(cfg: ScenarioConfig, preset_override: Option<i64>, mut rng: StdRng) -> Self {
        let parameters = cfg.parameters();
        let controls = cfg.controls();

        let (bodies, preset) = match cfg.explicit_bodies() {
            Some(bodies) => (bodies, None),
            None => {
                let preset = Preset::select(preset_override.or(cfg.preset), &mut rng);
                (preset.bodies(&parameters, &mut rng), Some(preset))
            }
        };

        let world = World::with_bodies(parameters, bodies);
        log::info!(
            "scenario ready: {} bodies, {} pairs, preset {:?}",
            world.len(),
            world.pairs().len(),
            preset
        );

        Self {
            world,
            controls,
            preset,
            rng,
        }
    }

    /// Add a body at `position` with the default spawn ranges.
    pub fn spawn_at(&mut self, position: NVec2) -> usize {
        self.world
            .spawn(position, SPAWN_VELOCITY, SPAWN_RADIUS, &mut self.rng)
    }
}
