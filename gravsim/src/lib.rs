pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, Impulse, NVec2, World};
pub use simulation::params::{FrameConfig, Parameters};
pub use simulation::controls::Controls;
pub use simulation::forces::{collide, CollisionOutcome, Interaction, NewtonianGravity};
pub use simulation::integrator::{euler_step, FrameReport};
pub use simulation::scenario::{Preset, Scenario};

pub use configuration::config::{BodyConfig, ConfigError, ControlsConfig, ScenarioConfig, WorldConfig};

pub use visualization::gravsim_vis2d::run_2d;

pub use benchmark::benchmark::bench_step;
