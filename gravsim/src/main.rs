use gravsim::{ScenarioConfig, Scenario};
use gravsim::run_2d;
use gravsim::bench_step;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Discs under mutual gravity with elastic bounces")]
struct Args {
    /// Initial configuration 1..=5; anything else picks one at random
    #[arg(short, long)]
    preset: Option<i64>,

    /// Scenario YAML, looked up in `scenarios/` when not found as given
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run this many frames without a window and log a summary
    #[arg(long)]
    headless: Option<u64>,

    /// Frame rate assumed by the headless run
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Seed for presets and spawning (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Time the frame step for growing body counts
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_config(path: Option<&PathBuf>) -> Result<ScenarioConfig> {
    let Some(path) = path else {
        return Ok(ScenarioConfig::default());
    };

    let config_path = if path.exists() {
        path.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(path)
    };
    let yaml = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_yaml_str(&yaml)
        .with_context(|| format!("invalid scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn run_headless(mut scenario: Scenario, frames: u64, fps: f64) {
    let elapsed = 1.0 / fps.max(1.0);
    let mut collision_frames = 0u64;

    for _ in 0..frames {
        let cfg = scenario.controls.frame_config(elapsed);
        if scenario.world.step(&cfg).collided {
            collision_frames += 1;
        }
    }

    let p = scenario.world.total_momentum();
    log::info!(
        "{frames} frames, t = {:.3} s, {collision_frames} with collisions, momentum = ({:.3}, {:.3}), kinetic energy = {:.3}",
        scenario.world.t,
        p.x,
        p.y,
        scenario.world.kinetic_energy()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The viewer installs its own logger through Bevy's LogPlugin
    if args.bench || args.headless.is_some() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if args.bench {
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_config(args.config.as_ref())?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let scenario = Scenario::build_scenario(scenario_cfg, args.preset, rng);

    match args.headless {
        Some(frames) => run_headless(scenario, frames, args.fps),
        None => run_2d(scenario),
    }

    Ok(())
}
