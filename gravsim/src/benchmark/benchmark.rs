use std::time::Instant;

use crate::simulation::params::{FrameConfig, Parameters};
use crate::simulation::states::{Body, NVec2, World};

/// Helper to build a World of `n` small bodies laid out on a grid
fn make_world(n: usize) -> World {
    let params = Parameters::default();
    let side = (n as f64).sqrt().ceil().max(1.0);
    let cell = params.width.min(params.height) / side;

    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions and velocities, no rand needed
            let x = NVec2::new(
                ((i_f % side) + 0.5) * cell,
                ((i_f / side).floor() + 0.5) * cell,
            );
            let v = NVec2::new((i_f * 0.37).sin() * 50.0, (i_f * 0.13).cos() * 50.0);
            Body::new(x, v, (cell * 0.25).min(10.0))
        })
        .collect();

    World::with_bodies(params, bodies)
}

/// Time `World::step` for growing body counts.
/// Prints CSV so it can be pasted straight into a spreadsheet
pub fn bench_step() {
    let ns = [2, 8, 32, 128, 512];
    let cfg = FrameConfig::default();

    println!("N,pairs,ms_per_step,collision_frames");
    for n in ns {
        let mut world = make_world(n);
        // Small n: many steps to smooth noise
        let steps = if n <= 128 { 1000 } else { 50 };

        // Warm-up
        world.step(&cfg);

        let mut collision_frames = 0;
        let t0 = Instant::now();
        for _ in 0..steps {
            if world.step(&cfg).collided {
                collision_frames += 1;
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{},{:.6},{}", n, world.pairs().len(), ms, collision_frames);
    }
}
