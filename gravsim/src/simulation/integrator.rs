//! Frame step for the gravity toy
//!
//! One call to [`euler_step`] runs the whole frame to completion:
//! 1. every body records its trail, drifts by `v dt` and bounces off the borders
//! 2. every unordered pair interacts once (gravity, or a collision impulse)
//!
//! All single-body work finishes before any pair is visited.

use super::forces::{Interaction, NewtonianGravity};
use super::params::FrameConfig;
use super::states::World;

/// Summary of one frame, consumed by the viewer for sound and HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub collided: bool, // any wall bounce or body contact this frame
    pub border_bounces: usize, // bodies that touched a wall
    pub contacts: usize, // pairs that signalled a collision
}

/// Advance `world` by one frame using inputs captured in `cfg`.
pub fn euler_step(world: &mut World, cfg: &FrameConfig) -> FrameReport {
    let mut report = FrameReport::default();
    if world.bodies.is_empty() { // No bodies, return
        return report;
    }

    // Simulated step: real elapsed time scaled by the speed control
    //   dt = elapsed * speed
    // speed 0 gives dt 0, bodies hold still but trails keep recording
    let dt = cfg.dt();
    let (width, height) = (world.parameters.width, world.parameters.height);
    let max_history = world.parameters.max_history;

    // -------------------------
    // Pass 1, per body:
    // - push the current position into the trail
    // - explicit Euler drift: x += v * dt
    // - reflect off the walls, clamping x into [r, extent - r]
    for body in world.bodies.iter_mut() {
        body.update(dt, max_history);
        if body.collide_borders(width, height) {
            report.border_bounces += 1;
        }
    }

    // -------------------------
    // Pass 2, per unordered pair (i, j) with i < j:
    // - apart: gravity kicks, equal and opposite
    // - touching: one elastic impulse per overlap episode
    // G is signed once here from the repulsive flag
    let gravity = NewtonianGravity {
        G: cfg.effective_g(),
        fallback_normal: world.parameters.fallback_normal,
    };
    // Index loop: pair_mut needs &mut world while pairs() borrows it
    for k in 0..world.pairs().len() {
        let (i, j) = world.pairs()[k];
        let (a, b) = world.pair_mut(i, j);
        let interaction = gravity.attract(a, b, dt);
        if interaction.signals_collision() {
            report.contacts += 1;
        }
        if let Interaction::Collision(outcome) = interaction {
            log::trace!("pair ({i}, {j}): {outcome:?}");
        }
    }

    world.t += dt;

    // Sound cue: any wall bounce or any contact past the debounce
    report.collided = report.border_bounces > 0 || report.contacts > 0;
    if report.collided {
        log::debug!(
            "t = {:.3}: {} border bounce(s), {} contact(s)",
            world.t,
            report.border_bounces,
            report.contacts
        );
    }
    report
}
