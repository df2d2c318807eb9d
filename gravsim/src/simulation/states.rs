//! Core state types for the gravity toy.
//!
//! Defines:
//! - `Body`  a uniform-density disc with its trail history
//! - `World` the ordered body arena plus the list of unordered pairs
//!
//! Bodies are never removed, so a body's index into `World::bodies` is a
//! stable handle and the pair list only ever grows.

use std::collections::VecDeque;
use std::f64::consts::PI;

use nalgebra::Vector2;
use rand::Rng;

use super::integrator::{euler_step, FrameReport};
use super::params::{FrameConfig, Parameters, MIN_RADIUS};

pub type NVec2 = Vector2<f64>;

/// A velocity change applied directly to a body, tagged by its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impulse {
    Gravity(NVec2), // pairwise attraction/repulsion for one frame
    Contact(NVec2), // elastic collision along the contact normal
}

impl Impulse {
    pub fn delta_v(&self) -> NVec2 {
        match *self {
            Impulse::Gravity(dv) | Impulse::Contact(dv) => dv,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub position: NVec2, // screen coordinates, y down
    pub velocity: NVec2, // units per second
    pub radius: f64,
    pub mass: f64, // pi * r^2, density 1
    history: VecDeque<NVec2>,
    pub collided_last_frame: bool,
}

impl Body {
    pub fn new(position: NVec2, velocity: NVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass: PI * radius * radius,
            history: VecDeque::new(),
            collided_last_frame: false,
        }
    }

    /// Past positions, oldest first.
    pub fn history(&self) -> &VecDeque<NVec2> {
        &self.history
    }

    /// Record the current position in the trail, then drift by `velocity * dt`.
    ///
    /// Forces never go through an acceleration term; they arrive as
    /// [`Impulse`]s, so the kinematic update is a plain explicit Euler drift.
    pub fn update(&mut self, dt: f64, max_history: usize) {
        self.history.push_back(self.position);
        while self.history.len() > max_history {
            self.history.pop_front();
        }

        self.position += self.velocity * dt;
    }

    /// Axis-aligned elastic bounce off the `[0, width] x [0, height]` box.
    ///
    /// Returns `true` if either axis bounced.
    pub fn collide_borders(&mut self, width: f64, height: f64) -> bool {
        let bounced_x = bounce_axis(&mut self.position.x, &mut self.velocity.x, self.radius, width);
        let bounced_y = bounce_axis(&mut self.position.y, &mut self.velocity.y, self.radius, height);
        bounced_x || bounced_y
    }

    pub fn apply_impulse(&mut self, impulse: Impulse) {
        self.velocity += impulse.delta_v();
    }

    pub fn momentum(&self) -> NVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}

// helpers ==============================================================================

fn bounce_axis(pos: &mut f64, vel: &mut f64, radius: f64, extent: f64) -> bool {
    if *pos - radius <= 0.0 {
        *pos = radius;
        *vel = vel.abs();
        true
    } else if *pos >= extent - radius {
        *pos = extent - radius;
        *vel = -vel.abs();
        true
    } else {
        false
    }
}

/// Uniform draw from `[lo, hi)`, or `lo` when the range is empty.
pub(crate) fn sample_or_low<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

// =========================================================================================
// World
// =========================================================================================

#[derive(Debug, Clone)]
pub struct World {
    pub parameters: Parameters,
    pub(crate) bodies: Vec<Body>, // creation order
    pairs: Vec<(usize, usize)>,   // (i, j) with i < j, indices into `bodies`
    pub t: f64,                   // simulated time
}

impl World {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            bodies: Vec::new(),
            pairs: Vec::new(),
            t: 0.0,
        }
    }

    pub fn with_bodies(parameters: Parameters, bodies: Vec<Body>) -> Self {
        let mut world = Self::new(parameters);
        for body in bodies {
            world.add_body(body);
        }
        world
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, i: usize) -> &Body {
        &self.bodies[i]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Unique unordered pairs, in the order they were created.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Insert a body and pair it with every body that already exists.
    /// Returns the new body's index.
    pub fn add_body(&mut self, body: Body) -> usize {
        let new = self.bodies.len();
        self.bodies.push(body);
        self.pairs.extend((0..new).map(|i| (i, new)));
        new
    }

    /// Create a body at `position` with a random velocity and radius.
    ///
    /// Velocity components are drawn from `velocity_range`, the radius from
    /// `radius_range`, both half-open. An empty range (`lo >= hi`) yields its
    /// low bound. The radius is kept within `[MIN_RADIUS, max_radius]` so the
    /// body always fits inside the walls.
    pub fn spawn<R: Rng>(
        &mut self,
        position: NVec2,
        velocity_range: (f64, f64),
        radius_range: (f64, f64),
        rng: &mut R,
    ) -> usize {
        let velocity = NVec2::new(
            sample_or_low(rng, velocity_range.0, velocity_range.1),
            sample_or_low(rng, velocity_range.0, velocity_range.1),
        );
        let radius = sample_or_low(rng, radius_range.0, radius_range.1)
            .max(MIN_RADIUS)
            .min(self.parameters.max_radius());
        let idx = self.add_body(Body::new(position, velocity, radius));
        log::info!(
            "spawned body {idx} at ({:.1}, {:.1}) r = {:.1}, {} pairs",
            position.x,
            position.y,
            radius,
            self.pairs.len()
        );
        idx
    }

    /// Mutable access to two distinct bodies at once.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Body, &mut Body) {
        assert!(i != j, "a pair needs two distinct bodies");
        if i < j {
            let (head, tail) = self.bodies.split_at_mut(j);
            (&mut head[i], &mut tail[0])
        } else {
            let (head, tail) = self.bodies.split_at_mut(i);
            (&mut tail[0], &mut head[j])
        }
    }

    /// Advance one frame with the given inputs.
    pub fn step(&mut self, cfg: &FrameConfig) -> FrameReport {
        euler_step(self, cfg)
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
