//! Pairwise interactions for the gravity toy
//!
//! Each unordered pair is visited once per frame. Separated discs attract
//! (or repel) with Newtonian gravity; overlapping discs get one elastic
//! impulse per overlap episode instead.

use crate::simulation::states::{Body, Impulse, NVec2};

/// What happened between a pair in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Gravity,                    // discs apart, gravity applied
    Collision(CollisionOutcome), // discs overlapping
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Debounced,  // already resolved during this overlap episode
    Separating, // normal speed < 0, no impulse
    Resolved,   // impulse applied
}

impl Interaction {
    /// Whether this interaction should trigger the collision sound.
    pub fn signals_collision(&self) -> bool {
        matches!(
            self,
            Interaction::Collision(CollisionOutcome::Separating | CollisionOutcome::Resolved)
        )
    }
}

/// 2D Newtonian gravity between discs with `mass = pi r^2`
/// `G` is already signed: negative means repulsive
pub struct NewtonianGravity {
    pub G: f64, // signed gravitational constant
    pub fallback_normal: NVec2, // used by `collide` when centers coincide
}

impl NewtonianGravity {
    /// Interact `a` and `b` for one step of length `dt`.
    ///
    /// When the discs are apart the collision cooldown of both is cleared and
    /// `F = G m_a m_b / d^2` is applied as equal and opposite velocity changes.
    /// When they touch or overlap the pair is handed to [`collide`].
    pub fn attract(&self, a: &mut Body, b: &mut Body, dt: f64) -> Interaction {
        // r is the displacement vector from a to b
        // a is pulled along +r, b along -r
        let r = b.position - a.position;
        let dist = r.norm();

        // Discs touch once the center distance reaches the sum of radii
        // (dist == radii already counts as contact)
        let radii = a.radius + b.radius;
        if dist <= radii {
            return Interaction::Collision(collide(a, b, self.fallback_normal));
        }

        // Apart again: the next overlap is a new episode
        a.collided_last_frame = false;
        b.collided_last_frame = false;

        // Force magnitude:
        //   |F| = G * m_a * m_b / d^2
        // G carries the sign, so repulsion is just negative G
        let force = self.G * (a.mass * b.mass) / (dist * dist);

        // Project onto the axes with the unit direction r / d:
        //   F_x = |F| * r_x / d,  F_y = |F| * r_y / d
        // An axis with zero displacement is skipped and contributes nothing
        let mut f = NVec2::zeros();
        if r.x != 0.0 {
            f.x = force * (r.x / dist);
        }
        if r.y != 0.0 {
            f.y = force * (r.y / dist);
        }

        // -------------------------
        // Newton's second law over one step, applied straight to velocity:
        //   dv_a =  F * dt / m_a
        //   dv_b = -F * dt / m_b
        // (equal and opposite, so m_a dv_a + m_b dv_b = 0)
        a.apply_impulse(Impulse::Gravity(f * dt / a.mass));
        b.apply_impulse(Impulse::Gravity(-f * dt / b.mass));

        Interaction::Gravity
    }
}

/// Elastic collision impulse along the line of centers.
///
/// Resolved once per overlap episode: if both bodies are still flagged from
/// an earlier frame the call is a no-op. Tangential velocity is untouched.
/// `fallback_normal` is used when the two centers coincide exactly.
pub fn collide(a: &mut Body, b: &mut Body, fallback_normal: NVec2) -> CollisionOutcome {
    // Both still flagged: this overlap was resolved on an earlier frame
    if a.collided_last_frame && b.collided_last_frame {
        return CollisionOutcome::Debounced;
    }
    a.collided_last_frame = true;
    b.collided_last_frame = true;

    // Contact normal n = r / |r|, pointing from a to b
    // Coincident centers have no direction, fall back to a fixed one
    let r = b.position - a.position;
    let dist = r.norm();
    let n = if dist > 0.0 { r / dist } else { fallback_normal };

    // Closing speed along n:
    //   s = (v_a - v_b) . n
    // s < 0 means the discs already move apart, leave them alone
    let rel_vel = a.velocity - b.velocity;
    let speed = rel_vel.dot(&n);
    if speed < 0.0 {
        return CollisionOutcome::Separating;
    }

    // -------------------------
    // Perfectly elastic impulse along n (restitution 1):
    //   j = 2 s / (m_a + m_b)
    //   v_a -= j * m_b * n
    //   v_b += j * m_a * n
    // Momentum change is -j m_a m_b n + j m_b m_a n = 0, and the normal
    // components swap in the centre-of-mass frame, so kinetic energy is kept.
    // The tangential components are not touched.
    let j = 2.0 * speed / (a.mass + b.mass);
    a.apply_impulse(Impulse::Contact(-j * b.mass * n));
    b.apply_impulse(Impulse::Contact(j * a.mass * n));

    log::debug!(
        "contact: masses {:.1} / {:.1}, normal speed {:.3}",
        a.mass,
        b.mass,
        speed
    );
    CollisionOutcome::Resolved
}
