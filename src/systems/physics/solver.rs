//! Contact resolution: impulse-based velocity solve plus iterative
//! positional correction.
//!
//! Material combination rules (applied uniformly, stacking behavior depends
//! on them):
//! - restitution: product of the two bodies' coefficients
//! - friction (dynamic and static): arithmetic mean
//!
//! The product keeps near-dead tags dead against any surface; the mean keeps
//! stacks stable without either body's friction dominating.

use crate::core::vec2::{cross_sv, Vec2};

use super::body::RigidBody;
use super::collision::Contact;

/// Fraction of remaining penetration removed per position iteration
const CORRECTION_PERCENT: f32 = 0.4;

/// Mutable references to both contact bodies (split_at_mut to satisfy the
/// borrow checker; indices are distinct by construction).
fn contact_pair<'a>(bodies: &'a mut [RigidBody], c: &Contact) -> (&'a mut RigidBody, &'a mut RigidBody) {
    if c.a < c.b {
        let (left, right) = bodies.split_at_mut(c.b);
        (&mut left[c.a], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(c.a);
        (&mut right[0], &mut left[c.b])
    }
}

/// Apply a normal impulse with restitution, then a Coulomb friction impulse
/// clamped by the static-friction cone.
pub fn resolve_velocity(bodies: &mut [RigidBody], c: &Contact) {
    let (a, b) = contact_pair(bodies, c);

    let ra = c.point - a.pos;
    let rb = c.point - b.pos;

    let rel_vel = b.velocity + cross_sv(b.angular_vel, rb) - a.velocity - cross_sv(a.angular_vel, ra);
    let vn = rel_vel.dot(c.normal);

    // Already separating
    if vn > 0.0 {
        return;
    }

    let ra_cross_n = ra.cross(c.normal);
    let rb_cross_n = rb.cross(c.normal);
    let inv_mass_sum = a.inv_mass
        + b.inv_mass
        + ra_cross_n * ra_cross_n * a.inv_inertia
        + rb_cross_n * rb_cross_n * b.inv_inertia;
    if inv_mass_sum <= f32::EPSILON {
        return;
    }

    let e = a.restitution * b.restitution;
    let j = -(1.0 + e) * vn / inv_mass_sum;
    let impulse = c.normal * j;

    a.velocity = a.velocity - impulse * a.inv_mass;
    a.angular_vel -= ra.cross(impulse) * a.inv_inertia;
    b.velocity = b.velocity + impulse * b.inv_mass;
    b.angular_vel += rb.cross(impulse) * b.inv_inertia;

    // === Friction ===
    let rel_vel = b.velocity + cross_sv(b.angular_vel, rb) - a.velocity - cross_sv(a.angular_vel, ra);
    let tangent = (rel_vel - c.normal * rel_vel.dot(c.normal)).normalize();
    if tangent == Vec2::zero() {
        return;
    }

    let ra_cross_t = ra.cross(tangent);
    let rb_cross_t = rb.cross(tangent);
    let inv_mass_sum_t = a.inv_mass
        + b.inv_mass
        + ra_cross_t * ra_cross_t * a.inv_inertia
        + rb_cross_t * rb_cross_t * b.inv_inertia;
    if inv_mass_sum_t <= f32::EPSILON {
        return;
    }

    let jt = -rel_vel.dot(tangent) / inv_mass_sum_t;

    let mu_static = 0.5 * (a.static_friction + b.static_friction);
    let mu_dynamic = 0.5 * (a.friction + b.friction);

    // Inside the static cone the tangential motion is cancelled outright,
    // otherwise slide with dynamic friction. The clamped impulse keeps jt's
    // sign so it always opposes the slide.
    let friction_impulse = if jt.abs() <= j * mu_static {
        tangent * jt
    } else {
        tangent * (j * mu_dynamic * jt.signum())
    };

    a.velocity = a.velocity - friction_impulse * a.inv_mass;
    a.angular_vel -= ra.cross(friction_impulse) * a.inv_inertia;
    b.velocity = b.velocity + friction_impulse * b.inv_mass;
    b.angular_vel += rb.cross(friction_impulse) * b.inv_inertia;
}

/// Push the pair apart along the contact normal, weighted by inverse mass.
/// Slop below the larger of the two bodies' tolerances is left alone.
pub fn correct_positions(bodies: &mut [RigidBody], c: &Contact) {
    let (a, b) = contact_pair(bodies, c);

    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum <= f32::EPSILON {
        return;
    }

    let slop = a.slop.max(b.slop);
    let magnitude = (c.depth - slop).max(0.0) / inv_mass_sum * CORRECTION_PERCENT;
    let correction = c.normal * magnitude;

    a.pos = a.pos - correction * a.inv_mass;
    b.pos = b.pos + correction * b.inv_mass;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::physics::body::BodySpec;
    use crate::systems::physics::collision::collide;

    fn falling_onto_floor() -> Vec<RigidBody> {
        let floor = BodySpec {
            width: 200.0,
            height: 20.0,
            y: 50.0,
            is_static: true,
            ..Default::default()
        };
        let tag = BodySpec {
            width: 40.0,
            height: 10.0,
            y: 36.0,
            restitution: 0.0,
            can_rotate: false,
            ..Default::default()
        };
        let mut floor = RigidBody::from_spec(&floor, 1).unwrap();
        let mut tag = RigidBody::from_spec(&tag, 2).unwrap();
        floor.restitution = 0.0;
        tag.velocity = Vec2::new(0.0, 120.0);
        vec![tag, floor]
    }

    #[test]
    fn normal_impulse_stops_approach() {
        let mut bodies = falling_onto_floor();
        let c = collide(&bodies[0], &bodies[1], 0, 1).expect("tag overlaps floor");
        resolve_velocity(&mut bodies, &c);
        // Zero restitution: downward velocity removed, not reversed
        assert!(bodies[0].velocity.y.abs() < 1.0);
        // Static floor untouched
        assert_eq!(bodies[1].velocity, Vec2::zero());
    }

    #[test]
    fn friction_opposes_sliding() {
        let mut bodies = falling_onto_floor();
        bodies[0].velocity = Vec2::new(300.0, 120.0);
        let c = collide(&bodies[0], &bodies[1], 0, 1).expect("tag overlaps floor");
        resolve_velocity(&mut bodies, &c);
        // Sliding speed drops, and friction alone can never reverse it
        assert!(bodies[0].velocity.x < 300.0, "vx = {}", bodies[0].velocity.x);
        assert!(bodies[0].velocity.x >= 0.0);
    }

    #[test]
    fn separating_contact_is_left_alone() {
        let mut bodies = falling_onto_floor();
        bodies[0].velocity = Vec2::new(0.0, -50.0);
        let c = collide(&bodies[0], &bodies[1], 0, 1).unwrap();
        resolve_velocity(&mut bodies, &c);
        assert!((bodies[0].velocity.y + 50.0).abs() < 1e-3);
    }

    #[test]
    fn positional_correction_reduces_penetration() {
        let mut bodies = falling_onto_floor();
        let before = collide(&bodies[0], &bodies[1], 0, 1).unwrap().depth;
        for _ in 0..10 {
            if let Some(c) = collide(&bodies[0], &bodies[1], 0, 1) {
                correct_positions(&mut bodies, &c);
            }
        }
        let after = collide(&bodies[0], &bodies[1], 0, 1).map(|c| c.depth).unwrap_or(0.0);
        assert!(after < before);
        // Static floor never moves
        assert_eq!(bodies[1].pos.y, 50.0);
    }
}
