//! The rigid-body world: integration, contact resolution, sleep management.

use crate::core::vec2::Vec2;

use super::body::{BodyError, BodyId, BodySpec, RigidBody};
use super::collision::{collide, Contact};
use super::solver::{correct_positions, resolve_velocity};

/// Linear speed (px/s) below which a body counts as motionless
const SLEEP_LINEAR_EPS: f32 = 3.0;
/// Angular speed (rad/s) below which a body counts as motionless
const SLEEP_ANGULAR_EPS: f32 = 0.05;
/// Rate at which a rotation-locked body is pulled back to its rest angle
const ROTATION_LOCK_STIFFNESS: f32 = 12.0;

/// Above the sleep epsilons in either linear or angular speed
fn is_moving(body: &RigidBody) -> bool {
    body.velocity.length_squared() >= SLEEP_LINEAR_EPS * SLEEP_LINEAR_EPS
        || body.angular_vel.abs() >= SLEEP_ANGULAR_EPS
}

/// Solver iteration counts. More iterations = more accurate, slower.
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    pub velocity_iterations: u32,
    pub position_iterations: u32,
}

impl SolverConfig {
    /// Clamp both counts to at least one iteration.
    pub fn new(velocity_iterations: u32, position_iterations: u32) -> Self {
        Self {
            velocity_iterations: velocity_iterations.max(1),
            position_iterations: position_iterations.max(1),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { velocity_iterations: 8, position_iterations: 4 }
    }
}

/// The simulation world
pub struct World {
    bodies: Vec<RigidBody>,
    gravity: Vec2,
    config: SolverConfig,
    next_id: BodyId,
}

impl World {
    pub fn new(gravity: Vec2, config: SolverConfig) -> Self {
        Self {
            bodies: Vec::new(),
            gravity,
            config,
            next_id: 1,
        }
    }

    /// Add a new body. Degenerate specs are rejected here and never enter
    /// the world.
    pub fn add_body(&mut self, spec: &BodySpec) -> Result<BodyId, BodyError> {
        let id = self.next_id;
        let body = RigidBody::from_spec(spec, id)?;
        self.next_id = self.next_id.saturating_add(1);
        self.bodies.push(body);
        Ok(id)
    }

    /// Remove a body by ID. Returns false if no such body exists.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        if let Some(idx) = self.bodies.iter().position(|b| b.id == id) {
            // Keep insertion order stable for deterministic iteration
            self.bodies.remove(idx);
            return true;
        }
        false
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Clear every dynamic body's sleep state so the whole pile resettles.
    pub fn wake_all(&mut self) {
        for body in self.bodies.iter_mut() {
            body.wake();
        }
    }

    /// Advance the simulation by `dt` seconds. Never fails.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.integrate(dt);
        self.solve_contacts();
        self.update_sleep(dt);
    }

    /// Semi-implicit Euler: velocity first, then position from the new
    /// velocity. Sleeping and static bodies are skipped.
    fn integrate(&mut self, dt: f32) {
        for body in self.bodies.iter_mut() {
            if !body.is_awake_dynamic() {
                continue;
            }

            body.velocity = body.velocity + self.gravity * dt;
            // Air damping as exponential-ish decay, stable for any dt
            let damping = 1.0 / (1.0 + body.air_damping * dt);
            body.velocity = body.velocity * damping;
            body.pos = body.pos + body.velocity * dt;

            if body.can_rotate {
                body.angular_vel *= damping;
                body.angle += body.angular_vel * dt;
            } else {
                // Rotation lock: no spin, and drift from positional
                // correction is pulled back toward the spawn tilt.
                body.angular_vel = 0.0;
                let t = (ROTATION_LOCK_STIFFNESS * dt).min(1.0);
                body.angle += (body.rest_angle - body.angle) * t;
            }
        }
    }

    /// Gather contacts for the current positions.
    ///
    /// Static/static pairs and fully sleeping pairs are skipped. A sleeping
    /// body is woken only when the contacting body is actually moving; a
    /// resting awake neighbor leaves it asleep, so a stack can drift off
    /// body by body instead of the pair resetting each other forever.
    fn gather_contacts(&mut self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let count = self.bodies.len();

        for i in 0..count {
            for j in (i + 1)..count {
                {
                    let a = &self.bodies[i];
                    let b = &self.bodies[j];
                    if a.is_static && b.is_static {
                        continue;
                    }
                    // Neither side is an awake dynamic body: nothing to solve
                    if !a.is_awake_dynamic() && !b.is_awake_dynamic() {
                        continue;
                    }
                }

                if let Some(contact) = collide(&self.bodies[i], &self.bodies[j], i, j) {
                    let i_moving =
                        self.bodies[i].is_awake_dynamic() && is_moving(&self.bodies[i]);
                    let j_moving =
                        self.bodies[j].is_awake_dynamic() && is_moving(&self.bodies[j]);
                    if self.bodies[i].sleeping && j_moving {
                        self.bodies[i].wake();
                    }
                    if self.bodies[j].sleeping && i_moving {
                        self.bodies[j].wake();
                    }
                    contacts.push(contact);
                }
            }
        }

        contacts
    }

    fn solve_contacts(&mut self) {
        for _ in 0..self.config.velocity_iterations {
            let contacts = self.gather_contacts();
            if contacts.is_empty() {
                break;
            }
            for contact in &contacts {
                resolve_velocity(&mut self.bodies, contact);
            }
        }

        for _ in 0..self.config.position_iterations {
            let contacts = self.gather_contacts();
            if contacts.is_empty() {
                break;
            }
            for contact in &contacts {
                correct_positions(&mut self.bodies, contact);
            }
        }
    }

    /// Accumulate low-motion time; bodies past their threshold go to sleep
    /// and stop consuming integration and collision work.
    fn update_sleep(&mut self, dt: f32) {
        for body in self.bodies.iter_mut() {
            if !body.is_awake_dynamic() || body.sleep_threshold <= 0.0 {
                continue;
            }

            let slow = body.velocity.length_squared() < SLEEP_LINEAR_EPS * SLEEP_LINEAR_EPS
                && body.angular_vel.abs() < SLEEP_ANGULAR_EPS;

            if slow {
                body.sleep_acc += dt;
                if body.sleep_acc >= body.sleep_threshold {
                    body.fall_asleep();
                }
            } else {
                body.sleep_acc = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    fn world_with_floor(floor_y: f32) -> World {
        let mut world = World::new(Vec2::new(0.0, 1200.0), SolverConfig::default());
        let floor = BodySpec {
            width: 500.0,
            height: 40.0,
            x: 0.0,
            y: floor_y,
            is_static: true,
            restitution: 0.0,
            ..Default::default()
        };
        world.add_body(&floor).unwrap();
        world
    }

    fn tag_spec(x: f32, y: f32) -> BodySpec {
        BodySpec {
            width: 80.0,
            height: 40.0,
            x,
            y,
            can_rotate: false,
            density: 2.0,
            restitution: 0.05,
            friction: 0.4,
            static_friction: 0.5,
            air_damping: 0.1,
            sleep_threshold: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn add_body_rejects_degenerate_spec() {
        let mut world = World::new(Vec2::zero(), SolverConfig::default());
        let bad = BodySpec { width: -5.0, ..Default::default() };
        assert!(world.add_body(&bad).is_err());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn remove_body_by_id() {
        let mut world = world_with_floor(400.0);
        let id = world.add_body(&tag_spec(100.0, 0.0)).unwrap();
        assert_eq!(world.body_count(), 2);
        assert!(world.remove_body(id));
        assert!(!world.remove_body(id));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn dropped_body_settles_on_floor_and_sleeps() {
        // Floor top face at y = 380 (center 400, half height 20)
        let mut world = world_with_floor(400.0);
        let id = world.add_body(&tag_spec(100.0, 0.0)).unwrap();

        for _ in 0..600 {
            world.step(STEP);
        }

        let body = world.body(id).unwrap();
        // Resting position: floor top minus half height (within slop)
        assert!((body.pos.y - 360.0).abs() < 1.5, "y = {}", body.pos.y);
        assert!(body.sleeping, "settled body should be asleep");

        // A sleeping body stops changing position entirely
        let before = body.pos;
        world.step(STEP);
        assert_eq!(world.body(id).unwrap().pos, before);
    }

    #[test]
    fn rotation_locked_body_keeps_its_tilt() {
        let mut world = world_with_floor(400.0);
        let mut spec = tag_spec(100.0, 0.0);
        spec.angle = 0.08;
        let id = world.add_body(&spec).unwrap();

        for _ in 0..600 {
            world.step(STEP);
        }

        let body = world.body(id).unwrap();
        assert!((body.angle - 0.08).abs() < 0.02, "angle drifted to {}", body.angle);
        assert_eq!(body.angular_vel, 0.0);
    }

    #[test]
    fn wake_all_clears_sleep_state() {
        let mut world = world_with_floor(400.0);
        let id = world.add_body(&tag_spec(100.0, 0.0)).unwrap();

        for _ in 0..600 {
            world.step(STEP);
        }
        assert!(world.body(id).unwrap().sleeping);

        world.wake_all();
        let body = world.body(id).unwrap();
        assert!(!body.sleeping);
        assert_eq!(body.sleep_acc, 0.0);
    }

    #[test]
    fn stacked_tags_fall_asleep_together() {
        let mut world = world_with_floor(400.0);
        let below = world.add_body(&tag_spec(100.0, 300.0)).unwrap();
        let above = world.add_body(&tag_spec(100.0, 100.0)).unwrap();

        // A resting awake neighbor must not keep resetting the other's
        // sleep accumulator, so the whole stack goes quiet.
        for _ in 0..900 {
            world.step(STEP);
        }
        assert!(world.body(below).unwrap().sleeping, "lower tag still awake");
        assert!(world.body(above).unwrap().sleeping, "upper tag still awake");
    }

    #[test]
    fn removing_support_lets_woken_neighbor_fall() {
        let mut world = world_with_floor(400.0);
        let below = world.add_body(&tag_spec(100.0, 300.0)).unwrap();
        let above = world.add_body(&tag_spec(100.0, 100.0)).unwrap();

        for _ in 0..900 {
            world.step(STEP);
        }
        let above_y = world.body(above).unwrap().pos.y;
        assert!(world.body(above).unwrap().sleeping);
        // Stacked on top of the lower tag, well above the floor rest height
        assert!(above_y < 330.0, "above_y = {}", above_y);

        world.remove_body(below);
        world.wake_all();
        assert!(!world.body(above).unwrap().sleeping);

        for _ in 0..600 {
            world.step(STEP);
        }
        let settled = world.body(above).unwrap();
        assert!(settled.pos.y > above_y + 20.0, "neighbor should have dropped");
        assert!((settled.pos.y - 360.0).abs() < 1.5);
    }

    #[test]
    fn static_bodies_never_move() {
        let mut world = world_with_floor(400.0);
        world.add_body(&tag_spec(0.0, 340.0)).unwrap();

        for _ in 0..300 {
            world.step(STEP);
        }

        let floor = &world.bodies()[0];
        assert!(floor.is_static);
        assert_eq!(floor.pos, Vec2::new(0.0, 400.0));
        assert!(!floor.sleeping);
    }

    #[test]
    fn step_with_zero_dt_is_a_noop() {
        let mut world = world_with_floor(400.0);
        let id = world.add_body(&tag_spec(50.0, 50.0)).unwrap();
        let before = world.body(id).unwrap().pos;
        world.step(0.0);
        assert_eq!(world.body(id).unwrap().pos, before);
    }
}
