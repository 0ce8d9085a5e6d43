use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

pub type BodyId = u32;

/// Validation errors for body creation.
///
/// Degenerate inputs are rejected here, synchronously, so `World::step` never
/// has to handle a zero-mass or zero-extent body mid-simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyError {
    /// Width or height is zero or negative
    InvalidSize,
    /// Density is zero or negative
    InvalidDensity,
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::InvalidSize => write!(f, "body width and height must be positive"),
            BodyError::InvalidDensity => write!(f, "body density must be positive"),
        }
    }
}

/// Everything needed to construct a body, validated before it enters the World.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySpec {
    pub width: f32,
    pub height: f32,
    /// Rendering hint only, never used in collision math
    pub corner_radius: f32,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub is_static: bool,
    pub can_rotate: bool,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    pub static_friction: f32,
    pub air_damping: f32,
    pub slop: f32,
    /// Low-motion seconds before the body is put to sleep (0 = never sleeps)
    pub sleep_threshold: f32,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            corner_radius: 0.0,
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            is_static: false,
            can_rotate: true,
            density: 1.0,
            restitution: 0.2,
            friction: 0.4,
            static_friction: 0.5,
            air_damping: 0.0,
            slop: 0.05,
            sleep_threshold: 0.0,
        }
    }
}

/// Rigid Body - a solid rectangle that moves as a single unit
pub struct RigidBody {
    /// Unique ID for this body
    pub id: BodyId,

    // === Shape (half extents, rectangle) ===
    pub half_width: f32,
    pub half_height: f32,
    /// Carried through to the snapshot for rounded-corner rendering
    pub corner_radius: f32,

    // === Physics state ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Angle the rotation lock corrects toward (spawn tilt)
    pub rest_angle: f32,
    /// Velocity vector (pixels per second)
    pub velocity: Vec2,
    /// Angular velocity (radians per second)
    pub angular_vel: f32,

    // === Mass ===
    pub density: f32,
    /// 1/mass; 0 for static bodies
    pub inv_mass: f32,
    /// 1/inertia; 0 for static bodies and rotation-locked bodies
    pub inv_inertia: f32,

    // === Material ===
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    pub friction: f32,
    pub static_friction: f32,
    /// Velocity decay per second while airborne
    pub air_damping: f32,
    /// Allowed penetration before positional correction kicks in
    pub slop: f32,

    // === Flags ===
    pub is_static: bool,
    pub can_rotate: bool,

    // === Sleep state ===
    pub sleeping: bool,
    /// Accumulated low-motion seconds
    pub sleep_acc: f32,
    pub sleep_threshold: f32,
}

impl RigidBody {
    /// Build a body from a validated spec.
    ///
    /// Mass = density * area; inertia uses the solid-rectangle formula
    /// m * (w^2 + h^2) / 12. Static bodies get infinite mass and inertia;
    /// rotation-locked bodies get infinite inertia only.
    pub fn from_spec(spec: &BodySpec, id: BodyId) -> Result<Self, BodyError> {
        if spec.width <= 0.0 || spec.height <= 0.0 {
            return Err(BodyError::InvalidSize);
        }
        if spec.density <= 0.0 {
            return Err(BodyError::InvalidDensity);
        }

        let mass = spec.density * spec.width * spec.height;
        let inertia = mass * (spec.width * spec.width + spec.height * spec.height) / 12.0;

        let (inv_mass, inv_inertia) = if spec.is_static {
            (0.0, 0.0)
        } else if spec.can_rotate {
            (1.0 / mass, 1.0 / inertia)
        } else {
            (1.0 / mass, 0.0)
        };

        Ok(Self {
            id,
            half_width: spec.width * 0.5,
            half_height: spec.height * 0.5,
            corner_radius: spec.corner_radius,
            pos: Vec2::new(spec.x, spec.y),
            angle: spec.angle,
            rest_angle: spec.angle,
            velocity: Vec2::zero(),
            angular_vel: 0.0,
            density: spec.density,
            inv_mass,
            inv_inertia,
            restitution: spec.restitution.clamp(0.0, 1.0),
            friction: spec.friction.max(0.0),
            static_friction: spec.static_friction.max(0.0),
            air_damping: spec.air_damping.max(0.0),
            slop: spec.slop.max(0.0),
            is_static: spec.is_static,
            can_rotate: spec.can_rotate,
            sleeping: false,
            sleep_acc: 0.0,
            sleep_threshold: spec.sleep_threshold.max(0.0),
        })
    }

    /// Local rotation axes of the rectangle in world space
    #[inline]
    pub fn axes(&self) -> (Vec2, Vec2) {
        let (sin, cos) = self.angle.sin_cos();
        (Vec2::new(cos, sin), Vec2::new(-sin, cos))
    }

    /// The four corners in world space
    pub fn corners(&self) -> [Vec2; 4] {
        let (ux, uy) = self.axes();
        let ex = ux * self.half_width;
        let ey = uy * self.half_height;
        [
            self.pos + ex + ey,
            self.pos + ex - ey,
            self.pos - ex + ey,
            self.pos - ex - ey,
        ]
    }

    #[inline]
    pub fn is_awake_dynamic(&self) -> bool {
        !self.is_static && !self.sleeping
    }

    /// Clear sleep state so the body integrates again next step.
    /// No-op for static bodies, which never sleep-toggle.
    pub fn wake(&mut self) {
        if self.is_static {
            return;
        }
        self.sleeping = false;
        self.sleep_acc = 0.0;
    }

    /// Put the body to sleep and kill residual motion.
    pub fn fall_asleep(&mut self) {
        self.sleeping = true;
        self.velocity = Vec2::zero();
        self.angular_vel = 0.0;
    }
}
