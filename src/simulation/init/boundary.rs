//! Static boundary bodies, built once per world lifetime.
//!
//! Sizing is captured at creation only; a container resize tears the whole
//! world down and rebuilds it (see `FieldCore::rebuild`).

use crate::systems::physics::body::{BodyError, BodySpec};
use crate::systems::physics::world::World;

/// Gap between the floor's top face and the container's true bottom edge,
/// leaving room for the UI's drop-shadow. Render concern; it enters the
/// collision math only as this offset.
pub(super) const FLOOR_MARGIN: f32 = 24.0;
pub(super) const FLOOR_THICKNESS: f32 = 80.0;
/// Extra floor width past each container edge so tags can never slip off a
/// corner while the walls hold them in
pub(super) const FLOOR_OVERHANG: f32 = 40.0;
pub(super) const WALL_THICKNESS: f32 = 80.0;

fn static_spec(x: f32, y: f32, width: f32, height: f32) -> BodySpec {
    BodySpec {
        width,
        height,
        x,
        y,
        is_static: true,
        restitution: 0.0,
        friction: 0.5,
        static_friction: 0.6,
        ..Default::default()
    }
}

/// Floor plus two side walls. The floor's top face sits FLOOR_MARGIN above
/// the container bottom; each wall is offset half its thickness outward so
/// its inner face aligns with the container edge.
pub(super) fn install_boundaries(world: &mut World, width: f32, height: f32) -> Result<(), BodyError> {
    let floor = static_spec(
        width * 0.5,
        height - FLOOR_MARGIN + FLOOR_THICKNESS * 0.5,
        width + 2.0 * FLOOR_OVERHANG,
        FLOOR_THICKNESS,
    );
    world.add_body(&floor)?;

    let left = static_spec(-WALL_THICKNESS * 0.5, height * 0.5, WALL_THICKNESS, height);
    world.add_body(&left)?;

    let right = static_spec(width + WALL_THICKNESS * 0.5, height * 0.5, WALL_THICKNESS, height);
    world.add_body(&right)?;

    Ok(())
}

/// World-space y of the floor's collision surface for a given container height
pub fn floor_top(container_height: f32) -> f32 {
    container_height - FLOOR_MARGIN
}
