use crate::core::vec2::Vec2;
use crate::domain::config::TagFieldConfig;
use crate::systems::physics::body::BodyError;
use crate::systems::physics::world::{SolverConfig, World};
use crate::systems::tags::TagSet;

use super::boundary;
use super::{FieldCore, SnapshotBuffers};

pub(super) fn create_field_core(
    width: f32,
    height: f32,
    config: TagFieldConfig,
) -> Result<FieldCore, BodyError> {
    // A zero-sized container would make degenerate boundary bodies
    if width <= 0.0 || height <= 0.0 {
        return Err(BodyError::InvalidSize);
    }

    let mut world = World::new(
        Vec2::new(config.gravity_x, config.gravity_y),
        SolverConfig::new(config.velocity_iterations, config.position_iterations),
    );
    boundary::install_boundaries(&mut world, width, height)?;

    Ok(FieldCore {
        world,
        tags: TagSet::new(),
        config,
        width,
        height,
        step_acc_ms: 0.0,
        last_pump_ms: None,
        frame: 0,
        rng_state: 12345,
        destroyed: false,

        render: SnapshotBuffers {
            ids: Vec::with_capacity(32),
            transforms: Vec::with_capacity(96),
        },
    })
}
