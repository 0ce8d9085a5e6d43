use crate::core::vec2::Vec2;
use crate::systems::physics::body::BodyError;
use crate::systems::physics::world::{SolverConfig, World};
use crate::systems::tags::TagId;

use super::{boundary, FieldCore};

pub(super) fn set_tags(core: &mut FieldCore, labels: &[String]) -> Result<(), BodyError> {
    if core.destroyed {
        return Ok(());
    }
    core.tags.reconcile(
        labels,
        &mut core.world,
        &core.config,
        core.width,
        &mut core.rng_state,
    )
}

pub(super) fn dismiss(core: &mut FieldCore, id: TagId) -> Option<usize> {
    if core.destroyed {
        return None;
    }
    core.tags.dismiss(id, &mut core.world)
}

pub(super) fn wake_all(core: &mut FieldCore) {
    if core.destroyed {
        return;
    }
    core.world.wake_all();
}

/// Tear everything down, then build the new world before respawning. The old
/// world's bodies, clock, and banked step time are gone before the new one
/// exists - the two stepping states never overlap. A destroyed core stays
/// destroyed.
pub(super) fn rebuild(core: &mut FieldCore, width: f32, height: f32) -> Result<(), BodyError> {
    if core.destroyed {
        return Ok(());
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(BodyError::InvalidSize);
    }

    let labels = core.tags.labels().to_vec();
    core.tags.release_bodies(&mut core.world);

    let mut world = World::new(
        Vec2::new(core.config.gravity_x, core.config.gravity_y),
        SolverConfig::new(core.config.velocity_iterations, core.config.position_iterations),
    );
    boundary::install_boundaries(&mut world, width, height)?;

    core.world = world;
    core.width = width;
    core.height = height;
    core.step_acc_ms = 0.0;
    core.last_pump_ms = None;
    core.frame = 0;
    core.render.ids.clear();
    core.render.transforms.clear();

    // Fresh bodies for every kept label, dropping in again
    core.tags.reconcile(
        &labels,
        &mut core.world,
        &core.config,
        core.width,
        &mut core.rng_state,
    )
}

/// Idempotent teardown: the stepping clock stops, bodies are released, and
/// subsequent pump/sample calls are no-ops.
pub(super) fn destroy(core: &mut FieldCore) {
    if core.destroyed {
        return;
    }
    core.tags.release_bodies(&mut core.world);
    core.world = World::new(Vec2::zero(), SolverConfig::default());
    core.step_acc_ms = 0.0;
    core.last_pump_ms = None;
    core.render.ids.clear();
    core.render.transforms.clear();
    core.destroyed = true;
}
