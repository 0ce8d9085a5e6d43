//! Simulation driver - owns the World, the fixed-step cadence, the tag set,
//! and the per-frame position snapshot.
//!
//! Orchestration only: boundary construction lives in init/, stepping in
//! step/, snapshot extraction in render/, tag commands in commands/. The
//! `#[wasm_bindgen]` surface is the facade.

use crate::domain::config::TagFieldConfig;
use crate::systems::physics::body::BodyError;
use crate::systems::physics::world::World;
use crate::systems::tags::{TagId, TagSet, TrackedTag};

#[path = "init/init.rs"]
mod init;
#[path = "init/boundary.rs"]
mod boundary;
#[path = "step/step.rs"]
mod step;
#[path = "render/snapshot.rs"]
mod snapshot;
#[path = "commands/commands.rs"]
mod commands;
mod facade;

pub use facade::TagField;
pub use snapshot::{PositionSnapshot, TagTransform};

/// Flat per-frame transfer buffers the JS renderer reads straight out of
/// WASM linear memory: one u64 id and an [x, y, rotation] f32 triple per tag.
pub(crate) struct SnapshotBuffers {
    pub(crate) ids: Vec<u64>,
    pub(crate) transforms: Vec<f32>,
}

/// The simulation driver core (plain Rust, fully testable off-wasm)
pub struct FieldCore {
    world: World,
    tags: TagSet,
    config: TagFieldConfig,

    // Viewport captured at creation; resizing means a full rebuild
    width: f32,
    height: f32,

    // Fixed-step clock
    step_acc_ms: f64,
    last_pump_ms: Option<f64>,
    frame: u64,

    rng_state: u32,
    destroyed: bool,

    render: SnapshotBuffers,
}

impl FieldCore {
    /// Create a world sized to the container, with floor and side walls
    /// installed. Width and height must be positive; the facade defers
    /// creation until a real layout size exists.
    pub fn new(width: f32, height: f32, config: TagFieldConfig) -> Result<Self, BodyError> {
        init::create_field_core(width, height, config)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Completed fixed steps since creation (or last rebuild)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn config(&self) -> &TagFieldConfig {
        &self.config
    }

    pub fn tracked_tags(&self) -> &[TrackedTag] {
        self.tags.tags()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Reconcile the tracked set against a new ordered label sequence
    pub fn set_tags(&mut self, labels: &[String]) -> Result<(), BodyError> {
        commands::set_tags(self, labels)
    }

    /// Remove one tag by identity; returns its index in the latest label
    /// sequence for the host's removal callback
    pub fn dismiss(&mut self, id: TagId) -> Option<usize> {
        commands::dismiss(self, id)
    }

    /// Clear every body's sleep state so the pile resettles
    pub fn wake_all(&mut self) {
        commands::wake_all(self)
    }

    /// Advance the fixed-step clock to `now_ms`, running as many physics
    /// steps as are due. Independent of the caller's repaint cadence.
    pub fn pump(&mut self, now_ms: f64) {
        step::pump(self, now_ms)
    }

    /// Refresh the transfer buffers from current body transforms.
    /// Returns the number of published tags.
    pub fn sample(&mut self) -> usize {
        snapshot::sample(self)
    }

    /// Immutable copy of every tracked tag's current visual transform
    pub fn snapshot(&self) -> PositionSnapshot {
        snapshot::extract(self)
    }

    pub fn snapshot_json(&self) -> String {
        snapshot::extract_json(self)
    }

    pub fn ids_ptr(&self) -> *const u64 {
        self.render.ids.as_ptr()
    }

    pub fn transforms_ptr(&self) -> *const f32 {
        self.render.transforms.as_ptr()
    }

    pub fn published_count(&self) -> usize {
        self.render.ids.len()
    }

    /// Full teardown and re-creation at a new viewport size. Tracked labels
    /// are kept and respawned as fresh falling bodies; nothing of the old
    /// world's stepping state survives. Ignored after `destroy`.
    pub fn rebuild(&mut self, width: f32, height: f32) -> Result<(), BodyError> {
        commands::rebuild(self, width, height)
    }

    /// Stop stepping and release all bodies. Idempotent: a second call (or
    /// a call before any tag was added) is a no-op.
    pub fn destroy(&mut self) {
        commands::destroy(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
