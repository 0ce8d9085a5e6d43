//! Tag lifecycle: reconciling an externally supplied label list against the
//! set of physics bodies currently tracked.
//!
//! Labels are the reconciliation key. Duplicate labels in the input collapse
//! to a single tracked tag, and reordering alone never respawns a body.

use crate::core::random::{range_f32, xorshift32};
use crate::domain::config::TagFieldConfig;
use crate::systems::physics::body::{BodyError, BodyId, BodySpec};
use crate::systems::physics::world::World;

/// Stable synthetic identity for a tracked tag.
///
/// High half: creation sequence number. Low half: PRNG salt. Unique for the
/// tag's lifetime even when the same label is removed and re-added, and
/// independent of the tag's position in the input list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TagId(pub u64);

impl TagId {
    fn derive(seq: u32, salt: u32) -> Self {
        Self(((seq as u64) << 32) | salt as u64)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// One label currently backed by a physics body
pub struct TrackedTag {
    pub id: TagId,
    /// Reconciliation key
    pub label: String,
    /// Owning reference into the World
    pub body_id: BodyId,
    /// Position in the input list at creation time. Informational only;
    /// dismiss indices are resolved against the latest list, never this.
    pub original_index: usize,
}

/// The set of tracked tags plus the last label sequence the host supplied
pub struct TagSet {
    tags: Vec<TrackedTag>,
    labels: Vec<String>,
    seq: u32,
}

impl TagSet {
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            labels: Vec::new(),
            seq: 0,
        }
    }

    pub fn tags(&self) -> &[TrackedTag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, id: TagId) -> Option<&TrackedTag> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn find_by_label(&self, label: &str) -> Option<&TrackedTag> {
        self.tags.iter().find(|t| t.label == label)
    }

    /// Labels supplied by the most recent `reconcile` call, in input order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Diff the new label sequence against the tracked set.
    ///
    /// Disappeared labels lose their bodies; new labels get a randomized
    /// drop spawn. Any removal wakes the whole world so settled neighbors
    /// resettle under gravity.
    pub fn reconcile(
        &mut self,
        labels: &[String],
        world: &mut World,
        config: &TagFieldConfig,
        container_width: f32,
        rng_state: &mut u32,
    ) -> Result<(), BodyError> {
        // === Removals ===
        let mut removed_any = false;
        let mut i = 0;
        while i < self.tags.len() {
            if labels.iter().any(|l| l == &self.tags[i].label) {
                i += 1;
            } else {
                let tag = self.tags.remove(i);
                world.remove_body(tag.body_id);
                removed_any = true;
            }
        }
        if removed_any {
            world.wake_all();
        }

        // === Additions (first occurrence wins, duplicates collapse) ===
        for (index, label) in labels.iter().enumerate() {
            if self.find_by_label(label).is_some() {
                continue;
            }
            let spec = self.spawn_spec(label, config, container_width, rng_state);
            let body_id = world.add_body(&spec)?;
            self.seq = self.seq.wrapping_add(1);
            let salt = xorshift32(rng_state);
            self.tags.push(TrackedTag {
                id: TagId::derive(self.seq, salt),
                label: label.clone(),
                body_id,
                original_index: index,
            });
        }

        self.labels = labels.to_vec();
        Ok(())
    }

    /// Remove a single tag by identity.
    ///
    /// Returns the label's position in the most recent input sequence (the
    /// host's `onRemove` index), resolved at call time so a list that shrank
    /// since spawn still maps correctly.
    pub fn dismiss(&mut self, id: TagId, world: &mut World) -> Option<usize> {
        let idx = self.tags.iter().position(|t| t.id == id)?;
        let tag = self.tags.remove(idx);
        world.remove_body(tag.body_id);
        world.wake_all();
        self.labels.iter().position(|l| l == &tag.label)
    }

    /// Drop every body while keeping the label list, so a rebuilt world can
    /// respawn the same tags falling fresh.
    pub fn release_bodies(&mut self, world: &mut World) {
        for tag in self.tags.drain(..) {
            world.remove_body(tag.body_id);
        }
    }

    /// Spawn parameters for a new tag body: width from label length, random
    /// x inside the container, a start above the visible area, and a small
    /// random tilt held by the rotation lock.
    fn spawn_spec(
        &self,
        label: &str,
        config: &TagFieldConfig,
        container_width: f32,
        rng_state: &mut u32,
    ) -> BodySpec {
        let sizing = &config.sizing;
        let material = &config.material;

        let width = (label.chars().count() as f32 * sizing.char_width + sizing.padding)
            .clamp(sizing.min_width, sizing.max_width);
        let half_width = width * 0.5;

        let x = if container_width > width {
            range_f32(rng_state, half_width, container_width - half_width)
        } else {
            container_width * 0.5
        };
        let y = -(sizing.tag_height * 0.5 + range_f32(rng_state, 0.0, sizing.spawn_band));
        let angle = range_f32(rng_state, -sizing.max_tilt, sizing.max_tilt);

        BodySpec {
            width,
            height: sizing.tag_height,
            corner_radius: sizing.corner_radius,
            x,
            y,
            angle,
            is_static: false,
            can_rotate: false,
            density: material.density,
            restitution: material.restitution,
            friction: material.friction,
            static_friction: material.static_friction,
            air_damping: material.air_damping,
            slop: 0.05,
            sleep_threshold: material.sleep_threshold,
        }
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self::new()
    }
}
