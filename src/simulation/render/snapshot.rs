//! Per-frame snapshot of tracked body transforms.
//!
//! `sample` refreshes the flat transfer buffers the JS renderer reads by
//! pointer; `extract` builds the owned serde form used by tests and
//! `snapshot_json`. Both are recomputed in full on every call and never
//! persisted - this is the only bridge from simulation state to UI state.

use serde::Serialize;

use super::FieldCore;

#[derive(Clone, Debug, Serialize)]
pub struct TagTransform {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

/// Immutable per-frame copy of every tracked tag's visual transform
#[derive(Clone, Debug, Default, Serialize)]
pub struct PositionSnapshot {
    pub tags: Vec<TagTransform>,
}

/// Refresh the transfer buffers. Returns the number of published tags.
pub(super) fn sample(core: &mut FieldCore) -> usize {
    core.render.ids.clear();
    core.render.transforms.clear();

    if core.destroyed {
        return 0;
    }

    for tag in core.tags.tags() {
        // A tag whose body vanished mid-frame is simply not published; the
        // host falls back to a static position rather than crashing.
        if let Some(body) = core.world.body(tag.body_id) {
            core.render.ids.push(tag.id.as_u64());
            core.render.transforms.push(body.pos.x);
            core.render.transforms.push(body.pos.y);
            core.render.transforms.push(body.angle);
        }
    }

    core.render.ids.len()
}

pub(super) fn extract(core: &FieldCore) -> PositionSnapshot {
    let mut tags = Vec::with_capacity(core.tags.len());

    if !core.destroyed {
        for tag in core.tags.tags() {
            if let Some(body) = core.world.body(tag.body_id) {
                tags.push(TagTransform {
                    id: tag.id.as_u64(),
                    x: body.pos.x,
                    y: body.pos.y,
                    rotation: body.angle,
                });
            }
        }
    }

    PositionSnapshot { tags }
}

pub(super) fn extract_json(core: &FieldCore) -> String {
    serde_json::to_string(&extract(core)).unwrap_or_else(|_| String::from("{\"tags\":[]}"))
}
