//! Field configuration, parsed from JSON supplied by the host page.
//!
//! Every field has a default so a bare `new TagField(w, h)` works; the host
//! only overrides what it cares about.

use serde::{Deserialize, Serialize};

/// Visual color variant of the rendered tags. Carried for the host, never
/// read by the physics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorVariant {
    #[default]
    Default,
    Green,
    Blue,
    Purple,
}

/// Material parameters applied to every spawned tag body
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TagMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub static_friction: f32,
    pub density: f32,
    pub air_damping: f32,
    /// Low-motion seconds before a settled tag sleeps
    pub sleep_threshold: f32,
}

impl Default for TagMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.05,
            friction: 0.4,
            static_friction: 0.5,
            density: 2.0,
            air_damping: 0.1,
            sleep_threshold: 0.5,
        }
    }
}

/// Tag sizing and spawn placement constants (pixels / radians)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSizing {
    /// Estimated horizontal advance per character
    pub char_width: f32,
    /// Horizontal padding added on top of the text estimate
    pub padding: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub tag_height: f32,
    /// Rendering hint carried through to the snapshot
    pub corner_radius: f32,
    /// Vertical band above the container that spawns scatter into
    pub spawn_band: f32,
    /// Maximum random spawn tilt, held by the rotation lock
    pub max_tilt: f32,
}

impl Default for TagSizing {
    fn default() -> Self {
        Self {
            char_width: 9.0,
            padding: 28.0,
            min_width: 56.0,
            max_width: 240.0,
            tag_height: 40.0,
            corner_radius: 20.0,
            spawn_band: 120.0,
            max_tilt: 0.12,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TagFieldConfig {
    pub gravity_x: f32,
    pub gravity_y: f32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
    /// Fixed physics step duration in milliseconds
    pub step_ms: f64,
    pub material: TagMaterial,
    pub sizing: TagSizing,
    pub variant: ColorVariant,
    /// Shown by the host when no tags are tracked
    pub empty_message: String,
}

impl Default for TagFieldConfig {
    fn default() -> Self {
        Self {
            gravity_x: 0.0,
            gravity_y: 1200.0,
            velocity_iterations: 8,
            position_iterations: 4,
            step_ms: 1000.0 / 60.0,
            material: TagMaterial::default(),
            sizing: TagSizing::default(),
            variant: ColorVariant::default(),
            empty_message: String::new(),
        }
    }
}

impl TagFieldConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
