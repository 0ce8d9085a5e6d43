//! Tagdrop Engine - physics-driven falling tag picker in WASM
//!
//! Architecture:
//! - core/       - Math + deterministic randomness
//! - domain/     - Field configuration (serde)
//! - systems/    - Rigid-body physics and tag lifecycle
//! - simulation/ - Driver orchestration + wasm facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Re-export main types
pub use domain::config::{ColorVariant, TagFieldConfig};
pub use simulation::{FieldCore, PositionSnapshot, TagField, TagTransform};
pub use systems::physics::{BodyError, BodyId, BodySpec, RigidBody, SolverConfig, World};
pub use systems::tags::{TagId, TagSet, TrackedTag};

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Tagdrop WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
