//! Minimal 2D rigid-body engine: rectangles, gravity, three static walls,
//! impulse contacts, sleeping.

pub mod body;
pub mod collision;
pub mod solver;
pub mod world;

pub use body::{BodyError, BodyId, BodySpec, RigidBody};
pub use world::{SolverConfig, World};
