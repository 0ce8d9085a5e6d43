pub mod physics;
pub mod tags;
