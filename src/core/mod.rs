pub mod random;
pub mod vec2;
