mod aabb;
mod color;

pub use aabb::AABB;
pub use color::{srgb_to_linear, Color};
