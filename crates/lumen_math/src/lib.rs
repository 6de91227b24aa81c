// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod random;
mod ray;
mod vector;

pub use interval::Interval;
pub use random::{interval_random, round_down_to_place, round_up};
pub use ray::Ray;
pub use vector::{Color, Direction, Position, VectorExt};
