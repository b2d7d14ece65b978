//! Data sources: the ground-truth function and seeded sample generation.

pub mod sample;

pub use sample::*;
