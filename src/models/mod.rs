//! Regression model implementations.

pub mod model;

pub use model::*;
