//! `generalization-error` library crate.
//!
//! The binary is a thin wrapper around this library so that:
//!
//! - the sampling, fitting and figure layout are testable without spawning processes
//! - rendering can be checked from the in-memory SVG before anything is written

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
