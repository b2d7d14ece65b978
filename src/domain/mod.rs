//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observation sets (`SampleSet`)
//! - run configuration (`RunConfig`)
//! - run outputs (`ErrorReport`, `RunSummary`)

pub mod types;

pub use types::*;
