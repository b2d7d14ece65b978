//! Output helpers.
//!
//! - figure serialization to PDF and PNG (`export`)
//! - run summary JSON (`export`)

pub mod export;

pub use export::*;
