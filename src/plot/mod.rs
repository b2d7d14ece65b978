//! Figure description and rendering.

pub mod figure;
pub mod render;

pub use figure::*;
pub use render::*;
