//! View layer
//!
//! Everything between the element tree and the terminal: layout, viewport
//! clipping, the per-pass row buffer and the color palette.

pub mod clipper;
pub mod line_buffer;
pub mod surface;
pub mod theme;
pub mod tree_renderer;
pub mod viewport;
