//! Rendering of tile assignments into the output canvas

/// Mosaic compositing and output encoding
pub mod compose;
