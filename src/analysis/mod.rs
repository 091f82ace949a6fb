//! Color analysis of the target image and the candidate pool

/// Mean color statistics and blending
pub mod color;
/// Candidate photo decoding and indexing
pub mod library;
/// Target image sampling per grid cell
pub mod target;
