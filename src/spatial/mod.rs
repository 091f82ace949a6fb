//! Spatial planning of the output tile grid
//!
//! This module contains layout-related functionality including:
//! - Grid planning for the uniform square pattern
//! - Band-packed planning for the mixed-orientation parquet pattern
//! - Cell geometry and grid distance metrics

/// Grid planning and cell geometry
pub mod grid;
/// Parquet pattern planning with mixed-orientation bands
pub mod parquet;

pub use grid::GridSpec;
