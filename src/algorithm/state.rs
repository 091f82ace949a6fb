//! Mutable selection run state
//!
//! Usage counts and placement history accumulate over one selection pass
//! and drive the duplicate-avoidance constraints. The state is owned
//! exclusively by a single selection invocation and passed by exclusive
//! access through the scan loop, so runs stay independent and reentrant.

use crate::analysis::library::PhotoLibrary;
use crate::spatial::grid::chebyshev;

/// Final tile choice for one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAssignment {
    /// Index of the cell in canonical scan order
    pub cell: usize,
    /// Index of the chosen photo in the library
    pub photo: usize,
    /// Render the photo mirrored horizontally
    pub mirrored: bool,
}

/// Usage and placement bookkeeping for one selection run
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Times each variant has been placed
    variant_usage: Vec<u32>,
    /// Grid positions where each photo (either variant) has been placed
    photo_placements: Vec<Vec<(usize, usize)>>,
}

impl SelectionState {
    /// Create empty state sized to the library's pool
    pub fn new(library: &PhotoLibrary) -> Self {
        Self {
            variant_usage: vec![0; library.variants.len()],
            photo_placements: vec![Vec::new(); library.photos.len()],
        }
    }

    /// Times the given variant has been placed
    pub fn variant_usage(&self, variant: usize) -> u32 {
        self.variant_usage.get(variant).copied().unwrap_or(0)
    }

    /// Whether the photo has a prior placement closer than the spacing
    ///
    /// Distance is Chebyshev over grid positions; a spacing of zero
    /// never violates.
    pub fn violates_spacing(
        &self,
        photo: usize,
        position: (usize, usize),
        spacing: u32,
    ) -> bool {
        if spacing == 0 {
            return false;
        }
        self.photo_placements
            .get(photo)
            .is_some_and(|placements| {
                placements
                    .iter()
                    .any(|&placed| chebyshev(placed, position) < spacing)
            })
    }

    /// Record a placement of the given variant at the given position
    pub fn record(&mut self, variant: usize, photo: usize, position: (usize, usize)) {
        if let Some(usage) = self.variant_usage.get_mut(variant) {
            *usage += 1;
        }
        if let Some(placements) = self.photo_placements.get_mut(photo) {
            placements.push(position);
        }
    }

    /// Number of distinct photos with at least one placement
    pub fn used_photo_count(&self) -> usize {
        self.photo_placements
            .iter()
            .filter(|placements| !placements.is_empty())
            .count()
    }
}
