//! Constrained best-match tile selection
//!
//! Cells are processed strictly sequentially in canonical scan order:
//! every decision depends on the cumulative usage and placement state of
//! all prior decisions. For each cell every library variant is scored and
//! the minimum-cost variant wins; strict less-than comparison over the
//! ordered variant list makes ties fall to the lowest discovery index,
//! unmirrored before mirrored, so selection is fully deterministic.

use crate::algorithm::control::{
    CancellationToken, GenerationStage, ProgressSender, StageOutcome, percent_of,
};
use crate::algorithm::state::{SelectionState, TileAssignment};
use crate::analysis::color::MeanColor;
use crate::analysis::library::PhotoLibrary;
use crate::analysis::target::TargetMap;
use crate::io::configuration::{PROGRESS_CELL_INTERVAL, SPACING_PENALTY, UNUSED_BONUS};
use crate::io::error::{MosaicError, Result};
use crate::spatial::grid::GridSpec;

/// Selection behavior switches taken from the resolved settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParams {
    /// Exhaust the candidate pool before any repeat
    pub use_all_images: bool,
    /// Minimum Chebyshev grid distance between reuses of one photo
    pub duplicate_spacing: u32,
}

/// Assign one variant to every grid cell
///
/// Returns one assignment per cell, in canonical scan order, together
/// with the final selection state for usage accounting.
///
/// # Errors
///
/// Returns [`MosaicError::EmptyCellPool`] if the library holds no
/// selectable variants.
pub fn select_tiles(
    grid: &GridSpec,
    targets: &TargetMap,
    library: &PhotoLibrary,
    params: SelectionParams,
    token: &CancellationToken,
    progress: &ProgressSender,
) -> Result<StageOutcome<(Vec<TileAssignment>, SelectionState)>> {
    if library.variants.is_empty() {
        return Err(MosaicError::EmptyCellPool { attempted: 0 });
    }

    let total = grid.cell_count();
    let mut state = SelectionState::new(library);
    let mut assignments = Vec::with_capacity(total);

    for (cell_index, (cell, mean)) in grid
        .cells
        .iter()
        .zip(targets.cell_means.iter())
        .enumerate()
    {
        if token.is_cancelled() {
            return Ok(StageOutcome::Cancelled);
        }

        if let Some(choice) = select_for_cell(cell.position(), mean, library, &state, params) {
            state.record(choice.variant, choice.photo, cell.position());
            assignments.push(TileAssignment {
                cell: cell_index,
                photo: choice.photo,
                mirrored: choice.mirrored,
            });
        }

        if (cell_index + 1) % PROGRESS_CELL_INTERVAL == 0 {
            progress.report(GenerationStage::Selecting, percent_of(cell_index + 1, total));
        }
    }
    progress.report(GenerationStage::Selecting, 100);

    Ok(StageOutcome::Completed((assignments, state)))
}

/// Winning variant for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedVariant {
    /// Index of the variant in the library's ordered list
    pub variant: usize,
    /// Index of the underlying photo
    pub photo: usize,
    /// Render mirrored
    pub mirrored: bool,
    /// Final score of the winning variant
    pub cost: f64,
}

/// Score every variant against one cell and return the minimum
///
/// The cost of a variant is the Euclidean color distance to the cell
/// mean, minus the unused bonus for never-placed variants while use-all
/// is active, plus the spacing penalty for variants whose photo was
/// already placed within the duplicate spacing. When every variant would
/// violate spacing the penalty is waived for all, so a selection is
/// always produced. Returns `None` only for an empty variant list.
pub fn select_for_cell(
    position: (usize, usize),
    cell_mean: &MeanColor,
    library: &PhotoLibrary,
    state: &SelectionState,
    params: SelectionParams,
) -> Option<SelectedVariant> {
    let spacing = params.duplicate_spacing;
    let enforce_spacing = spacing > 0
        && library
            .variants
            .iter()
            .any(|variant| !state.violates_spacing(variant.photo, position, spacing));

    let mut best: Option<SelectedVariant> = None;
    for (variant_index, variant) in library.variants.iter().enumerate() {
        let Some(photo) = library.photos.get(variant.photo) else {
            continue;
        };

        let mut cost = cell_mean.distance(&photo.average);
        if params.use_all_images && state.variant_usage(variant_index) == 0 {
            cost -= UNUSED_BONUS;
        }
        if enforce_spacing && state.violates_spacing(variant.photo, position, spacing) {
            cost += SPACING_PENALTY;
        }

        if best.is_none_or(|current| cost < current.cost) {
            best = Some(SelectedVariant {
                variant: variant_index,
                photo: variant.photo,
                mirrored: variant.mirrored,
                cost,
            });
        }
    }
    best
}
