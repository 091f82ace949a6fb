//! Target image sampling
//!
//! Reduces the target photograph to one mean color per grid cell. The
//! decoded target is rescaled to the canvas resolution, bounded to a
//! maximum raster side so very large prints stay cheap, and each cell
//! averages a small uniform lattice of sample points instead of scanning
//! every pixel.

use crate::algorithm::control::{
    CancellationToken, GenerationStage, ProgressSender, StageOutcome, percent_of,
};
use crate::analysis::color::{ColorAccumulator, MeanColor};
use crate::io::configuration::{PROGRESS_CELL_INTERVAL, SAMPLES_PER_CELL_AXIS, SAMPLING_MAX_SIDE};
use crate::io::error::{MosaicError, Result};
use crate::spatial::grid::{GridCell, GridSpec};
use image::imageops::FilterType;
use ndarray::Array3;
use std::path::Path;

/// Mean target color per grid cell, index-parallel to the grid's cells
#[derive(Debug, Clone, PartialEq)]
pub struct TargetMap {
    /// One mean color per cell, in canonical scan order
    pub cell_means: Vec<MeanColor>,
}

/// Sample the target image into one mean color per grid cell
///
/// # Errors
///
/// Returns [`MosaicError::TargetImageUnreadable`] if the target cannot be
/// decoded.
pub fn sample_target(
    path: &Path,
    grid: &GridSpec,
    token: &CancellationToken,
    progress: &ProgressSender,
) -> Result<StageOutcome<TargetMap>> {
    let decoded = image::open(path).map_err(|e| MosaicError::TargetImageUnreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (raster_w, raster_h) = raster_dimensions(grid.canvas_width, grid.canvas_height);
    let working = decoded
        .resize_exact(raster_w, raster_h, FilterType::Triangle)
        .to_rgb8();

    // Height x width x channel raster for index-based sampling
    let raster = Array3::from_shape_fn(
        (raster_h as usize, raster_w as usize, 3),
        |(y, x, channel)| {
            working
                .get_pixel(x as u32, y as u32)
                .0
                .get(channel)
                .copied()
                .unwrap_or(0)
        },
    );

    let scale_x = f64::from(raster_w) / f64::from(grid.canvas_width);
    let scale_y = f64::from(raster_h) / f64::from(grid.canvas_height);

    let total = grid.cell_count();
    let mut cell_means = Vec::with_capacity(total);
    for (index, cell) in grid.cells.iter().enumerate() {
        if token.is_cancelled() {
            return Ok(StageOutcome::Cancelled);
        }
        cell_means.push(sample_cell(&raster, cell, scale_x, scale_y));
        if (index + 1) % PROGRESS_CELL_INTERVAL == 0 {
            progress.report(GenerationStage::Sampling, percent_of(index + 1, total));
        }
    }
    progress.report(GenerationStage::Sampling, 100);

    Ok(StageOutcome::Completed(TargetMap { cell_means }))
}

/// Bound the sampling raster to the configured maximum side
///
/// The raster keeps the canvas aspect so cell rectangles map linearly.
fn raster_dimensions(canvas_width: u32, canvas_height: u32) -> (u32, u32) {
    let longest = canvas_width.max(canvas_height);
    if longest <= SAMPLING_MAX_SIDE {
        return (canvas_width, canvas_height);
    }
    let scale = f64::from(SAMPLING_MAX_SIDE) / f64::from(longest);
    let width = (f64::from(canvas_width) * scale).round().max(1.0) as u32;
    let height = (f64::from(canvas_height) * scale).round().max(1.0) as u32;
    (width, height)
}

/// Mean color over a uniform sample lattice inside one cell
fn sample_cell(raster: &Array3<u8>, cell: &GridCell, scale_x: f64, scale_y: f64) -> MeanColor {
    let (raster_h, raster_w, _) = raster.dim();

    let lattice_x = SAMPLES_PER_CELL_AXIS.min(cell.rect.width).max(1);
    let lattice_y = SAMPLES_PER_CELL_AXIS.min(cell.rect.height).max(1);

    let mut accumulator = ColorAccumulator::new();
    for iy in 0..lattice_y {
        // Sample at lattice midpoints so edges never bias the mean
        let fy = (f64::from(iy) + 0.5) / f64::from(lattice_y);
        let source_y = f64::from(cell.rect.y) + fy * f64::from(cell.rect.height);
        let y = ((source_y * scale_y) as usize).min(raster_h.saturating_sub(1));
        for ix in 0..lattice_x {
            let fx = (f64::from(ix) + 0.5) / f64::from(lattice_x);
            let source_x = f64::from(cell.rect.x) + fx * f64::from(cell.rect.width);
            let x = ((source_x * scale_x) as usize).min(raster_w.saturating_sub(1));

            let r = raster.get((y, x, 0)).copied().unwrap_or(0);
            let g = raster.get((y, x, 1)).copied().unwrap_or(0);
            let b = raster.get((y, x, 2)).copied().unwrap_or(0);
            accumulator.add(r, g, b);
        }
    }
    accumulator.mean()
}
