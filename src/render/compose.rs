//! Mosaic compositing and output encoding
//!
//! Every assignment is rendered by scaling its photo thumbnail to fill
//! the cell rectangle with a centered crop, never anisotropic
//! stretching, then blending each channel toward the cell's sampled
//! mean. Cells do not overlap, so tile rendering is data-parallel; the
//! composed canvas is encoded once and written under the caller's cache
//! directory.

use crate::algorithm::control::{
    CancellationToken, GenerationStage, ProgressSender, StageOutcome, percent_of,
};
use crate::algorithm::state::TileAssignment;
use crate::analysis::library::PhotoLibrary;
use crate::analysis::target::TargetMap;
use crate::io::configuration::OUTPUT_PREFIX;
use crate::io::error::{MosaicError, Result};
use crate::spatial::grid::{GridSpec, PixelRect};
use image::imageops::FilterType;
use image::{RgbImage, imageops};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Render all assignments and write the composed mosaic
///
/// Returns the path of the written file; the caller owns the file after
/// a completed run.
///
/// # Errors
///
/// Returns [`MosaicError::FileSystem`] if the cache directory cannot be
/// created and [`MosaicError::ImageExport`] if encoding or writing
/// fails; a partially written file is removed before the error surfaces.
pub fn compose(
    grid: &GridSpec,
    targets: &TargetMap,
    assignments: &[TileAssignment],
    library: &PhotoLibrary,
    blend_weight: f64,
    cache_dir: &Path,
    token: &CancellationToken,
    progress: &ProgressSender,
) -> Result<StageOutcome<PathBuf>> {
    let total = assignments.len();
    let completed = AtomicUsize::new(0);

    // Cells are disjoint, so tiles render independently once the full
    // assignment set exists
    let tiles: Vec<Option<(usize, RgbImage)>> = assignments
        .par_iter()
        .map_with(progress.clone(), |sender, assignment| {
            if token.is_cancelled() {
                return None;
            }
            let tile = render_tile(grid, targets, library, assignment, blend_weight)?;
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            sender.report(GenerationStage::Compositing, percent_of(done, total));
            Some((assignment.cell, tile))
        })
        .collect();

    if token.is_cancelled() {
        return Ok(StageOutcome::Cancelled);
    }

    let mut canvas = RgbImage::new(grid.canvas_width, grid.canvas_height);
    for (cell_index, tile) in tiles.into_iter().flatten() {
        if let Some(cell) = grid.cells.get(cell_index) {
            imageops::replace(
                &mut canvas,
                &tile,
                i64::from(cell.rect.x),
                i64::from(cell.rect.y),
            );
        }
    }

    if token.is_cancelled() {
        return Ok(StageOutcome::Cancelled);
    }

    progress.report(GenerationStage::Writing, 0);
    let path = write_canvas(&canvas, cache_dir)?;
    progress.report(GenerationStage::Writing, 100);

    Ok(StageOutcome::Completed(path))
}

/// Render one assignment into a tile image sized to its cell rectangle
fn render_tile(
    grid: &GridSpec,
    targets: &TargetMap,
    library: &PhotoLibrary,
    assignment: &TileAssignment,
    blend_weight: f64,
) -> Option<RgbImage> {
    let cell = grid.cells.get(assignment.cell)?;
    let mean = targets.cell_means.get(assignment.cell)?;
    let photo = library.photos.get(assignment.photo)?;

    let source = if assignment.mirrored {
        imageops::flip_horizontal(&photo.thumbnail)
    } else {
        photo.thumbnail.clone()
    };

    let mut tile = fill_rect(&source, cell.rect);
    if blend_weight > 0.0 {
        for pixel in tile.pixels_mut() {
            pixel.0 = mean.blend_rgb(pixel.0, blend_weight);
        }
    }
    Some(tile)
}

/// Scale and center-crop a source image to exactly fill a rectangle
///
/// The scale factor is the larger of the two axis ratios, so the source
/// always covers the rectangle and the overshoot is cropped evenly from
/// both sides. Parquet aspect coercion goes through the same rule: a
/// photo forced into a foreign orientation is cropped, not stretched.
fn fill_rect(source: &RgbImage, rect: PixelRect) -> RgbImage {
    let (source_w, source_h) = source.dimensions();
    let scale = (f64::from(rect.width) / f64::from(source_w.max(1)))
        .max(f64::from(rect.height) / f64::from(source_h.max(1)));

    let scaled_w = ((f64::from(source_w) * scale).ceil() as u32).max(rect.width);
    let scaled_h = ((f64::from(source_h) * scale).ceil() as u32).max(rect.height);
    let resized = imageops::resize(source, scaled_w, scaled_h, FilterType::Triangle);

    let offset_x = (scaled_w - rect.width) / 2;
    let offset_y = (scaled_h - rect.height) / 2;
    imageops::crop_imm(&resized, offset_x, offset_y, rect.width, rect.height).to_image()
}

/// Encode the canvas and write it under the cache directory
fn write_canvas(canvas: &RgbImage, cache_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(cache_dir).map_err(|e| MosaicError::FileSystem {
        path: cache_dir.to_path_buf(),
        operation: "create cache directory",
        source: e,
    })?;

    let path = cache_dir.join(output_file_name());
    if let Err(e) = canvas.save(&path) {
        // Never leave a partial file behind
        std::fs::remove_file(&path).ok();
        return Err(MosaicError::ImageExport { path, source: e });
    }
    Ok(path)
}

static RUN_SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// Unique output file name for this run
fn output_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    let sequence = RUN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{OUTPUT_PREFIX}-{millis}-{}-{sequence}.png",
        std::process::id()
    )
}
