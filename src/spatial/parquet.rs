//! Parquet pattern planning with mixed-orientation bands
//!
//! The parquet layout packs landscape tiles (two units wide, one tall) and
//! portrait tiles (one unit wide, two tall) into horizontal bands two tile
//! units tall. Each band repeats a group derived from the configured
//! landscape:portrait ratio `l:p`: `l` column-pairs of stacked landscape
//! tiles (2l landscape tiles) followed by `2p` portrait columns (2p
//! portrait tiles), so the tile-count ratio holds exactly over every
//! complete group. A short remainder at a band's end takes whichever tile
//! shape still fits the remaining width.

use crate::io::settings::{ParquetRatio, ResolvedSettings};
use crate::spatial::grid::{CellOrientation, GridCell, GridSpec, PixelRect, plan_square};

/// Plan the parquet layout over a unit grid of the given dimensions
///
/// An odd final unit row is covered by a single-height run of landscape
/// tiles when the column count is even; otherwise it is clipped so the
/// covered canvas stays gapless. A unit grid too small to fit any
/// two-unit tile degenerates to the square layout.
pub fn plan_parquet(
    unit_rows: usize,
    unit_columns: usize,
    ratio: ParquetRatio,
    resolved: &ResolvedSettings,
) -> GridSpec {
    let tile_w = resolved.tile_width;
    let tile_h = resolved.tile_height;

    let odd_row_coverable = unit_columns >= 2 && unit_columns % 2 == 0;
    let rows_used = if unit_rows % 2 == 0 || odd_row_coverable {
        unit_rows
    } else {
        unit_rows - 1
    };

    if rows_used == 0 {
        // Neither tile shape fits a single odd-width row
        return plan_square(unit_rows, unit_columns, resolved);
    }

    let mut cells = Vec::new();
    let mut band_row = 0;
    while band_row + 2 <= rows_used {
        fill_band(&mut cells, band_row, unit_columns, ratio, tile_w, tile_h);
        band_row += 2;
    }

    if band_row < rows_used {
        fill_landscape_row(&mut cells, band_row, unit_columns, tile_w, tile_h);
    }

    GridSpec {
        rows: rows_used,
        columns: unit_columns,
        canvas_width: unit_columns as u32 * tile_w,
        canvas_height: rows_used as u32 * tile_h,
        cells,
    }
}

/// Fill one two-unit-tall band with repeating ratio groups
fn fill_band(
    cells: &mut Vec<GridCell>,
    band_row: usize,
    unit_columns: usize,
    ratio: ParquetRatio,
    tile_w: u32,
    tile_h: u32,
) {
    let mut x = 0;
    while x < unit_columns {
        for _ in 0..ratio.landscape {
            if x + 2 > unit_columns {
                break;
            }
            cells.push(landscape_cell(band_row, x, tile_w, tile_h));
            cells.push(landscape_cell(band_row + 1, x, tile_w, tile_h));
            x += 2;
        }
        // Ratio counts are validated to at least 1, so this run always
        // advances while width remains
        for _ in 0..(2 * ratio.portrait) {
            if x >= unit_columns {
                break;
            }
            cells.push(portrait_cell(band_row, x, tile_w, tile_h));
            x += 1;
        }
    }
}

/// Fill an odd final row with single-height landscape tiles
fn fill_landscape_row(
    cells: &mut Vec<GridCell>,
    row: usize,
    unit_columns: usize,
    tile_w: u32,
    tile_h: u32,
) {
    let mut x = 0;
    while x + 2 <= unit_columns {
        cells.push(landscape_cell(row, x, tile_w, tile_h));
        x += 2;
    }
}

const fn landscape_cell(row: usize, column: usize, tile_w: u32, tile_h: u32) -> GridCell {
    GridCell {
        row,
        column,
        rect: PixelRect {
            x: column as u32 * tile_w,
            y: row as u32 * tile_h,
            width: 2 * tile_w,
            height: tile_h,
        },
        orientation: CellOrientation::Landscape,
    }
}

const fn portrait_cell(row: usize, column: usize, tile_w: u32, tile_h: u32) -> GridCell {
    GridCell {
        row,
        column,
        rect: PixelRect {
            x: column as u32 * tile_w,
            y: row as u32 * tile_h,
            width: tile_w,
            height: 2 * tile_h,
        },
        orientation: CellOrientation::Portrait,
    }
}
