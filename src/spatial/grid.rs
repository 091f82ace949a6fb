//! Output grid planning and cell geometry
//!
//! The grid planner turns resolved pixel settings into an ordered sequence
//! of cells covering the output canvas. Cells are emitted in row-major
//! scan order of their pixel rectangles; that order is the canonical
//! processing order for sampling, selection, and compositing.

use crate::io::error::{Result, invalid_settings};
use crate::io::settings::{PatternKind, ResolvedSettings};
use crate::spatial::parquet;

/// Axis-aligned pixel rectangle within the output canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Orientation tag of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOrientation {
    /// One tile unit by one tile unit
    Square,
    /// Two tile units wide by one tall
    Landscape,
    /// One tile unit wide by two tall
    Portrait,
}

/// One rectangular region of the output grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Grid row of the cell's top-left tile unit
    pub row: usize,
    /// Grid column of the cell's top-left tile unit
    pub column: usize,
    /// Pixel rectangle covered by the cell
    pub rect: PixelRect,
    /// Orientation tag
    pub orientation: CellOrientation,
}

impl GridCell {
    /// Grid position of the cell's top-left tile unit as (row, column)
    pub const fn position(&self) -> (usize, usize) {
        (self.row, self.column)
    }
}

/// Planned tile layout covering the output canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSpec {
    /// Covered grid height in tile units
    pub rows: usize,
    /// Covered grid width in tile units
    pub columns: usize,
    /// Covered canvas width in pixels (remainder strip clipped)
    pub canvas_width: u32,
    /// Covered canvas height in pixels (remainder strip clipped)
    pub canvas_height: u32,
    /// Cells in row-major scan order
    pub cells: Vec<GridCell>,
}

impl GridSpec {
    /// Number of cells in the layout
    pub const fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Chebyshev distance between two grid positions
///
/// The maximum of the row and column deltas; the duplicate spacing
/// constraint is measured in this metric.
pub const fn chebyshev(a: (usize, usize), b: (usize, usize)) -> u32 {
    let row_delta = a.0.abs_diff(b.0);
    let column_delta = a.1.abs_diff(b.1);
    if row_delta > column_delta {
        row_delta as u32
    } else {
        column_delta as u32
    }
}

/// Compute the tile layout for the resolved settings
///
/// # Errors
///
/// Returns [`MosaicError::InvalidSettings`](crate::MosaicError::InvalidSettings)
/// if the tile size leaves no complete row or column on the canvas.
pub fn plan_grid(resolved: &ResolvedSettings) -> Result<GridSpec> {
    let rows = (resolved.output_height / resolved.tile_height) as usize;
    let columns = (resolved.output_width / resolved.tile_width) as usize;

    if rows == 0 || columns == 0 {
        return Err(invalid_settings(
            "cell_size",
            &format!("{}x{} px", resolved.tile_width, resolved.tile_height),
            &"tile size exceeds the output canvas",
        ));
    }

    let mut spec = match resolved.pattern {
        PatternKind::Square => plan_square(rows, columns, resolved),
        PatternKind::Parquet(ratio) => parquet::plan_parquet(rows, columns, ratio, resolved),
    };

    // Canonical row-major order over pixel rectangles, regardless of the
    // order the pattern planner emitted cells in
    spec.cells
        .sort_by_key(|cell| (cell.rect.y, cell.rect.x));
    Ok(spec)
}

/// Plan a uniform grid of square cells
///
/// The remainder strip beyond the last complete row and column is
/// clipped, top-left aligned.
pub fn plan_square(rows: usize, columns: usize, resolved: &ResolvedSettings) -> GridSpec {
    let tile_w = resolved.tile_width;
    let tile_h = resolved.tile_height;
    let mut cells = Vec::with_capacity(rows * columns);

    for row in 0..rows {
        for column in 0..columns {
            cells.push(GridCell {
                row,
                column,
                rect: PixelRect {
                    x: column as u32 * tile_w,
                    y: row as u32 * tile_h,
                    width: tile_w,
                    height: tile_h,
                },
                orientation: CellOrientation::Square,
            });
        }
    }

    GridSpec {
        rows,
        columns,
        canvas_width: columns as u32 * tile_w,
        canvas_height: rows as u32 * tile_h,
        cells,
    }
}
