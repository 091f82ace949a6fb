//! User-facing settings and their resolution into pixel-space parameters
//!
//! Print sizes arrive in inches and cell sizes in millimeters; everything
//! downstream of the resolver works in whole pixels at the fixed print
//! resolution.

use crate::io::configuration::{MM_PER_INCH, PRINT_DPI};
use crate::io::error::{Result, invalid_settings};

/// Print size selected by the user
#[derive(Debug, Clone, PartialEq)]
pub struct PrintSize {
    /// Display label, e.g. "10 x 15 in"
    pub label: String,
    /// Print width in inches
    pub width_inches: f64,
    /// Print height in inches
    pub height_inches: f64,
}

impl PrintSize {
    /// Create a print size from inch dimensions
    pub fn new(label: impl Into<String>, width_inches: f64, height_inches: f64) -> Self {
        Self {
            label: label.into(),
            width_inches,
            height_inches,
        }
    }
}

/// Cell size selected by the user
#[derive(Debug, Clone, PartialEq)]
pub struct CellSize {
    /// Display label, e.g. "10 mm"
    pub label: String,
    /// Cell edge length in millimeters
    pub millimeters: f64,
}

impl CellSize {
    /// Create a cell size from a millimeter edge length
    pub fn new(label: impl Into<String>, millimeters: f64) -> Self {
        Self {
            label: label.into(),
            millimeters,
        }
    }
}

/// Landscape-to-portrait tile count ratio for the parquet pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParquetRatio {
    /// Landscape tiles per repeating group
    pub landscape: u32,
    /// Portrait tiles per repeating group
    pub portrait: u32,
}

/// Mosaic layout pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Uniform grid of square tiles
    Square,
    /// Mixed-orientation brick layout with the given tile ratio
    Parquet(ParquetRatio),
}

/// Complete user-facing settings for one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicSettings {
    /// Output print size
    pub print_size: PrintSize,
    /// Tile cell size
    pub cell_size: CellSize,
    /// Blend weight toward the target cell color, 0-100
    pub color_change_percent: f64,
    /// Layout pattern
    pub pattern: PatternKind,
    /// Exhaust the candidate pool before any repeat
    pub use_all_images: bool,
    /// Register mirrored variants as distinct selectable options
    pub mirror_images: bool,
    /// Minimum Chebyshev grid distance between reuses of one photo
    pub duplicate_spacing: u32,
}

/// Pixel-space parameters derived from [`MosaicSettings`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSettings {
    /// Output canvas width in pixels before grid clipping
    pub output_width: u32,
    /// Output canvas height in pixels before grid clipping
    pub output_height: u32,
    /// Tile unit width in pixels
    pub tile_width: u32,
    /// Tile unit height in pixels
    pub tile_height: u32,
    /// Per-channel blend weight toward the cell mean, 0.0-1.0
    pub blend_weight: f64,
    /// Layout pattern
    pub pattern: PatternKind,
    /// Exhaust the candidate pool before any repeat
    pub use_all_images: bool,
    /// Register mirrored variants as distinct selectable options
    pub mirror_images: bool,
    /// Minimum Chebyshev grid distance between reuses of one photo
    pub duplicate_spacing: u32,
}

impl MosaicSettings {
    /// Normalize user-facing units into pixel-space parameters
    ///
    /// Output dimensions are `inches * 300` and tile dimensions
    /// `millimeters * 300 / 25.4`, both rounded to the nearest whole
    /// pixel; tile dimensions are floored at one pixel.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidSettings`](crate::MosaicError::InvalidSettings) if:
    /// - either print dimension resolves to zero or fewer pixels
    /// - the cell size is not a positive finite millimeter value
    /// - the color change percent is outside `[0, 100]` or not finite
    /// - a parquet ratio count is zero
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let output_width = resolve_print_dimension("print_width", self.print_size.width_inches)?;
        let output_height = resolve_print_dimension("print_height", self.print_size.height_inches)?;

        let millimeters = self.cell_size.millimeters;
        if !millimeters.is_finite() || millimeters <= 0.0 {
            return Err(invalid_settings(
                "cell_size",
                &millimeters,
                &"cell size must be a positive number of millimeters",
            ));
        }
        let tile_pixels = (millimeters * PRINT_DPI / MM_PER_INCH).round().max(1.0) as u32;

        let percent = self.color_change_percent;
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(invalid_settings(
                "color_change_percent",
                &percent,
                &"percent must be between 0 and 100",
            ));
        }

        if let PatternKind::Parquet(ratio) = self.pattern {
            if ratio.landscape == 0 || ratio.portrait == 0 {
                return Err(invalid_settings(
                    "parquet_ratio",
                    &format!("{}:{}", ratio.landscape, ratio.portrait),
                    &"both ratio counts must be at least 1",
                ));
            }
        }

        Ok(ResolvedSettings {
            output_width,
            output_height,
            tile_width: tile_pixels,
            tile_height: tile_pixels,
            blend_weight: percent / 100.0,
            pattern: self.pattern,
            use_all_images: self.use_all_images,
            mirror_images: self.mirror_images,
            duplicate_spacing: self.duplicate_spacing,
        })
    }
}

fn resolve_print_dimension(parameter: &'static str, inches: f64) -> Result<u32> {
    if !inches.is_finite() {
        return Err(invalid_settings(
            parameter,
            &inches,
            &"print dimension must be a finite number of inches",
        ));
    }
    let pixels = (inches * PRINT_DPI).round();
    if pixels < 1.0 {
        return Err(invalid_settings(
            parameter,
            &inches,
            &"print dimension must resolve to at least one pixel",
        ));
    }
    Ok(pixels as u32)
}
