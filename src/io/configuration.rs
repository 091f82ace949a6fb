//! Engine constants and runtime configuration defaults

// Print geometry
/// Fixed print resolution in dots per inch
pub const PRINT_DPI: f64 = 300.0;
/// Millimeters per inch, for cell size conversion
pub const MM_PER_INCH: f64 = 25.4;

// Candidate indexing
/// Maximum side length of decoded candidate thumbnails
pub const THUMBNAIL_MAX_SIDE: u32 = 256;

// Target sampling
/// Maximum side length of the sampling raster derived from the target
pub const SAMPLING_MAX_SIDE: u32 = 2048;
/// Sample lattice size per cell axis (at most 8x8 = 64 points per cell)
pub const SAMPLES_PER_CELL_AXIS: u32 = 8;

// Selection scoring
// Must exceed the maximum RGB distance (~441.7) so an unused candidate
// always outranks a reused one while use-all is active
/// Score bonus applied to variants that have never been placed
pub const UNUSED_BONUS: f64 = 1_000.0;
// Must exceed UNUSED_BONUS plus the maximum RGB distance so spacing
// violations lose to any conforming candidate
/// Score penalty applied to variants violating duplicate spacing
pub const SPACING_PENALTY: f64 = 1_000_000.0;

// Progress reporting
/// Cells processed between progress events during sampling and selection
pub const PROGRESS_CELL_INTERVAL: usize = 64;

// Output settings
/// File name prefix for composed mosaics in the cache directory
pub const OUTPUT_PREFIX: &str = "mosaic";
/// Candidate file extensions accepted by the CLI directory scan
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

// Default values for CLI parameters
/// Default print width in inches
pub const DEFAULT_PRINT_WIDTH_INCHES: f64 = 10.0;
/// Default print height in inches
pub const DEFAULT_PRINT_HEIGHT_INCHES: f64 = 15.0;
/// Default cell size in millimeters
pub const DEFAULT_CELL_SIZE_MM: f64 = 10.0;
/// Default color change percent
pub const DEFAULT_COLOR_CHANGE_PERCENT: f64 = 30.0;
/// Default minimum Chebyshev distance between reuses of one photo
pub const DEFAULT_DUPLICATE_SPACING: u32 = 2;
