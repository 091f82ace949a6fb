//! Command-line interface for photomosaic generation

use crate::algorithm::control::ProgressSender;
use crate::algorithm::executor::{
    GenerationOutcome, GenerationRequest, MosaicEngine, MosaicResult,
};
use crate::io::configuration::{
    DEFAULT_CELL_SIZE_MM, DEFAULT_COLOR_CHANGE_PERCENT, DEFAULT_DUPLICATE_SPACING,
    DEFAULT_PRINT_HEIGHT_INCHES, DEFAULT_PRINT_WIDTH_INCHES, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{MosaicError, Result, invalid_settings};
use crate::io::progress::GenerationDisplay;
use crate::io::settings::{CellSize, MosaicSettings, ParquetRatio, PatternKind, PrintSize};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Layout pattern flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternArg {
    /// Uniform grid of square tiles
    Square,
    /// Mixed-orientation brick layout
    Parquet,
}

#[derive(Parser)]
#[command(name = "mosaictile")]
#[command(
    author,
    version,
    about = "Compose a photomosaic from a target image and a folder of cell photos"
)]
/// Command-line arguments for the mosaic generation tool
pub struct Cli {
    /// Target photograph to recreate
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of candidate cell photos
    #[arg(value_name = "CELLS")]
    pub cells: PathBuf,

    /// Print width in inches
    #[arg(long, default_value_t = DEFAULT_PRINT_WIDTH_INCHES)]
    pub print_width: f64,

    /// Print height in inches
    #[arg(long, default_value_t = DEFAULT_PRINT_HEIGHT_INCHES)]
    pub print_height: f64,

    /// Cell edge length in millimeters
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE_MM)]
    pub cell_size: f64,

    /// Blend percent toward the target color (0-100)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_COLOR_CHANGE_PERCENT,
        allow_negative_numbers = true
    )]
    pub percent: f64,

    /// Tile layout pattern
    #[arg(long, value_enum, default_value_t = PatternArg::Square)]
    pub pattern: PatternArg,

    /// Landscape:portrait tile ratio for the parquet pattern
    #[arg(long, default_value = "2:1", value_name = "L:P")]
    pub ratio: String,

    /// Place every usable photo before any repeat
    #[arg(short, long)]
    pub use_all: bool,

    /// Register mirrored photo variants as extra options
    #[arg(short, long)]
    pub mirror: bool,

    /// Minimum grid distance between reuses of one photo
    #[arg(short, long, default_value_t = DEFAULT_DUPLICATE_SPACING)]
    pub spacing: u32,

    /// Directory for the composed output file
    #[arg(long, default_value = ".")]
    pub cache_dir: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build engine settings from the parsed flags
    ///
    /// # Errors
    ///
    /// Returns an error if the parquet ratio flag cannot be parsed.
    pub fn settings(&self) -> Result<MosaicSettings> {
        let pattern = match self.pattern {
            PatternArg::Square => PatternKind::Square,
            PatternArg::Parquet => PatternKind::Parquet(parse_ratio(&self.ratio)?),
        };

        Ok(MosaicSettings {
            print_size: PrintSize::new(
                format!("{} x {} in", self.print_width, self.print_height),
                self.print_width,
                self.print_height,
            ),
            cell_size: CellSize::new(format!("{} mm", self.cell_size), self.cell_size),
            color_change_percent: self.percent.clamp(0.0, 100.0),
            pattern,
            use_all_images: self.use_all,
            mirror_images: self.mirror,
            duplicate_spacing: self.spacing,
        })
    }
}

/// Parse a "landscape:portrait" count pair
fn parse_ratio(ratio: &str) -> Result<ParquetRatio> {
    let invalid = || {
        invalid_settings(
            "ratio",
            &ratio,
            &"expected two positive counts as L:P, e.g. 2:1",
        )
    };
    let (landscape, portrait) = ratio.split_once(':').ok_or_else(invalid)?;
    let landscape = landscape
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&count| count > 0)
        .ok_or_else(invalid)?;
    let portrait = portrait
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&count| count > 0)
        .ok_or_else(invalid)?;
    Ok(ParquetRatio {
        landscape,
        portrait,
    })
}

/// Orchestrates one CLI generation run with progress display
pub struct MosaicProcessor {
    cli: Cli,
}

impl MosaicProcessor {
    /// Create a processor from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run generation according to the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if candidate collection, settings validation, or
    /// the generation run itself fails.
    pub fn process(&self) -> Result<()> {
        let candidates = collect_candidates(&self.cli.cells)?;
        let settings = self.cli.settings()?;

        let request = GenerationRequest {
            target: self.cli.target.clone(),
            candidates,
            settings,
            cache_dir: self.cli.cache_dir.clone(),
        };

        let engine = MosaicEngine::new();
        let (sender, receiver) = mpsc::channel();
        let progress = if self.cli.should_show_progress() {
            ProgressSender::new(sender)
        } else {
            ProgressSender::disabled()
        };

        let handle = engine.start(request, progress)?;

        if self.cli.should_show_progress() {
            let display = GenerationDisplay::new();
            // The loop ends when the worker drops its end of the channel
            while let Ok(event) = receiver.recv() {
                display.observe(&event);
            }
            display.finish();
        }

        match handle.join()? {
            GenerationOutcome::Completed(result) => self.report_result(&result),
            GenerationOutcome::Cancelled => self.report_cancelled(),
        }
        Ok(())
    }

    // Allow print for user feedback with the final run summary
    #[allow(clippy::print_stdout)]
    fn report_result(&self, result: &MosaicResult) {
        if self.cli.quiet {
            return;
        }
        println!(
            "Mosaic {}x{} cells ({}x{} px), {}/{} photos used in {} ms",
            result.grid_columns,
            result.grid_rows,
            result.output_width,
            result.output_height,
            result.used_cell_photos,
            result.total_cell_photos,
            result.generation_time_ms,
        );
        println!("Written to {}", result.output_path.display());
    }

    // Allow print for user feedback when a run ends early
    #[allow(clippy::print_stdout)]
    fn report_cancelled(&self) {
        if !self.cli.quiet {
            println!("Generation cancelled; no output written");
        }
    }
}

/// Collect candidate photo paths from a directory
///
/// The scan is non-recursive, keeps only supported raster extensions,
/// and sorts paths so candidate discovery order is deterministic.
///
/// # Errors
///
/// Returns [`MosaicError::FileSystem`] if the directory cannot be read.
pub fn collect_candidates(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory).map_err(|e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read cell photo directory",
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MosaicError::FileSystem {
            path: directory.to_path_buf(),
            operation: "read directory entry",
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && has_supported_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| extension.eq_ignore_ascii_case(supported))
        })
}
