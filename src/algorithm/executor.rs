//! Generation orchestration and engine state machine
//!
//! One engine runs at most one generation at a time on a dedicated
//! background worker thread. Candidate indexing and target sampling run
//! concurrently; selection is strictly sequential; compositing is
//! data-parallel. The caller observes the run through the progress
//! stream and resolves it exactly once by joining the handle.

use crate::algorithm::control::{CancellationToken, ProgressSender, StageOutcome};
use crate::algorithm::selection::{SelectionParams, select_tiles};
use crate::analysis::library::PhotoLibrary;
use crate::analysis::target::sample_target;
use crate::io::error::{MosaicError, Result};
use crate::io::settings::MosaicSettings;
use crate::render::compose::compose;
use crate::spatial::grid::plan_grid;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Instant;

/// Inputs for one generation run
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Path to the target photograph
    pub target: PathBuf,
    /// Ordered candidate photo paths
    pub candidates: Vec<PathBuf>,
    /// User-facing settings
    pub settings: MosaicSettings,
    /// Directory for the composed output file
    pub cache_dir: PathBuf,
}

/// Immutable record of a completed generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicResult {
    /// Covered grid height in tile units
    pub grid_rows: usize,
    /// Covered grid width in tile units
    pub grid_columns: usize,
    /// Output canvas width in pixels
    pub output_width: u32,
    /// Output canvas height in pixels
    pub output_height: u32,
    /// Distinct photos placed at least once
    pub used_cell_photos: usize,
    /// Successfully indexed, usable candidates
    pub total_cell_photos: usize,
    /// Wall-clock duration of the run in milliseconds
    pub generation_time_ms: u64,
    /// Path of the composed output file, owned by the caller
    pub output_path: PathBuf,
}

/// Terminal resolution of a generation run
///
/// Cancellation is a first-class outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The run completed and wrote an output file
    Completed(MosaicResult),
    /// The run observed cancellation and left no output behind
    Cancelled,
}

/// Lifecycle phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePhase {
    /// Ready to accept a run
    #[default]
    Idle,
    /// A run is in flight
    Running,
    /// The last run completed
    Success,
    /// The last run failed
    Error,
    /// The last run was cancelled
    Cancelled,
}

/// Single-run generation engine
///
/// `Idle -> Running -> {Success, Error, Cancelled} -> Idle` (on explicit
/// [`reset`](Self::reset)). Starting while any other phase is current is
/// rejected with [`MosaicError::Busy`].
#[derive(Debug, Clone, Default)]
pub struct MosaicEngine {
    phase: Arc<Mutex<EnginePhase>>,
}

/// Handle to a running generation
#[derive(Debug)]
pub struct GenerationHandle {
    token: CancellationToken,
    worker: JoinHandle<Result<GenerationOutcome>>,
}

impl GenerationHandle {
    /// Request cooperative cancellation of the run
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A clone of the run's cancellation token
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Block until the run resolves
    ///
    /// # Errors
    ///
    /// Propagates the run's error, or [`MosaicError::FileSystem`] if the
    /// worker thread terminated abnormally.
    pub fn join(self) -> Result<GenerationOutcome> {
        self.worker.join().map_or_else(
            |_| {
                Err(MosaicError::FileSystem {
                    path: PathBuf::new(),
                    operation: "join generation worker",
                    source: std::io::Error::other("worker thread terminated abnormally"),
                })
            },
            |outcome| outcome,
        )
    }
}

impl MosaicEngine {
    /// Create an idle engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> EnginePhase {
        *self
            .phase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Return a terminal phase to [`EnginePhase::Idle`]
    ///
    /// Has no effect while idle or running; returns whether a reset
    /// happened.
    pub fn reset(&self) -> bool {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        match *phase {
            EnginePhase::Success | EnginePhase::Error | EnginePhase::Cancelled => {
                *phase = EnginePhase::Idle;
                true
            }
            EnginePhase::Idle | EnginePhase::Running => false,
        }
    }

    /// Launch a generation run on a dedicated worker thread
    ///
    /// Progress events flow through `progress` until the run resolves;
    /// the returned handle cancels and joins the run.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Busy`] unless the engine is idle.
    pub fn start(
        &self,
        request: GenerationRequest,
        progress: ProgressSender,
    ) -> Result<GenerationHandle> {
        {
            let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
            if *phase != EnginePhase::Idle {
                return Err(MosaicError::Busy);
            }
            *phase = EnginePhase::Running;
        }

        let token = CancellationToken::new();
        let worker_token = token.clone();
        let phase = Arc::clone(&self.phase);
        let worker = std::thread::spawn(move || {
            let outcome = run_generation(&request, &worker_token, &progress);
            let terminal = match &outcome {
                Ok(GenerationOutcome::Completed(_)) => EnginePhase::Success,
                Ok(GenerationOutcome::Cancelled) => EnginePhase::Cancelled,
                Err(_) => EnginePhase::Error,
            };
            *phase.lock().unwrap_or_else(PoisonError::into_inner) = terminal;
            outcome
        });

        Ok(GenerationHandle { token, worker })
    }
}

/// Execute one generation synchronously on the current thread
///
/// This is the worker body behind [`MosaicEngine::start`]; callers that
/// already own a thread (or a test) may invoke it directly.
///
/// # Errors
///
/// Surfaces the fatal conditions: invalid settings, an unreadable
/// target, an empty surviving candidate pool, and output write
/// failures. Per-candidate decode failures are recorded on the library
/// and only affect the result's photo accounting.
pub fn run_generation(
    request: &GenerationRequest,
    token: &CancellationToken,
    progress: &ProgressSender,
) -> Result<GenerationOutcome> {
    let started = Instant::now();

    let resolved = request.settings.resolve()?;
    let grid = plan_grid(&resolved)?;

    // Indexing and sampling are independent of each other; candidate
    // decoding additionally fans out on the rayon pool
    let (library_outcome, target_outcome) = rayon::join(
        || PhotoLibrary::index_photos(&request.candidates, resolved.mirror_images, token, progress),
        || sample_target(&request.target, &grid, token, progress),
    );

    let library = match library_outcome? {
        StageOutcome::Completed(library) => library,
        StageOutcome::Cancelled => return Ok(GenerationOutcome::Cancelled),
    };
    let targets = match target_outcome? {
        StageOutcome::Completed(targets) => targets,
        StageOutcome::Cancelled => return Ok(GenerationOutcome::Cancelled),
    };

    let params = SelectionParams {
        use_all_images: resolved.use_all_images,
        duplicate_spacing: resolved.duplicate_spacing,
    };
    let (assignments, state) =
        match select_tiles(&grid, &targets, &library, params, token, progress)? {
            StageOutcome::Completed(selected) => selected,
            StageOutcome::Cancelled => return Ok(GenerationOutcome::Cancelled),
        };

    let output_path = match compose(
        &grid,
        &targets,
        &assignments,
        &library,
        resolved.blend_weight,
        &request.cache_dir,
        token,
        progress,
    )? {
        StageOutcome::Completed(path) => path,
        StageOutcome::Cancelled => return Ok(GenerationOutcome::Cancelled),
    };

    Ok(GenerationOutcome::Completed(MosaicResult {
        grid_rows: grid.rows,
        grid_columns: grid.columns,
        output_width: grid.canvas_width,
        output_height: grid.canvas_height,
        used_cell_photos: state.used_photo_count(),
        total_cell_photos: library.photo_count(),
        generation_time_ms: started.elapsed().as_millis() as u64,
        output_path,
    }))
}
