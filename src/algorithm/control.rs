//! Progress streaming and cooperative cancellation
//!
//! Generation emits a one-way stream of `{stage, percent}` events and
//! polls a shared stop signal between units of work. The engine makes no
//! assumption about how the caller consumes either; a dropped receiver
//! simply discards further events.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

/// Pipeline stage a progress event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    /// Decoding and color-profiling candidate photos
    Indexing,
    /// Sampling the target image per grid cell
    Sampling,
    /// Assigning candidates to grid cells
    Selecting,
    /// Rendering assignments onto the canvas
    Compositing,
    /// Encoding and writing the output file
    Writing,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Indexing => "indexing cell photos",
            Self::Sampling => "sampling target",
            Self::Selecting => "selecting tiles",
            Self::Compositing => "compositing",
            Self::Writing => "writing output",
        };
        write!(f, "{label}")
    }
}

/// One transient progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProgress {
    /// Stage the event belongs to
    pub stage: GenerationStage,
    /// Completion of the stage, 0-100
    pub percent: u8,
}

/// Outbound progress event channel
///
/// Send failures are ignored: progress is advisory and the consumer may
/// disconnect at any time without affecting the run.
#[derive(Debug, Clone, Default)]
pub struct ProgressSender(Option<Sender<GenerationProgress>>);

impl ProgressSender {
    /// Wrap a channel sender
    pub const fn new(sender: Sender<GenerationProgress>) -> Self {
        Self(Some(sender))
    }

    /// A sender that discards every event
    pub const fn disabled() -> Self {
        Self(None)
    }

    /// Emit one progress event
    pub fn report(&self, stage: GenerationStage, percent: u8) {
        if let Some(sender) = &self.0 {
            let _ = sender.send(GenerationProgress { stage, percent });
        }
    }
}

/// Percentage of completed work units, saturating at 100
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done * 100) / total).min(100) as u8
}

/// Shared cooperative stop signal
///
/// Cloning shares the underlying flag. The signal is polled between grid
/// cells, candidates, and tiles; in-flight pixel work for the current
/// item always completes before the next check.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a cancellable pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    /// The stage ran to completion
    Completed(T),
    /// Cancellation was observed before the stage finished
    Cancelled,
}
