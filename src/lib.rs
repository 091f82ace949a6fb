//! Photomosaic composition engine with constrained best-match tile assignment
//!
//! The system turns one target photograph and a pool of candidate cell
//! photographs into a photomosaic: a planned grid of tiles, each replaced by
//! the candidate whose mean color best matches the corresponding region of
//! the target, rendered at print resolution with partial color blending.
//! Selection avoids visible repetition through usage bonuses and a Chebyshev
//! duplicate-spacing constraint, and every run is deterministic: identical
//! inputs produce an identical assignment and a byte-identical output image.
//! Generation runs on a dedicated background worker with an outbound
//! progress stream and cooperative cancellation.

#![forbid(unsafe_code)]

/// Tile selection, generation orchestration, and run control plumbing
pub mod algorithm;
/// Color statistics, target sampling, and candidate photo indexing
pub mod analysis;
/// Input/output operations, settings, and error handling
pub mod io;
/// Compositing and output encoding
pub mod render;
/// Grid planning and cell geometry
pub mod spatial;

pub use algorithm::executor::{GenerationOutcome, MosaicEngine, MosaicResult};
pub use io::error::{MosaicError, Result};
