//! Core selection algorithm and generation orchestration

/// Progress streaming and cooperative cancellation plumbing
pub mod control;
/// Generation executor and engine state machine
pub mod executor;
/// Constrained best-match tile selection
pub mod selection;
/// Mutable selection run state
pub mod state;
