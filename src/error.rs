// =============================================================================
// Screen Errors
// =============================================================================
//
// Failure kinds for the screening pipeline, split by how they propagate:
//
//   - `InvalidConfiguration` is fatal. It is raised while validating screen
//     settings, before any price data is touched, and aborts the whole run.
//   - Every other kind is per-instrument. The basket sweep records it against
//     the instrument, logs it, and carries on with the rest of the basket.

use thiserror::Error;

/// Everything that can go wrong while loading data or running a screen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    /// The instrument's history is shorter than the screen's warm-up needs.
    #[error("insufficient history: {needed} sessions required, {available} available")]
    DataInsufficient { needed: usize, available: usize },

    /// A screen setting is outside its supported range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A well-formed computation hit a degenerate case at the session the
    /// screen needed, e.g. a zero-range Stochastic RSI window.
    #[error("degenerate computation: {0}")]
    DegenerateComputation(String),

    /// Stored data violates a series invariant: duplicate dates, a
    /// non-finite or non-positive close, or an unparseable row.
    #[error("malformed series: {0}")]
    MalformedSeries(String),

    /// The instrument's archive file is missing or unreadable.
    #[error("storage: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
