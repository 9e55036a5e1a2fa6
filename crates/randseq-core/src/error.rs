//! Error types for sequence analysis.

use thiserror::Error;

/// Errors that can occur while finalizing statistics or ingesting input.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No bytes were accumulated; mean, chi-square and entropy are undefined.
    #[error("no bytes were accumulated")]
    EmptyInput,

    /// Fewer bytes than one Monte Carlo window were accumulated.
    #[error(
        "insufficient samples for Monte Carlo pi: got {bytes} byte(s), need at least {window}",
        window = crate::accumulator::MONTE_CARLO_WINDOW
    )]
    InsufficientSamples { bytes: u64 },

    /// I/O error while reading input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout randseq-core.
pub type Result<T> = std::result::Result<T, AnalysisError>;
