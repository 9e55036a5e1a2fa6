//! # randseq-core
//!
//! **How random does this byte stream look?**
//!
//! `randseq-core` computes a fixed battery of classical randomness metrics over
//! an arbitrary byte stream: Shannon entropy, chi-square goodness of fit against
//! a uniform byte distribution, arithmetic mean, a Monte Carlo estimate of pi
//! and the lag-1 serial correlation coefficient.
//!
//! ## Quick Start
//!
//! ```
//! use randseq_core::SequenceTester;
//!
//! let mut tester = SequenceTester::new();
//! let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
//! tester.add(&data[..1000]);
//! tester.add(&data[1000..]);
//!
//! let report = tester.finish().unwrap();
//! assert_eq!(report.entropy, 8.0);
//! println!("{report}");
//! ```
//!
//! ## Architecture
//!
//! Bytes → [`StreamAccumulator`] (O(1) state) → [`FinalizedStatistics`] →
//! [`tail_probability`] → [`SequenceReport`]
//!
//! The accumulator can be fed in any chunking; results depend only on the
//! concatenated stream. Finalizing does not consume it.

pub mod accumulator;
pub mod chisq;
pub mod error;
pub mod ingest;
pub mod report;
pub mod tester;

pub use accumulator::{
    BINS, DEGREES_OF_FREEDOM, FinalizedStatistics, MONTE_CARLO_WINDOW,
    SERIAL_CORRELATION_UNDEFINED, StreamAccumulator, is_serial_correlation_undefined,
};
pub use chisq::tail_probability;
pub use error::{AnalysisError, Result};
pub use ingest::{DEFAULT_CHUNK_SIZE, IngestConfig, add_file, add_reader};
pub use report::{
    MEAN_RANDOM, SequenceReport, chi_square_narrative, monte_carlo_error_percent,
    optimal_compression_percent,
};
pub use tester::SequenceTester;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
