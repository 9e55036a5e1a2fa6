//! Streaming byte statistics.
//!
//! [`StreamAccumulator`] ingests bytes in any number of chunks and keeps O(1)
//! state: a 256-bin histogram, a six-byte Monte Carlo window and the running
//! sums for the serial correlation coefficient. Chunk boundaries never affect
//! the result; `add(a); add(b)` is identical to `add(a ++ b)`.
//!
//! Finalizing is a pure projection of that state. [`StreamAccumulator::finish`]
//! can be called repeatedly, and more bytes may be added in between.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Number of distinct byte values.
pub const BINS: usize = 256;

/// Degrees of freedom of the byte-histogram chi-square statistic.
pub const DEGREES_OF_FREEDOM: u32 = BINS as u32 - 1;

/// Bytes consumed per Monte Carlo point: three for x, three for y.
pub const MONTE_CARLO_WINDOW: usize = 6;

/// Serial correlation value reported when every byte is identical.
pub const SERIAL_CORRELATION_UNDEFINED: f64 = -100_000.0;

/// Whether a serial correlation value is the [`SERIAL_CORRELATION_UNDEFINED`]
/// sentinel. Real coefficients never drop below -1.
pub fn is_serial_correlation_undefined(value: f64) -> bool {
    value < SERIAL_CORRELATION_UNDEFINED + 1.0
}

/// Squared radius of the reference circle, (256^3 - 1)^2.
const IN_CIRCLE: u64 = {
    let r = (1u64 << (8 * MONTE_CARLO_WINDOW / 2)) - 1;
    r * r
};

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Per-value byte counts plus the running total.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ByteHistogram {
    counts: [u64; BINS],
    total: u64,
}

impl Default for ByteHistogram {
    fn default() -> Self {
        Self {
            counts: [0; BINS],
            total: 0,
        }
    }
}

impl ByteHistogram {
    #[inline]
    fn push(&mut self, c: u8) {
        self.counts[c as usize] += 1;
        self.total += 1;
    }

    fn mean(&self) -> f64 {
        let sum: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &n)| i as f64 * n as f64)
            .sum();
        sum / self.total as f64
    }

    fn chi_square(&self) -> f64 {
        let expected = self.total as f64 / BINS as f64;
        self.counts
            .iter()
            .map(|&n| {
                let diff = n as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// Shannon entropy in bits per byte, rounded to 6 decimal places.
    fn entropy(&self) -> f64 {
        let total = self.total as f64;
        let mut h = 0.0;
        for &n in &self.counts {
            if n > 0 {
                let p = n as f64 / total;
                h += p * (1.0 / p).log2();
            }
        }
        (h * 1e6).round_ties_even() / 1e6
    }
}

/// Partial six-byte window and the hit/miss tally of completed windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MonteCarloWindow {
    window: [u8; MONTE_CARLO_WINDOW],
    cursor: usize,
    completed: u64,
    in_circle: u64,
}

impl MonteCarloWindow {
    #[inline]
    fn push(&mut self, c: u8) {
        self.window[self.cursor] = c;
        self.cursor += 1;
        if self.cursor < MONTE_CARLO_WINDOW {
            return;
        }
        self.cursor = 0;
        self.completed += 1;

        let half = MONTE_CARLO_WINDOW / 2;
        let (mut x, mut y) = (0u64, 0u64);
        for j in 0..half {
            x = (x << 8) | u64::from(self.window[j]);
            y = (y << 8) | u64::from(self.window[half + j]);
        }
        if x * x + y * y <= IN_CIRCLE {
            self.in_circle += 1;
        }
    }

    fn estimate(&self) -> Option<f64> {
        if self.completed == 0 {
            return None;
        }
        Some(4.0 * (self.in_circle as f64 / self.completed as f64))
    }
}

/// Running sums for the lag-1 serial correlation coefficient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SerialCorrelation {
    /// Sum of `previous * current` over consecutive pairs.
    pair_sum: u64,
    value_sum: u64,
    square_sum: u64,
    first: u8,
    last: u8,
    seen_first: bool,
}

impl SerialCorrelation {
    #[inline]
    fn push(&mut self, c: u8) {
        let u = u64::from(c);
        if self.seen_first {
            self.pair_sum += u64::from(self.last) * u;
        } else {
            self.seen_first = true;
            self.first = c;
        }
        self.value_sum += u;
        self.square_sum += u * u;
        self.last = c;
    }

    /// The sequence is closed into a cycle: the last byte pairs with the first.
    fn coefficient(&self, total: u64) -> f64 {
        let n = total as f64;
        let t1 = self.pair_sum as f64 + f64::from(self.last) * f64::from(self.first);
        let t2 = self.value_sum as f64;
        let t3 = self.square_sum as f64;
        let t2_squared = t2 * t2;
        let denominator = n * t3 - t2_squared;
        if denominator == 0.0 {
            SERIAL_CORRELATION_UNDEFINED
        } else {
            (n * t1 - t2_squared) / denominator
        }
    }
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Raw statistics of an accumulated byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalizedStatistics {
    /// Number of bytes accumulated.
    pub total_bytes: u64,
    /// Shannon entropy in bits per byte, rounded to 6 decimals.
    pub entropy: f64,
    /// Chi-square statistic of the byte histogram against a uniform distribution.
    pub chi_square: f64,
    /// Arithmetic mean of the byte values.
    pub mean: f64,
    /// Monte Carlo estimate of pi.
    pub monte_carlo_pi: f64,
    /// Lag-1 serial correlation coefficient, or [`SERIAL_CORRELATION_UNDEFINED`].
    pub serial_correlation: f64,
}

impl FinalizedStatistics {
    /// Whether every byte had the same value, leaving serial correlation undefined.
    pub fn serial_correlation_undefined(&self) -> bool {
        is_serial_correlation_undefined(self.serial_correlation)
    }
}

/// Incremental byte-stream statistics accumulator.
///
/// A single owner feeds bytes in stream order; the Monte Carlo window and the
/// serial correlation sums depend on that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamAccumulator {
    histogram: ByteHistogram,
    monte_carlo: MonteCarloWindow,
    serial: SerialCorrelation,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest the next chunk of the stream. Empty chunks are no-ops.
    pub fn add(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.histogram.push(c);
            self.monte_carlo.push(c);
            self.serial.push(c);
        }
        log::trace!(
            "ingested {} byte(s), {} total",
            bytes.len(),
            self.histogram.total
        );
    }

    /// Total number of bytes ingested so far.
    pub fn total_bytes(&self) -> u64 {
        self.histogram.total
    }

    /// Whether any bytes have been ingested.
    pub fn is_empty(&self) -> bool {
        self.histogram.total == 0
    }

    /// Occurrence count of each byte value.
    pub fn histogram(&self) -> &[u64; BINS] {
        &self.histogram.counts
    }

    /// Number of completed six-byte Monte Carlo windows.
    pub fn monte_carlo_points(&self) -> u64 {
        self.monte_carlo.completed
    }

    fn require_bytes(&self) -> Result<()> {
        if self.is_empty() {
            Err(AnalysisError::EmptyInput)
        } else {
            Ok(())
        }
    }

    pub fn mean(&self) -> Result<f64> {
        self.require_bytes()?;
        Ok(self.histogram.mean())
    }

    pub fn chi_square(&self) -> Result<f64> {
        self.require_bytes()?;
        Ok(self.histogram.chi_square())
    }

    pub fn entropy(&self) -> Result<f64> {
        self.require_bytes()?;
        Ok(self.histogram.entropy())
    }

    /// Monte Carlo pi; needs at least one completed six-byte window.
    pub fn monte_carlo_pi(&self) -> Result<f64> {
        self.require_bytes()?;
        self.monte_carlo
            .estimate()
            .ok_or(AnalysisError::InsufficientSamples {
                bytes: self.histogram.total,
            })
    }

    /// Serial correlation coefficient; all-equal input yields
    /// [`SERIAL_CORRELATION_UNDEFINED`] rather than an error.
    pub fn serial_correlation(&self) -> Result<f64> {
        self.require_bytes()?;
        Ok(self.serial.coefficient(self.histogram.total))
    }

    /// Compute all five statistics.
    ///
    /// Does not mutate or consume the accumulator, so it may be called any
    /// number of times. Fails with [`AnalysisError::EmptyInput`] for no bytes
    /// and [`AnalysisError::InsufficientSamples`] for fewer than
    /// [`MONTE_CARLO_WINDOW`] bytes.
    pub fn finish(&self) -> Result<FinalizedStatistics> {
        let stats = FinalizedStatistics {
            total_bytes: self.histogram.total,
            entropy: self.entropy()?,
            chi_square: self.chi_square()?,
            mean: self.mean()?,
            monte_carlo_pi: self.monte_carlo_pi()?,
            serial_correlation: self.serial_correlation()?,
        };
        log::debug!(
            "finalized {} byte(s), {} Monte Carlo point(s)",
            stats.total_bytes,
            self.monte_carlo.completed
        );
        Ok(stats)
    }
}
