//! Human- and machine-readable randomness report.
//!
//! Turns [`FinalizedStatistics`] into the classical five-paragraph summary and
//! the derived metrics downstream tools rely on (chi-square tail probability,
//! optimal compression, Monte Carlo error).

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::accumulator::{DEGREES_OF_FREEDOM, FinalizedStatistics, is_serial_correlation_undefined};
use crate::chisq::tail_probability;

/// Expected arithmetic mean of uniformly random bytes.
pub const MEAN_RANDOM: f64 = 127.5;

/// Complete analysis of one byte stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceReport {
    /// Label of the analyzed input (file path, `-` for stdin).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub total_bytes: u64,
    /// Bits per byte.
    pub entropy: f64,
    /// How much an optimal coder could shrink the input, in whole percent.
    pub optimal_compression_percent: i32,
    pub mean: f64,
    pub mean_random: f64,
    pub monte_carlo_pi: f64,
    pub monte_carlo_error_percent: f64,
    pub chi_square: f64,
    /// Probability of a chi-square at least this large for truly random bytes.
    pub chi_square_probability: f64,
    pub serial_correlation: f64,
}

impl SequenceReport {
    pub fn from_statistics(stats: &FinalizedStatistics) -> Self {
        Self {
            source: None,
            total_bytes: stats.total_bytes,
            entropy: stats.entropy,
            optimal_compression_percent: optimal_compression_percent(stats.entropy),
            mean: stats.mean,
            mean_random: MEAN_RANDOM,
            monte_carlo_pi: stats.monte_carlo_pi,
            monte_carlo_error_percent: monte_carlo_error_percent(stats.monte_carlo_pi),
            chi_square: stats.chi_square,
            chi_square_probability: tail_probability(stats.chi_square, DEGREES_OF_FREEDOM),
            serial_correlation: stats.serial_correlation,
        }
    }

    /// Attach a label for the analyzed input.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether every byte had the same value, leaving serial correlation undefined.
    pub fn serial_correlation_undefined(&self) -> bool {
        is_serial_correlation_undefined(self.serial_correlation)
    }

    /// Plain-text report, identical to the `Display` output.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

/// `floor(100 * (8 - entropy) / 8)`.
pub fn optimal_compression_percent(entropy: f64) -> i32 {
    (100.0 * (8.0 - entropy) / 8.0).floor() as i32
}

/// Relative error of a pi estimate, in percent.
pub fn monte_carlo_error_percent(estimate: f64) -> f64 {
    100.0 * (PI - estimate).abs() / PI
}

/// How often truly random data would exceed the observed chi-square.
pub fn chi_square_narrative(probability: f64) -> String {
    if probability < 0.0001 {
        "less than 0.01 percent".to_string()
    } else if probability > 0.9999 {
        "more than 99.99 percent".to_string()
    } else {
        format!("{:.2} percent", probability * 100.0)
    }
}

impl fmt::Display for SequenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Entropy = {:.6} bits per byte.", self.entropy)?;
        writeln!(f)?;
        writeln!(
            f,
            "Optimum compression would reduce the size of this {} byte file by {} percent.",
            self.total_bytes, self.optimal_compression_percent
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Chi square distribution for {} samples is {:.2}, and randomly",
            self.total_bytes, self.chi_square
        )?;
        writeln!(
            f,
            "would exceed this value {} of the times.",
            chi_square_narrative(self.chi_square_probability)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Arithmetic mean value of data bytes is {:.4} ({} = random).",
            self.mean, self.mean_random
        )?;
        writeln!(
            f,
            "Monte Carlo value for Pi is {:.9} (error {:.2} percent).",
            self.monte_carlo_pi, self.monte_carlo_error_percent
        )?;
        if self.serial_correlation_undefined() {
            writeln!(
                f,
                "Serial correlation coefficient is undefined (all values equal!)."
            )
        } else {
            writeln!(
                f,
                "Serial correlation coefficient is {:.6} (totally uncorrelated = 0.0).",
                self.serial_correlation
            )
        }
    }
}
