//! Property-based tests for randseq-core.
//!
//! Uses proptest to check streaming and probability invariants across many
//! random inputs.

use proptest::prelude::*;
use randseq_core::{SERIAL_CORRELATION_UNDEFINED, StreamAccumulator, tail_probability};

/// Largest increase allowed between neighbouring tail probabilities. The
/// switch to log-domain summation at `BIGX` dips by about 2e-9.
const APPROX_TOL: f64 = 1e-8;

fn accumulate(chunks: &[&[u8]]) -> StreamAccumulator {
    let mut acc = StreamAccumulator::new();
    for chunk in chunks {
        acc.add(chunk);
    }
    acc
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// add(A); add(B) is indistinguishable from add(A ++ B).
    #[test]
    fn split_point_is_irrelevant(data in prop::collection::vec(any::<u8>(), 0..2048), split in any::<prop::sample::Index>()) {
        let at = split.index(data.len() + 1);
        let split_acc = accumulate(&[&data[..at], &data[at..]]);
        let whole_acc = accumulate(&[&data]);
        prop_assert_eq!(&split_acc, &whole_acc);

        match (split_acc.finish(), whole_acc.finish()) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            (a, b) => prop_assert!(false, "mismatch: {:?} vs {:?}", a, b),
        }
    }

    /// Total bytes equals the sum of chunk lengths, and the histogram agrees.
    #[test]
    fn total_counts_every_byte(chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..32)) {
        let refs: Vec<&[u8]> = chunks.iter().map(|c| c.as_slice()).collect();
        let acc = accumulate(&refs);
        let expected: usize = chunks.iter().map(Vec::len).sum();
        prop_assert_eq!(acc.total_bytes(), expected as u64);
        prop_assert_eq!(acc.histogram().iter().sum::<u64>(), expected as u64);
        prop_assert_eq!(acc.monte_carlo_points(), (expected / 6) as u64);
    }

    /// Repeated values always hit the serial correlation sentinel.
    #[test]
    fn repeated_value_is_undefined(value in any::<u8>(), len in 1usize..5000) {
        let acc = accumulate(&[&vec![value; len]]);
        prop_assert_eq!(acc.serial_correlation().unwrap(), SERIAL_CORRELATION_UNDEFINED);
        prop_assert_eq!(acc.entropy().unwrap(), 0.0);
    }

    /// Statistics stay within their mathematical ranges.
    #[test]
    fn statistics_in_range(data in prop::collection::vec(any::<u8>(), 6..4096)) {
        let stats = accumulate(&[&data]).finish().unwrap();
        prop_assert!((0.0..=8.0).contains(&stats.entropy));
        prop_assert!((0.0..=255.0).contains(&stats.mean));
        prop_assert!(stats.chi_square >= 0.0);
        prop_assert!((0.0..=4.0).contains(&stats.monte_carlo_pi));
        if !stats.serial_correlation_undefined() {
            prop_assert!(stats.serial_correlation.abs() <= 1.0 + 1e-9, "scc={}", stats.serial_correlation);
        }
    }

    /// The tail probability is a probability.
    #[test]
    fn tail_probability_in_unit_interval(x in 0.0..2000.0f64, df in 1u32..600) {
        let p = tail_probability(x, df);
        prop_assert!((0.0..=1.0).contains(&p), "p({}, {}) = {}", x, df, p);
    }

    /// Larger statistics are never more likely.
    #[test]
    fn tail_probability_non_increasing(x in 0.0..1000.0f64, dx in 0.0..50.0f64, df in 1u32..400) {
        let lo = tail_probability(x, df);
        let hi = tail_probability(x + dx, df);
        prop_assert!(hi <= lo + APPROX_TOL, "p({}, {}) = {} > p({}, {}) = {}", x + dx, df, hi, x, df, lo);
    }
}

#[test]
fn tail_probability_sweep_is_monotone() {
    for df in [1u32, 2, 3, 10, 254, 255, 256] {
        let mut prev = 1.0;
        let mut x = 0.0;
        while x < 800.0 {
            let p = tail_probability(x, df);
            assert!(
                p <= prev + APPROX_TOL,
                "df={df}: p({x}) = {p} > previous {prev}"
            );
            prev = p;
            x += 0.25;
        }
    }
}
