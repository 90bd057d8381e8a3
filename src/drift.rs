//! Golden-ratio drift applied to each sampled batch.
//!
//! This is the only place that advances the cycle counter and writes to the
//! dimension history. It must run once per batch, in vector order.

use crate::history::DimensionHistory;
use crate::{frac, GOLDEN_RATIO};
use serde::Serialize;
use tracing::trace;

/// Amplitude of the drift oscillator.
const DRIFT_AMPLITUDE: f64 = 0.1;

/// Scale applied to each per-dimension drift factor.
const DRIFT_FACTOR_SCALE: f64 = 0.2;

/// Cycle counter and current oscillator value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DriftState {
    /// Number of drift applications so far.
    pub cycle: u64,
    /// `sin(cycle·φ)·0.1`, in `(-0.1, 0.1)`.
    pub value: f64,
}

impl DriftState {
    /// Advances one cycle and recomputes the oscillator value.
    #[inline]
    pub fn advance(&mut self) {
        self.cycle += 1;
        self.value = (self.cycle as f64 * GOLDEN_RATIO).sin() * DRIFT_AMPLITUDE;
    }
}

/// `1 / (1 + log10(size))`; shrinks the drift as instances grow.
#[inline]
pub fn size_factor(size: usize) -> f64 {
    1.0 / (1.0 + (size.max(1) as f64).log10())
}

/// Drift factor for dimension `j` of vector `k`.
#[inline]
pub fn drift_factor(k: usize, j: usize, size_factor: f64) -> f64 {
    frac(k as f64 * GOLDEN_RATIO + j as f64) * size_factor * DRIFT_FACTOR_SCALE
}

/// Advances `drift` once, then emits a drifted copy of every vector and
/// records each drifted value in `history`.
///
/// Input vectors are left untouched. `history` grows to cover the widest vector.
pub fn apply_drift(
    drift: &mut DriftState,
    history: &mut DimensionHistory,
    vectors: &[Vec<f64>],
    size: usize,
) -> Vec<Vec<f64>> {
    drift.advance();
    let sf = size_factor(size);
    let state = drift.value;
    trace!(cycle = drift.cycle, drift_state = state, vectors = vectors.len(), "applying drift");

    let mut out = Vec::with_capacity(vectors.len());
    for (k, vector) in vectors.iter().enumerate() {
        history.ensure_dimensions(vector.len());
        let drifted: Vec<f64> = vector
            .iter()
            .enumerate()
            .map(|(j, &v)| {
                let df = drift_factor(k, j, sf);
                let x = (v + v * df * state).clamp(0.0, 1.0);
                history.push(j, x);
                x
            })
            .collect();
        out.push(drifted);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_follows_sine_of_cycle() {
        let mut d = DriftState::default();
        d.advance();
        assert_eq!(d.cycle, 1);
        assert!((d.value - GOLDEN_RATIO.sin() * 0.1).abs() < 1e-15);
        d.advance();
        assert_eq!(d.cycle, 2);
        assert!((d.value - (2.0 * GOLDEN_RATIO).sin() * 0.1).abs() < 1e-15);
        assert!(d.value.abs() < 0.1);
    }

    #[test]
    fn size_factor_decreases_with_size() {
        assert!((size_factor(1) - 1.0).abs() < 1e-15);
        assert!((size_factor(10) - 0.5).abs() < 1e-15);
        assert!(size_factor(1000) < size_factor(100));
    }

    #[test]
    fn one_cycle_per_batch_and_one_sample_per_value() {
        let mut d = DriftState::default();
        let mut h = DimensionHistory::new(3, 100);
        let vectors = vec![vec![0.2, 0.4, 0.6], vec![0.9, 0.1, 0.5]];
        let out = apply_drift(&mut d, &mut h, &vectors, 10);

        assert_eq!(d.cycle, 1);
        assert_eq!(out.len(), 2);
        for j in 0..3 {
            assert_eq!(h.len(j), 2);
            let recorded: Vec<f64> = h.window(j).iter().copied().collect();
            assert_eq!(recorded, vec![out[0][j], out[1][j]]);
        }
        assert_eq!(vectors[0], vec![0.2, 0.4, 0.6]);
    }

    #[test]
    fn drifted_values_stay_in_unit_range() {
        let mut d = DriftState::default();
        let mut h = DimensionHistory::new(2, 100);
        let vectors = vec![vec![1.0, 0.0], vec![0.999, 1.0]];
        for _ in 0..200 {
            for v in apply_drift(&mut d, &mut h, &vectors, 2) {
                assert!(v.iter().all(|x| (0.0..=1.0).contains(x)));
            }
        }
        assert_eq!(d.cycle, 200);
        assert_eq!(h.len(0), 100);
    }

    #[test]
    fn drift_matches_formula() {
        let mut d = DriftState::default();
        let mut h = DimensionHistory::new(2, 100);
        let out = apply_drift(&mut d, &mut h, &[vec![0.5, 0.5], vec![0.5, 0.5]], 100);
        let sf = size_factor(100);
        for (k, v) in out.iter().enumerate() {
            for (j, &x) in v.iter().enumerate() {
                let expected = 0.5 + 0.5 * drift_factor(k, j, sf) * d.value;
                assert!((x - expected).abs() < 1e-15);
            }
        }
    }
}
