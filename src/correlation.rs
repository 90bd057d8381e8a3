//! Pairwise Pearson correlation over the recent dimension history.

use crate::history::DimensionHistory;
use serde::Serialize;

/// Default number of most recent samples correlated per pair.
pub const DEFAULT_CORRELATION_WINDOW: usize = 10;

/// Default number of pairs kept.
pub const DEFAULT_TOP_PAIRS: usize = 3;

/// Two distinct dimensions and their correlation coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DimensionPair {
    /// Lower dimension index.
    pub a: usize,
    /// Higher dimension index.
    pub b: usize,
    /// Pearson coefficient in `[-1, 1]`.
    pub correlation: f64,
}

impl DimensionPair {
    /// `|correlation|`.
    #[inline]
    pub fn strength(&self) -> f64 {
        self.correlation.abs()
    }
}

/// Pearson correlation of two equally long samples.
///
/// Uses the mean-centred two-pass form. A side whose centred sum of squares
/// is within `f64::EPSILON` of its raw sum of squares counts as zero variance
/// and yields `0.0`, as does an empty sample. Rounding drift is clamped into
/// `[-1, 1]`.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    let (mut raw_xx, mut raw_yy) = (0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
        raw_xx += x * x;
        raw_yy += y * y;
    }
    // A constant series leaves only rounding residue in the centred sums.
    if sxx <= f64::EPSILON * raw_xx || syy <= f64::EPSILON * raw_yy {
        return 0.0;
    }
    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    (sxy / denominator).clamp(-1.0, 1.0)
}

/// Correlates every pair `a < b` of the first `dimensions` windows.
///
/// A pair qualifies only when both windows hold more than `window` samples;
/// the last `window` samples are used. Pairs are stable-sorted by descending
/// strength and truncated to `top`.
pub fn strongest_pairs(
    history: &DimensionHistory,
    dimensions: usize,
    window: usize,
    top: usize,
) -> Vec<DimensionPair> {
    let tails: Vec<Option<Vec<f64>>> = (0..dimensions)
        .map(|d| (history.len(d) > window).then(|| history.last(d, window).collect()))
        .collect();

    let mut pairs = Vec::new();
    for a in 0..dimensions {
        let Some(xs) = &tails[a] else { continue };
        for b in (a + 1)..dimensions {
            let Some(ys) = &tails[b] else { continue };
            pairs.push(DimensionPair {
                a,
                b,
                correlation: pearson(xs, ys),
            });
        }
    }

    // `sort_by` is stable: equal strengths keep discovery order.
    pairs.sort_by(|p, q| q.strength().total_cmp(&p.strength()));
    pairs.truncate(top);
    pairs
}

// ============================================================================
// Tests
// ============================================================================
