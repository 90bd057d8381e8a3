//! Projection of candidate vectors onto correlated dimension pairs, and the
//! collapse step that keeps only the strongest projections.

use crate::correlation::DimensionPair;
use crate::GOLDEN_RATIO;
use serde::Serialize;

/// One candidate vector reduced to per-pair coordinates plus a ranking value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    /// `((v[a] + v[b]) / 2)·|r|` for each pair, in pair rank order.
    pub coordinates: Vec<f64>,
    /// `Σ coordinate_k · φ^k`.
    pub value: f64,
}

impl Projection {
    /// Coordinate `k`, or `0.0` when the pattern had fewer than `k + 1` pairs.
    #[inline]
    pub fn coordinate(&self, k: usize) -> f64 {
        self.coordinates.get(k).copied().unwrap_or(0.0)
    }
}

/// The correlated pairs found for a problem signature and the projections
/// computed from them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CorrelationPattern {
    /// At most three pairs, strongest first.
    pub pairs: Vec<DimensionPair>,
    /// One projection per candidate vector, in vector order.
    pub projections: Vec<Projection>,
}

/// Projects a single vector onto `pairs`.
///
/// Pairs naming a dimension the vector lacks read that dimension as `0.0`.
pub fn project(vector: &[f64], pairs: &[DimensionPair]) -> Projection {
    let mut coordinates = Vec::with_capacity(pairs.len());
    let mut value = 0.0;
    let mut weight = 1.0;
    for pair in pairs {
        let x = vector.get(pair.a).copied().unwrap_or(0.0);
        let y = vector.get(pair.b).copied().unwrap_or(0.0);
        let coordinate = (x + y) / 2.0 * pair.strength();
        value += coordinate * weight;
        coordinates.push(coordinate);
        weight *= GOLDEN_RATIO;
    }
    Projection { coordinates, value }
}

/// Builds a pattern by projecting every vector onto `pairs`.
pub fn build_pattern(vectors: &[Vec<f64>], pairs: Vec<DimensionPair>) -> CorrelationPattern {
    let projections = vectors.iter().map(|v| project(v, &pairs)).collect();
    CorrelationPattern { pairs, projections }
}

/// Number of projections kept for an instance of `size`: `max(1, ⌈log2 size⌉)`.
pub fn evidence_count(size: usize) -> usize {
    if size <= 2 {
        return 1;
    }
    (size as f64).log2().ceil() as usize
}

/// Keeps the top [`evidence_count`] projections by descending value (stable).
pub fn collapse(projections: &[Projection], size: usize) -> Vec<Projection> {
    let mut ranked = projections.to_vec();
    ranked.sort_by(|p, q| q.value.total_cmp(&p.value));
    ranked.truncate(evidence_count(size));
    ranked
}

// ============================================================================
// Tests
// ============================================================================
