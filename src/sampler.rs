//! Deterministic candidate-vector sampling in the unit hypercube.
//!
//! Draw `i` uses the golden-ratio phase `(i·φ) mod 1`; dimension `d` of that
//! draw is `((d+1)·phase·φ) mod 1`. No external randomness is involved.

use crate::error::EngineError;
use crate::{frac, GOLDEN_RATIO};
use serde::{Deserialize, Serialize};

/// Optional per-dimension remapping applied after the raw draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionConstraint {
    /// Affine remap of `[0,1]` onto `[min,max]`.
    Range {
        /// Value at 0.
        min: f64,
        /// Value at 1.
        max: f64,
    },
    /// Quantized pick from an option list: `options[floor(v·N)]`.
    Options(Vec<f64>),
    /// Quantized index `floor(v·n)` in `0..n`.
    Count(usize),
}

impl DimensionConstraint {
    /// Applies the constraint to a raw value in `[0,1)`.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Range { min, max } => min + value * (max - min),
            Self::Options(options) => {
                if options.is_empty() {
                    return value;
                }
                options[quantize(value, options.len())]
            }
            Self::Count(n) => {
                if *n == 0 {
                    return value;
                }
                quantize(value, *n) as f64
            }
        }
    }
}

#[inline]
fn quantize(value: f64, n: usize) -> usize {
    ((value * n as f64).floor().max(0.0) as usize).min(n - 1)
}

/// Number of candidate vectors drawn for an instance of `size`:
/// `⌈log2(size)·φ⌉`, at least one.
pub fn vector_count(size: usize) -> usize {
    if size <= 1 {
        return 1;
    }
    ((size as f64).log2() * GOLDEN_RATIO).ceil().max(1.0) as usize
}

/// Sampler for a fixed dimension count.
#[derive(Clone, Debug)]
pub struct VectorSampler {
    dimensions: usize,
}

impl VectorSampler {
    /// Creates a sampler over `dimensions` dimensions.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidDimension`] if `dimensions == 0`.
    pub fn new(dimensions: usize) -> Result<Self, EngineError> {
        if dimensions == 0 {
            return Err(EngineError::InvalidDimension(dimensions));
        }
        Ok(Self { dimensions })
    }

    /// Dimension count.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Draws vector `index`. `constraints[d]`, when present, remaps dimension `d`.
    pub fn sample(&self, index: usize, constraints: &[Option<DimensionConstraint>]) -> Vec<f64> {
        let phase = frac(index as f64 * GOLDEN_RATIO);
        (0..self.dimensions)
            .map(|d| {
                let raw = frac((d + 1) as f64 * phase * GOLDEN_RATIO);
                match constraints.get(d) {
                    Some(Some(c)) => c.apply(raw),
                    _ => raw,
                }
            })
            .collect()
    }

    /// Draws the full batch for an instance of `size`, in seed order.
    pub fn sample_batch(
        &self,
        size: usize,
        constraints: &[Option<DimensionConstraint>],
    ) -> Vec<Vec<f64>> {
        (0..vector_count(size))
            .map(|i| self.sample(i, constraints))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_is_rejected() {
        assert_eq!(
            VectorSampler::new(0).unwrap_err(),
            EngineError::InvalidDimension(0)
        );
    }

    #[test]
    fn vector_count_follows_log2_phi() {
        assert_eq!(vector_count(0), 1);
        assert_eq!(vector_count(1), 1);
        // log2(2) * phi = 1.618 -> 2
        assert_eq!(vector_count(2), 2);
        // log2(4) * phi = 3.236 -> 4
        assert_eq!(vector_count(4), 4);
        // log2(1024) * phi = 16.18 -> 17
        assert_eq!(vector_count(1024), 17);
    }

    #[test]
    fn samples_are_deterministic_and_in_unit_range() {
        let sampler = VectorSampler::new(11).unwrap();
        for i in 0..50 {
            let a = sampler.sample(i, &[]);
            let b = sampler.sample(i, &[]);
            assert_eq!(a, b);
            assert_eq!(a.len(), 11);
            assert!(a.iter().all(|v| (0.0..1.0).contains(v)));
        }
    }

    #[test]
    fn first_draw_is_all_zero() {
        // phase(0) = 0, so every dimension is 0.
        let sampler = VectorSampler::new(4).unwrap();
        assert_eq!(sampler.sample(0, &[]), vec![0.0; 4]);
    }

    #[test]
    fn raw_value_matches_formula() {
        let sampler = VectorSampler::new(3).unwrap();
        let v = sampler.sample(1, &[]);
        let phase = frac(GOLDEN_RATIO);
        for (d, &x) in v.iter().enumerate() {
            let expected = frac((d + 1) as f64 * phase * GOLDEN_RATIO);
            assert!((x - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn constraints_remap_selected_dimensions() {
        let sampler = VectorSampler::new(3).unwrap();
        let raw = sampler.sample(3, &[]);
        let constraints = vec![
            Some(DimensionConstraint::Range { min: 10.0, max: 20.0 }),
            None,
            Some(DimensionConstraint::Count(4)),
        ];
        let v = sampler.sample(3, &constraints);
        assert!((v[0] - (10.0 + raw[0] * 10.0)).abs() < 1e-12);
        assert_eq!(v[1], raw[1]);
        assert_eq!(v[2], (raw[2] * 4.0).floor());
    }

    #[test]
    fn options_quantize_into_the_list() {
        let c = DimensionConstraint::Options(vec![0.25, 0.5, 0.75]);
        assert_eq!(c.apply(0.0), 0.25);
        assert_eq!(c.apply(0.5), 0.5);
        assert_eq!(c.apply(0.999), 0.75);
        assert_eq!(c.apply(1.0), 0.75);
    }

    #[test]
    fn batch_size_matches_vector_count() {
        let sampler = VectorSampler::new(11).unwrap();
        assert_eq!(sampler.sample_batch(100, &[]).len(), vector_count(100));
    }
}
