//! Engine construction parameters and the per-call options bag.

use crate::cache::DEFAULT_SIZE_TOLERANCE;
use crate::correlation::{DEFAULT_CORRELATION_WINDOW, DEFAULT_TOP_PAIRS};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::instance::DEFAULT_DIMENSIONS;
use crate::sampler::DimensionConstraint;
use serde::{Deserialize, Serialize};

/// Constructor-time engine parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Dimension windows allocated up front.
    pub dimensions: usize,
    /// Capacity of each dimension window.
    pub history_capacity: usize,
    /// Most recent samples correlated per pair.
    pub correlation_window: usize,
    /// Number of correlated pairs kept in a pattern.
    pub top_pairs: usize,
    /// Relative size tolerance for cache reuse.
    pub cache_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            correlation_window: DEFAULT_CORRELATION_WINDOW,
            top_pairs: DEFAULT_TOP_PAIRS,
            cache_tolerance: DEFAULT_SIZE_TOLERANCE,
        }
    }
}

/// Per-call options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Optional remap per dimension, applied by the sampler.
    pub constraints: Vec<Option<DimensionConstraint>>,
}

impl SolveOptions {
    /// Options with one constraint slot per dimension.
    pub fn with_constraints(constraints: Vec<Option<DimensionConstraint>>) -> Self {
        Self { constraints }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_default_is_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.dimensions, 11);
        assert_eq!(cfg.history_capacity, 100);
        assert!(cfg.history_capacity > cfg.correlation_window);
        assert_eq!(cfg.top_pairs, 3);
        assert!((0.0..1.0).contains(&cfg.cache_tolerance));
    }

    #[test]
    fn options_deserialize_from_json() {
        let json = r#"{"constraints":[{"range":{"min":1.0,"max":2.0}},null,{"count":4}]}"#;
        let opts: SolveOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.constraints.len(), 3);
        assert_eq!(opts.constraints[1], None);
        assert_eq!(opts.constraints[2], Some(DimensionConstraint::Count(4)));
    }
}
