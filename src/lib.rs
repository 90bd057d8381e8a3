//! # Pattern-Projection Engine
//!
//! A stateful heuristic engine that proposes solutions for four textbook
//! combinatorial problems: tour construction, vertex coloring, clause
//! satisfaction and subset summation.
//!
//! Every solve runs the same pipeline:
//! - Sample golden-ratio candidate vectors in an 11-dimensional unit space.
//! - Drift them with a deterministic oscillator, recording each value in a
//!   bounded per-dimension history.
//! - Correlate the recent history pairwise and keep the three strongest pairs
//!   (or reuse a cached pattern for a similar problem signature).
//! - Project the vectors onto those pairs and keep the top `⌈log2 n⌉`.
//! - Hand the ranked projections to a fixed per-kind heuristic, then verify.
//!
//! The engine performs a fixed amount of numeric work per input. It does not
//! guarantee optimal, or even feasible, solutions; feasibility is reported in
//! [`engine::SolveResult::valid`].
//!
//! ## Quick Start
//!
//! ```
//! use pattern_engine::prelude::*;
//!
//! let mut engine = Engine::new();
//! let instance = Instance::satisfaction(1, vec![vec![1]]).unwrap();
//! let result = engine.solve(&instance, &SolveOptions::default()).unwrap();
//! assert!(result.valid);
//! ```
//!
//! ## Random Instances
//!
//! ```
//! use pattern_engine::generate::random_instance;
//! use pattern_engine::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let instance = random_instance(&mut rng, ProblemKind::Tour, 25, &GeneratorConfig::default()).unwrap();
//! let result = Engine::new().solve(&instance, &SolveOptions::default()).unwrap();
//! assert!(result.valid); // tours are always permutations
//! ```
//!
//! ## Modules
//!
//! - [`sampler`]: deterministic candidate vectors.
//! - [`drift`]: golden-ratio drift and the cycle counter.
//! - [`history`]: bounded per-dimension windows.
//! - [`correlation`]: pairwise Pearson correlation.
//! - [`cache`]: approximate-signature pattern cache.
//! - [`projection`]: projection and collapse.
//! - [`strategy`]: per-kind heuristics.
//! - [`verify`]: feasibility checks.
//! - [`metrics`]: complexity telemetry.
//! - [`engine`]: the solve pipeline.
//! - [`generate`]: seeded random instances.
//! - [`bench`]: parallel benchmark sweep.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for index-keyed scoring
#![allow(clippy::doc_markdown)]
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod bench;
pub mod cache;
pub mod config;
pub mod correlation;
pub mod drift;
pub mod engine;
pub mod error;
pub mod generate;
pub mod history;
pub mod instance;
pub mod metrics;
pub mod projection;
pub mod sampler;
pub mod strategy;
pub mod verify;

/// The golden ratio φ.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Fractional part in `[0, 1)`.
#[inline]
pub(crate) fn frac(x: f64) -> f64 {
    let f = x.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::config::{EngineConfig, SolveOptions};
    pub use crate::engine::{Engine, SolveResult};
    pub use crate::error::EngineError;
    pub use crate::generate::GeneratorConfig;
    pub use crate::instance::{City, Instance, Problem, ProblemKind};
    pub use crate::sampler::DimensionConstraint;
    pub use crate::strategy::Solution;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frac_stays_in_unit_interval() {
        assert_eq!(frac(2.25), 0.25);
        assert_eq!(frac(0.0), 0.0);
        assert!((frac(-0.25) - 0.75).abs() < 1e-15);
        assert!((0.0..1.0).contains(&frac(-1e-20)));
    }
}
