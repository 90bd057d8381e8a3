//! The solve pipeline and the state it carries between calls.
//!
//! `sample → drift → (cache | correlate + project) → collapse → strategy → verify`
//!
//! All cross-call mutation lives in [`EngineState`]. `solve` takes `&mut self`,
//! so one engine serves one caller at a time; parallel drivers own one engine
//! per worker.

use crate::cache::{PatternCache, Signature};
use crate::config::{EngineConfig, SolveOptions};
use crate::correlation::strongest_pairs;
use crate::drift::{apply_drift, DriftState};
use crate::error::EngineError;
use crate::history::DimensionHistory;
use crate::instance::{Instance, ProblemKind};
use crate::metrics::{estimate, ComplexityMetrics};
use crate::projection::{build_pattern, collapse, CorrelationPattern};
use crate::sampler::VectorSampler;
use crate::strategy::{solve_with_evidence, Solution};
use crate::verify;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

// ============================================================================
// State
// ============================================================================

/// Mutable state shared by consecutive solves on one engine.
#[derive(Clone, Debug)]
pub struct EngineState {
    /// Cycle counter and oscillator value.
    pub drift: DriftState,
    /// Rolling per-dimension windows.
    pub history: DimensionHistory,
    /// Patterns by problem signature.
    pub cache: PatternCache,
    /// Number of correlation analyses run (cache misses).
    pub analyses: u64,
}

impl EngineState {
    fn new(cfg: &EngineConfig) -> Self {
        Self {
            drift: DriftState::default(),
            history: DimensionHistory::new(cfg.dimensions, cfg.history_capacity),
            cache: PatternCache::new(cfg.cache_tolerance),
            analyses: 0,
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Everything one solve reports. The `solution` variant matches `kind`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolveResult {
    /// Problem kind that was solved.
    pub kind: ProblemKind,
    /// Best-effort solution.
    pub solution: Solution,
    /// Whether the solution passed verification.
    pub valid: bool,
    /// Wall-clock time of the solve in milliseconds.
    pub elapsed_ms: f64,
    /// Instance size.
    pub size: usize,
    /// Complexity telemetry.
    pub metrics: ComplexityMetrics,
    /// Oscillator value after this solve's drift.
    pub drift_state: f64,
    /// Cycle counter after this solve's drift.
    pub cycle: u64,
    /// Whether the pattern came from the cache.
    pub cache_hit: bool,
    /// Pattern used for this solve.
    pub pattern: CorrelationPattern,
}

// ============================================================================
// Engine
// ============================================================================

/// A solver session.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    state: EngineState,
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let state = EngineState::new(&config);
        Self { config, state }
    }
}

impl Engine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with `config`.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidDimension`] if `config.dimensions == 0`.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        if config.dimensions == 0 {
            return Err(EngineError::InvalidDimension(0));
        }
        let state = EngineState::new(&config);
        Ok(Self { config, state })
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Runs the full pipeline once for `instance`.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidDimension`] if the instance's dimension
    /// count is zero. An infeasible solution is not an error; see
    /// [`SolveResult::valid`].
    pub fn solve(
        &mut self,
        instance: &Instance,
        options: &SolveOptions,
    ) -> Result<SolveResult, EngineError> {
        let start = Instant::now();
        let kind = instance.kind();
        let size = instance.size();
        let dimensions = instance.dimensions();

        let sampler = VectorSampler::new(dimensions)?;
        let vectors = sampler.sample_batch(size, &options.constraints);
        let drifted = apply_drift(
            &mut self.state.drift,
            &mut self.state.history,
            &vectors,
            size,
        );

        let signature = Signature {
            kind,
            dimensions,
            size,
        };
        let (pattern, cache_hit) = self.pattern_for(signature, &drifted);

        let evidence = collapse(&pattern.projections, size);
        let solution = solve_with_evidence(instance, &evidence);
        let valid = match verify::check(instance, &solution) {
            Ok(()) => true,
            Err(reason) => {
                debug!(%kind, size, %reason, "solution failed verification");
                false
            }
        };

        let elapsed = start.elapsed();
        debug!(
            %kind,
            size,
            valid,
            cache_hit,
            cycle = self.state.drift.cycle,
            elapsed_us = elapsed.as_micros() as u64,
            "solve finished"
        );

        Ok(SolveResult {
            kind,
            solution,
            valid,
            elapsed_ms: elapsed.as_secs_f64() * 1_000.0,
            size,
            metrics: estimate(elapsed, size),
            drift_state: self.state.drift.value,
            cycle: self.state.drift.cycle,
            cache_hit,
            pattern,
        })
    }

    /// Returns a reusable cached pattern, or correlates the history, projects
    /// `drifted` and caches the result.
    fn pattern_for(
        &mut self,
        signature: Signature,
        drifted: &[Vec<f64>],
    ) -> (CorrelationPattern, bool) {
        if let Some(pattern) = self.state.cache.lookup(&signature).cloned() {
            debug!(kind = %signature.kind, size = signature.size, "pattern cache hit");
            return (pattern, true);
        }

        let pairs = strongest_pairs(
            &self.state.history,
            signature.dimensions,
            self.config.correlation_window,
            self.config.top_pairs,
        );
        self.state.analyses += 1;
        debug!(
            kind = %signature.kind,
            size = signature.size,
            pairs = pairs.len(),
            cached = self.state.cache.len(),
            "pattern cache miss; correlated history"
        );

        let pattern = build_pattern(drifted, pairs);
        self.state.cache.insert(signature, pattern.clone());
        (pattern, false)
    }
}

// ============================================================================
// Tests
// ============================================================================
