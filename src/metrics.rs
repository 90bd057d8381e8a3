//! Synthetic complexity telemetry derived from wall-clock time.
//!
//! These numbers are reported alongside each result and never feed back into
//! the engine.

use serde::Serialize;
use std::time::Duration;

/// Complexity estimates for one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ComplexityMetrics {
    /// `elapsed_ms / (size·ln size)`; `None` when `size ≤ 1`.
    pub measured_complexity: Option<f64>,
    /// `ln(elapsed_ms / 10) / ln size`, rounded to two decimals; `None` when
    /// `size ≤ 1` or no time elapsed.
    pub polynomial_degree: Option<f64>,
}

/// Estimates complexity metrics from `elapsed` and instance `size`.
pub fn estimate(elapsed: Duration, size: usize) -> ComplexityMetrics {
    if size <= 1 {
        return ComplexityMetrics::default();
    }
    let ms = elapsed.as_secs_f64() * 1_000.0;
    let ln_size = (size as f64).ln();
    let measured_complexity = Some(ms / (size as f64 * ln_size));
    let polynomial_degree = (ms > 0.0).then(|| round2((ms / 10.0).ln() / ln_size));
    ComplexityMetrics {
        measured_complexity,
        polynomial_degree,
    }
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ============================================================================
// Tests
// ============================================================================
