//! Parallel benchmark sweep over problem kinds and sizes.
//!
//! Each kind runs on a rayon worker with its own [`Engine`], so no engine state
//! is shared across threads. A worker takes its sizes largest first, so the
//! history is already warm when the small sizes are analyzed. Every
//! (kind, size) job still draws instances from its own seeded RNG.

use crate::config::{EngineConfig, SolveOptions};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::generate::{random_instance, GeneratorConfig};
use crate::instance::ProblemKind;
use crate::metrics::ComplexityMetrics;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

// ============================================================================
// Configuration
// ============================================================================

/// Sweep parameters.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Kinds to sweep.
    pub kinds: Vec<ProblemKind>,
    /// Instance sizes to sweep.
    pub sizes: Vec<usize>,
    /// Solves per (kind, size).
    pub iterations: usize,
    /// Optional deterministic base seed.
    pub seed: Option<u64>,
    /// Engine parameters for every worker.
    pub engine: EngineConfig,
    /// Instance generator parameters.
    pub generator: GeneratorConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            kinds: ProblemKind::ALL.to_vec(),
            sizes: vec![8, 16, 32, 64, 128],
            iterations: 5,
            seed: None,
            engine: EngineConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

/// One solve in the sweep.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchRow {
    /// Problem kind.
    pub kind: ProblemKind,
    /// Instance size.
    pub size: usize,
    /// Iteration index within the job.
    pub iteration: usize,
    /// Verification outcome.
    pub valid: bool,
    /// Whether the pattern came from the cache.
    pub cache_hit: bool,
    /// Correlated pairs in the pattern used.
    pub pairs: usize,
    /// Wall-clock time in milliseconds.
    pub elapsed_ms: f64,
    /// Complexity telemetry.
    pub metrics: ComplexityMetrics,
}

/// Aggregate over all iterations of one (kind, size).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchSummary {
    /// Problem kind.
    pub kind: ProblemKind,
    /// Instance size.
    pub size: usize,
    /// Number of solves.
    pub runs: usize,
    /// Fraction of valid solutions.
    pub valid_rate: f64,
    /// Mean wall-clock time in milliseconds.
    pub mean_elapsed_ms: f64,
}

// ============================================================================
// Public API
// ============================================================================

/// Runs the sweep and returns rows ordered by kind, size, then iteration.
///
/// Kinds and sizes keep the order given in `cfg`.
///
/// # Errors
/// Returns the first engine or generator error any job hit.
pub fn run_sweep(cfg: &BenchConfig) -> Result<Vec<BenchRow>, EngineError> {
    let base_seed = cfg.seed.unwrap_or_else(rand::random::<u64>);

    info!(
        jobs = cfg.kinds.len() * cfg.sizes.len(),
        iterations = cfg.iterations,
        threads = rayon::current_num_threads(),
        base_seed,
        "starting benchmark sweep"
    );

    let per_kind: Vec<Vec<BenchRow>> = cfg
        .kinds
        .par_iter()
        .enumerate()
        .map(|(kind_id, &kind)| run_kind(cfg, base_seed, kind_id, kind))
        .collect::<Result<_, _>>()?;

    Ok(per_kind.into_iter().flatten().collect())
}

/// Groups rows by (kind, size), preserving first-seen order.
pub fn summarize(rows: &[BenchRow]) -> Vec<BenchSummary> {
    let mut out: Vec<BenchSummary> = Vec::new();
    for row in rows {
        let summary = match out
            .iter_mut()
            .position(|s| s.kind == row.kind && s.size == row.size)
        {
            Some(i) => &mut out[i],
            None => {
                out.push(BenchSummary {
                    kind: row.kind,
                    size: row.size,
                    runs: 0,
                    valid_rate: 0.0,
                    mean_elapsed_ms: 0.0,
                });
                let last = out.len() - 1;
                &mut out[last]
            }
        };
        // Running means.
        summary.runs += 1;
        let n = summary.runs as f64;
        summary.valid_rate += (f64::from(u8::from(row.valid)) - summary.valid_rate) / n;
        summary.mean_elapsed_ms += (row.elapsed_ms - summary.mean_elapsed_ms) / n;
    }
    out
}

// ============================================================================
// Worker
// ============================================================================

fn run_kind(
    cfg: &BenchConfig,
    base_seed: u64,
    kind_id: usize,
    kind: ProblemKind,
) -> Result<Vec<BenchRow>, EngineError> {
    let mut engine = Engine::with_config(cfg.engine.clone())?;

    // Largest first; stable so equal sizes keep their order.
    let mut schedule: Vec<usize> = (0..cfg.sizes.len()).collect();
    schedule.sort_by(|&a, &b| cfg.sizes[b].cmp(&cfg.sizes[a]));

    let mut per_size: Vec<Vec<BenchRow>> = vec![Vec::new(); cfg.sizes.len()];
    for size_id in schedule {
        let job_id = kind_id * cfg.sizes.len() + size_id;
        let size = cfg.sizes[size_id];
        per_size[size_id] = run_job(&mut engine, cfg, base_seed, job_id, kind, size)?;
    }
    Ok(per_size.into_iter().flatten().collect())
}

fn run_job(
    engine: &mut Engine,
    cfg: &BenchConfig,
    base_seed: u64,
    job_id: usize,
    kind: ProblemKind,
    size: usize,
) -> Result<Vec<BenchRow>, EngineError> {
    let mut rng = SmallRng::seed_from_u64(splitmix64(base_seed ^ (job_id as u64)));
    let options = SolveOptions::default();

    let mut rows = Vec::with_capacity(cfg.iterations);
    for iteration in 0..cfg.iterations {
        let instance = random_instance(&mut rng, kind, size, &cfg.generator)?
            .with_dimensions(cfg.engine.dimensions);
        let result = engine.solve(&instance, &options)?;
        rows.push(BenchRow {
            kind,
            size,
            iteration,
            valid: result.valid,
            cache_hit: result.cache_hit,
            pairs: result.pattern.pairs.len(),
            elapsed_ms: result.elapsed_ms,
            metrics: result.metrics,
        });
    }

    let valid = rows.iter().filter(|r| r.valid).count();
    info!(%kind, size, valid, runs = rows.len(), "job finished");
    Ok(rows)
}

/// SplitMix64 mixer for deriving per-job seeds from a base seed.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn small_sweep(seed: u64) -> BenchConfig {
        BenchConfig {
            sizes: vec![4, 12],
            iterations: 3,
            seed: Some(seed),
            ..BenchConfig::default()
        }
    }

    #[test]
    fn splitmix64_is_deterministic() {
        assert_eq!(splitmix64(0), splitmix64(0));
        assert_ne!(splitmix64(0), splitmix64(1));
    }

    #[test]
    fn sweep_covers_every_job_in_order() {
        let rows = run_sweep(&small_sweep(11)).unwrap();
        assert_eq!(rows.len(), 4 * 2 * 3);
        assert_eq!(rows[0].kind, ProblemKind::Tour);
        assert_eq!(rows[0].size, 4);
        assert_eq!(rows[3].size, 12);
        assert_eq!(rows.last().unwrap().kind, ProblemKind::SubsetSelection);
        // Tours are always permutations.
        assert!(rows
            .iter()
            .filter(|r| r.kind == ProblemKind::Tour)
            .all(|r| r.valid));
    }

    #[test]
    fn later_iterations_reuse_the_pattern() {
        let rows = run_sweep(&small_sweep(5)).unwrap();
        for row in &rows {
            assert_eq!(row.cache_hit, row.iteration > 0);
        }
    }

    #[test]
    fn small_sizes_correlate_on_history_warmed_by_large_ones() {
        let cfg = BenchConfig {
            sizes: vec![8, 128],
            iterations: 2,
            seed: Some(21),
            ..BenchConfig::default()
        };
        let rows = run_sweep(&cfg).unwrap();
        assert_eq!(rows.len(), 4 * 2 * 2);
        assert_eq!(rows[0].size, 8);
        for row in &rows {
            assert_eq!(row.pairs, 3, "{:?} size {} got no correlation", row.kind, row.size);
            assert_eq!(row.cache_hit, row.iteration > 0);
        }
    }

    #[test]
    fn sweep_outcomes_are_seed_deterministic() {
        let a = run_sweep(&small_sweep(99)).unwrap();
        let b = run_sweep(&small_sweep(99)).unwrap();
        let outcomes = |rows: &[BenchRow]| {
            rows.iter()
                .map(|r| (r.valid, r.pairs))
                .collect::<Vec<_>>()
        };
        assert_eq!(outcomes(&a), outcomes(&b));
    }

    #[test]
    fn summary_averages_per_job() {
        let rows = run_sweep(&small_sweep(3)).unwrap();
        let summary = summarize(&rows);
        assert_eq!(summary.len(), 8);
        for s in &summary {
            assert_eq!(s.runs, 3);
            assert!((0.0..=1.0).contains(&s.valid_rate));
            assert!(s.mean_elapsed_ms >= 0.0);
        }
        let tour = &summary[0];
        assert_eq!(tour.kind, ProblemKind::Tour);
        assert!((tour.valid_rate - 1.0).abs() < 1e-12);
    }
}
