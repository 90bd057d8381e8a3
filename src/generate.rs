//! Seeded random instance generators.
//!
//! Outputs always pass instance validation. The engine never depends on how
//! instances were produced.

use crate::error::EngineError;
use crate::instance::{
    City, ColoringProblem, Instance, Problem, ProblemKind, SatisfactionProblem, SubsetProblem,
    TourProblem,
};
use rand::seq::index::sample;
use rand::Rng;

/// Generator parameters shared by all kinds.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Cities are drawn uniformly from `[0, extent)²`.
    pub extent: f64,
    /// Erdős–Rényi edge probability for coloring graphs.
    pub edge_probability: f64,
    /// Color budget for coloring instances.
    pub max_colors: usize,
    /// Clauses per variable for satisfaction instances.
    pub clause_ratio: f64,
    /// Literals per clause (capped at the variable count).
    pub clause_width: usize,
    /// Numbers are drawn uniformly from `1..=max_number`.
    pub max_number: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extent: 100.0,
            edge_probability: 0.3,
            max_colors: 4,
            clause_ratio: 4.2,
            clause_width: 3,
            max_number: 100,
        }
    }
}

/// Generates an instance of `kind` with `size` elements (at least one).
///
/// # Errors
/// Propagates instance validation failures; none occur for finite settings.
pub fn random_instance<R: Rng>(
    rng: &mut R,
    kind: ProblemKind,
    size: usize,
    cfg: &GeneratorConfig,
) -> Result<Instance, EngineError> {
    let size = size.max(1);
    let problem = match kind {
        ProblemKind::Tour => Problem::Tour(random_tour(rng, size, cfg)?),
        ProblemKind::Coloring => Problem::Coloring(random_coloring(rng, size, cfg)?),
        ProblemKind::Satisfaction => Problem::Satisfaction(random_satisfaction(rng, size, cfg)?),
        ProblemKind::SubsetSelection => {
            Problem::SubsetSelection(random_subset(rng, size, cfg)?)
        }
    };
    Ok(Instance::new(problem))
}

/// `n` cities uniform in the square.
///
/// # Errors
/// Never fails in practice; a non-positive or non-finite extent falls back to 1.
pub fn random_tour<R: Rng>(
    rng: &mut R,
    n: usize,
    cfg: &GeneratorConfig,
) -> Result<TourProblem, EngineError> {
    let extent = if cfg.extent.is_finite() && cfg.extent > 0.0 {
        cfg.extent
    } else {
        1.0
    };
    let cities = (0..n.max(1))
        .map(|_| City::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
        .collect();
    TourProblem::new(cities)
}

/// Erdős–Rényi graph on `n` nodes.
///
/// # Errors
/// Never fails in practice; the adjacency is symmetric by construction.
pub fn random_coloring<R: Rng>(
    rng: &mut R,
    n: usize,
    cfg: &GeneratorConfig,
) -> Result<ColoringProblem, EngineError> {
    let n = n.max(1);
    let p = cfg.edge_probability.clamp(0.0, 1.0);
    let mut adjacency = vec![Vec::new(); n];
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random_bool(p) {
                adjacency[u].push(v);
                adjacency[v].push(u);
            }
        }
    }
    ColoringProblem::new(adjacency, cfg.max_colors.max(1))
}

/// Random CNF with `⌈ratio·n⌉` clauses of distinct variables and random polarity.
///
/// # Errors
/// Never fails in practice; literals are drawn from `1..=n`.
pub fn random_satisfaction<R: Rng>(
    rng: &mut R,
    n: usize,
    cfg: &GeneratorConfig,
) -> Result<SatisfactionProblem, EngineError> {
    let n = n.max(1);
    let width = cfg.clause_width.clamp(1, n);
    let clause_count = (cfg.clause_ratio.max(0.0) * n as f64).ceil() as usize;
    let clauses = (0..clause_count)
        .map(|_| {
            sample(&mut *rng, n, width)
                .into_iter()
                .map(|v| {
                    let lit = (v + 1) as i32;
                    if rng.random_bool(0.5) {
                        lit
                    } else {
                        -lit
                    }
                })
                .collect()
        })
        .collect();
    SatisfactionProblem::new(n, clauses)
}

/// `n` numbers in `1..=max_number`; the target is the sum of a random half-subset.
///
/// # Errors
/// Never fails in practice; at least one number is drawn.
pub fn random_subset<R: Rng>(
    rng: &mut R,
    n: usize,
    cfg: &GeneratorConfig,
) -> Result<SubsetProblem, EngineError> {
    let max = cfg.max_number.max(1);
    let numbers: Vec<u64> = (0..n.max(1)).map(|_| rng.random_range(1..=max)).collect();
    let target = numbers.iter().filter(|_| rng.random_bool(0.5)).sum();
    SubsetProblem::new(numbers, target)
}

// ============================================================================
// Tests
// ============================================================================
