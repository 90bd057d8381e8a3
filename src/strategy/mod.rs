//! Problem-specific heuristics mapping ranked projections to a solution.
//!
//! Each strategy is a fixed rule per problem kind. Evidence coordinates are
//! read through [`Projection::coordinate`], so patterns with fewer than three
//! pairs (or an empty evidence list) are handled uniformly.

pub mod coloring;
pub mod satisfaction;
pub mod subset;
pub mod tour;

use crate::frac;
use crate::instance::{Instance, Problem, ProblemKind};
use crate::projection::Projection;
use serde::Serialize;

/// A candidate solution; the variant always matches the instance kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Solution {
    /// Visiting order and closed-tour length.
    Tour {
        /// City indices in visiting order.
        order: Vec<usize>,
        /// Euclidean length of the closed tour.
        distance: f64,
    },
    /// One color per node.
    Coloring {
        /// `colors[node]`.
        colors: Vec<usize>,
        /// Number of distinct colors used.
        colors_used: usize,
    },
    /// One truth value per variable.
    Satisfaction {
        /// `assignment[var - 1]`.
        assignment: Vec<bool>,
        /// Number of clauses the assignment satisfies.
        satisfied_clauses: usize,
    },
    /// Selected element indices and their sum.
    SubsetSelection {
        /// Ascending indices into the number list.
        selected: Vec<usize>,
        /// Sum of the selected numbers.
        sum: u64,
        /// `|sum − target|`.
        difference: u64,
    },
}

impl Solution {
    /// Kind tag of this solution.
    pub fn kind(&self) -> ProblemKind {
        match self {
            Self::Tour { .. } => ProblemKind::Tour,
            Self::Coloring { .. } => ProblemKind::Coloring,
            Self::Satisfaction { .. } => ProblemKind::Satisfaction,
            Self::SubsetSelection { .. } => ProblemKind::SubsetSelection,
        }
    }
}

/// Runs the strategy matching the instance kind.
pub fn solve_with_evidence(instance: &Instance, evidence: &[Projection]) -> Solution {
    match instance.problem() {
        Problem::Tour(p) => tour::solve(p, evidence),
        Problem::Coloring(p) => coloring::solve(p, evidence),
        Problem::Satisfaction(p) => satisfaction::solve(p, evidence),
        Problem::SubsetSelection(p) => subset::solve(p, evidence),
    }
}

/// `Σ_proj frac(c0·x + c1·y)`: the shared scoring kernel of the strategies.
#[inline]
pub(crate) fn evidence_score(evidence: &[Projection], x: f64, y: f64) -> f64 {
    evidence
        .iter()
        .map(|p| frac(p.coordinate(0) * x + p.coordinate(1) * y))
        .sum()
}

// ============================================================================
// Tests
// ============================================================================
