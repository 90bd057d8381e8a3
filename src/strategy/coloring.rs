//! Greedy coloring steered by projected scores.

use super::{evidence_score, Solution};
use crate::instance::ColoringProblem;
use crate::projection::Projection;

/// Penalty per already-colored neighbor that uses the candidate color.
pub const CONFLICT_PENALTY: f64 = 100.0;

/// Colors nodes in index order, each with its minimum-score color.
///
/// Ties go to the lowest color index.
pub fn solve(problem: &ColoringProblem, evidence: &[Projection]) -> Solution {
    let n = problem.node_count();
    let k = problem.max_colors();
    let mut colors: Vec<Option<usize>> = vec![None; n];
    let mut scores = vec![0.0f64; k];

    for node in 0..n {
        for (color, score) in scores.iter_mut().enumerate() {
            *score = evidence_score(evidence, node as f64, color as f64);
        }
        for &neighbor in problem.neighbors(node) {
            if let Some(c) = colors[neighbor] {
                scores[c] += CONFLICT_PENALTY;
            }
        }

        let mut best = 0;
        for color in 1..k {
            if scores[color] < scores[best] {
                best = color;
            }
        }
        colors[node] = Some(best);
    }

    let colors: Vec<usize> = colors.into_iter().map(|c| c.unwrap_or(0)).collect();
    let colors_used = count_distinct(&colors, k);
    Solution::Coloring {
        colors,
        colors_used,
    }
}

fn count_distinct(colors: &[usize], max_colors: usize) -> usize {
    let mut seen = vec![false; max_colors];
    for &c in colors {
        if let Some(slot) = seen.get_mut(c) {
            *slot = true;
        }
    }
    seen.into_iter().filter(|&s| s).count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn colors_of(s: Solution) -> Vec<usize> {
        match s {
            Solution::Coloring { colors, .. } => colors,
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn path_is_two_colored_without_evidence() {
        let p = ColoringProblem::from_edges(4, &[(0, 1), (1, 2), (2, 3)], 3).unwrap();
        assert_eq!(colors_of(solve(&p, &[])), vec![0, 1, 0, 1]);
    }

    #[test]
    fn triangle_gets_three_colors() {
        let p = ColoringProblem::from_edges(3, &[(0, 1), (1, 2), (0, 2)], 3).unwrap();
        let s = solve(&p, &[]);
        let Solution::Coloring { colors, colors_used } = s else {
            panic!("wrong variant");
        };
        assert_eq!(colors_used, 3);
        for (u, v) in p.edges() {
            assert_ne!(colors[u], colors[v]);
        }
    }

    #[test]
    fn conflicts_are_unavoidable_when_budget_is_short() {
        // Triangle with two colors: greedy must reuse a color on an edge.
        let p = ColoringProblem::from_edges(3, &[(0, 1), (1, 2), (0, 2)], 2).unwrap();
        let colors = colors_of(solve(&p, &[]));
        assert!(colors.iter().all(|&c| c < 2));
        assert!(p.edges().any(|(u, v)| colors[u] == colors[v]));
    }

    #[test]
    fn evidence_can_shift_the_first_choice() {
        // Node 0: score(color) = frac(0.7 * color) -> 0, 0.7, 0.4: color 0 wins.
        // Node 1 (isolated): frac(0.5 + 0.7 * color) -> 0.5, 0.2, 0.9: color 1 wins.
        let p = ColoringProblem::from_edges(2, &[], 3).unwrap();
        let evidence = vec![Projection {
            coordinates: vec![0.5, 0.7],
            value: 1.0,
        }];
        assert_eq!(colors_of(solve(&p, &evidence)), vec![0, 1]);
    }
}
