//! Feasibility checks for produced solutions.
//!
//! A failed check is a result, not an error: the engine reports it through the
//! validity flag and still returns the solution.

use crate::instance::{
    ColoringProblem, Instance, Problem, SatisfactionProblem, SubsetProblem, TourProblem,
};
use crate::strategy::satisfaction::clause_satisfied;
use crate::strategy::subset::within_tolerance;
use crate::strategy::Solution;

// ============================================================================
// Public API
// ============================================================================

/// Returns `true` iff `solution` is feasible for `instance`.
pub fn is_valid(instance: &Instance, solution: &Solution) -> bool {
    check(instance, solution).is_ok()
}

/// Checks `solution` against `instance`.
///
/// # Errors
/// Returns a message naming the first violated constraint, or a kind mismatch.
pub fn check(instance: &Instance, solution: &Solution) -> Result<(), String> {
    match (instance.problem(), solution) {
        (Problem::Tour(p), Solution::Tour { order, .. }) => check_tour(p, order),
        (Problem::Coloring(p), Solution::Coloring { colors, .. }) => check_coloring(p, colors),
        (Problem::Satisfaction(p), Solution::Satisfaction { assignment, .. }) => {
            check_satisfaction(p, assignment)
        }
        (Problem::SubsetSelection(p), Solution::SubsetSelection { selected, .. }) => {
            check_subset(p, selected)
        }
        _ => Err(format!(
            "solution kind {} does not match instance kind {}",
            solution.kind(),
            instance.kind()
        )),
    }
}

// ============================================================================
// Internal
// ============================================================================

fn check_tour(problem: &TourProblem, order: &[usize]) -> Result<(), String> {
    let n = problem.cities().len();
    if order.len() != n {
        return Err(format!("tour visits {} cities (expected {n})", order.len()));
    }
    let mut seen = vec![false; n];
    for &c in order {
        if c >= n {
            return Err(format!("tour visits out-of-range city {c}"));
        }
        if seen[c] {
            return Err(format!("tour visits city {c} twice"));
        }
        seen[c] = true;
    }
    Ok(())
}

fn check_coloring(problem: &ColoringProblem, colors: &[usize]) -> Result<(), String> {
    if colors.len() != problem.node_count() {
        return Err(format!(
            "coloring covers {} nodes (expected {})",
            colors.len(),
            problem.node_count()
        ));
    }
    if let Some(max) = colors.iter().copied().max() {
        if max >= problem.max_colors() {
            return Err(format!(
                "color {max} exceeds budget of {}",
                problem.max_colors()
            ));
        }
    }
    if let Some((u, v)) = problem.edges().find(|&(u, v)| colors[u] == colors[v]) {
        return Err(format!("adjacent nodes {u} and {v} share color {}", colors[u]));
    }
    Ok(())
}

fn check_satisfaction(problem: &SatisfactionProblem, assignment: &[bool]) -> Result<(), String> {
    if assignment.len() != problem.variables() {
        return Err(format!(
            "assignment covers {} variables (expected {})",
            assignment.len(),
            problem.variables()
        ));
    }
    match problem
        .clauses()
        .iter()
        .position(|c| !clause_satisfied(c, assignment))
    {
        Some(i) => Err(format!("clause {i} is unsatisfied")),
        None => Ok(()),
    }
}

fn check_subset(problem: &SubsetProblem, selected: &[usize]) -> Result<(), String> {
    let numbers = problem.numbers();
    let mut seen = vec![false; numbers.len()];
    let mut sum = 0u64;
    for &i in selected {
        if i >= numbers.len() {
            return Err(format!("selected index {i} is out of range"));
        }
        if seen[i] {
            return Err(format!("index {i} selected twice"));
        }
        seen[i] = true;
        sum = sum.saturating_add(numbers[i]);
    }
    let difference = sum.abs_diff(problem.target());
    if !within_tolerance(difference, problem.target()) {
        return Err(format!(
            "sum {sum} misses target {} by {difference}",
            problem.target()
        ));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
