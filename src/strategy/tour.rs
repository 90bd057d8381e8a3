//! Tour ordering by projected score.

use super::{evidence_score, Solution};
use crate::instance::{City, TourProblem};
use crate::projection::Projection;

/// Scores each city, sorts ascending (stable) and reports the closed-tour length.
pub fn solve(problem: &TourProblem, evidence: &[Projection]) -> Solution {
    let cities = problem.cities();
    let scores: Vec<f64> = (0..cities.len())
        .map(|c| evidence_score(evidence, (c + 1) as f64, c as f64))
        .collect();

    let mut order: Vec<usize> = (0..cities.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let distance = tour_length(cities, &order);
    Solution::Tour { order, distance }
}

/// Closed-tour Euclidean length of `order` over `cities`.
pub fn tour_length(cities: &[City], order: &[usize]) -> f64 {
    if order.len() < 2 {
        return 0.0;
    }
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(&a, &b)| cities[a].distance_to(&cities[b]))
        .sum()
}

// ============================================================================
// Tests
// ============================================================================
