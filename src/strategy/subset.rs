//! Subset selection with a single-pass flip refinement.

use super::Solution;
use crate::frac;
use crate::instance::SubsetProblem;
use crate::projection::Projection;

/// Relative tolerance on `|sum − target|` for a subset to count as a hit.
pub const TARGET_TOLERANCE: f64 = 0.001;

/// True iff `difference` is within tolerance of `target`.
///
/// An exact hit always qualifies, which covers `target == 0`.
#[inline]
pub fn within_tolerance(difference: u64, target: u64) -> bool {
    difference == 0 || (difference as f64) < TARGET_TOLERANCE * target as f64
}

/// Picks elements by comparing include/exclude evidence, then refines.
pub fn solve(problem: &SubsetProblem, evidence: &[Projection]) -> Solution {
    let numbers = problem.numbers();
    let target = problem.target();

    let mut members: Vec<bool> = numbers
        .iter()
        .map(|&x| {
            let x = x as f64;
            let include: f64 = evidence.iter().map(|p| frac(p.coordinate(0) * x)).sum();
            let exclude: f64 = evidence.iter().map(|p| frac(p.coordinate(1) * x)).sum();
            include < exclude
        })
        .collect();

    let mut sum = subset_sum(numbers, &members);
    if !within_tolerance(sum.abs_diff(target), target) {
        sum = refine(numbers, target, &mut members, sum);
    }

    let selected: Vec<usize> = members
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| m.then_some(i))
        .collect();
    Solution::SubsetSelection {
        selected,
        sum,
        difference: sum.abs_diff(target),
    }
}

/// One left-to-right pass: each membership is flipped at most once, and a
/// flip is kept only if it strictly shrinks `|sum − target|` for the subset
/// as it stands at that point. Returns the refined sum; the difference never grows.
///
/// `sum` must be the sum of the selected `numbers`, and the whole list must fit
/// in `u64`, as [`SubsetProblem::new`] guarantees.
pub fn refine(numbers: &[u64], target: u64, members: &mut [bool], mut sum: u64) -> u64 {
    for (i, &x) in numbers.iter().enumerate() {
        let flipped = if members[i] {
            sum - x
        } else {
            sum + x
        };
        if flipped.abs_diff(target) < sum.abs_diff(target) {
            members[i] = !members[i];
            sum = flipped;
        }
    }
    sum
}

fn subset_sum(numbers: &[u64], members: &[bool]) -> u64 {
    numbers
        .iter()
        .zip(members)
        .filter(|&(_, &m)| m)
        .map(|(&x, _)| x)
        .sum()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn parts(s: Solution) -> (Vec<usize>, u64, u64) {
        match s {
            Solution::SubsetSelection {
                selected,
                sum,
                difference,
            } => (selected, sum, difference),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn zero_target_converges_to_empty_subset() {
        let p = SubsetProblem::new(vec![1, 2, 3, 4, 5], 0).unwrap();
        let evidence = vec![Projection {
            coordinates: vec![0.1, 0.9],
            value: 1.0,
        }];
        for ev in [vec![], evidence] {
            let (selected, sum, difference) = parts(solve(&p, &ev));
            assert!(selected.is_empty());
            assert_eq!(sum, 0);
            assert_eq!(difference, 0);
        }
    }

    #[test]
    fn refinement_walks_toward_target() {
        let numbers = [5, 3, 8];
        let mut members = [false; 3];
        // 0 -> 5 (diff 6) -> 8 (diff 3) -> 16 would be diff 5, rejected.
        let sum = refine(&numbers, 11, &mut members, 0);
        assert_eq!(sum, 8);
        assert_eq!(members, [true, true, false]);
    }

    #[test]
    fn refinement_never_increases_difference() {
        let mut rng = XorShiftRng::seed_from_u64(0x5AB5E7);
        for _ in 0..500 {
            let n = rng.random_range(1..30);
            let numbers: Vec<u64> = (0..n).map(|_| rng.random_range(1..=100)).collect();
            let target = rng.random_range(0..=numbers.iter().sum::<u64>());
            let mut members: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();
            let before = subset_sum(&numbers, &members);
            let after = refine(&numbers, target, &mut members, before);
            assert!(after.abs_diff(target) <= before.abs_diff(target));
            assert_eq!(after, subset_sum(&numbers, &members));
        }
    }

    #[test]
    fn tolerance_is_strict_except_for_exact_hits() {
        assert!(within_tolerance(0, 0));
        assert!(!within_tolerance(1, 0));
        assert!(within_tolerance(0, 1000));
        assert!(!within_tolerance(1, 1000));
        assert!(within_tolerance(1, 1001));
    }

    #[test]
    fn reported_sum_matches_selection() {
        let p = SubsetProblem::new(vec![7, 11, 13, 17, 19, 23], 40).unwrap();
        let evidence = vec![Projection {
            coordinates: vec![0.37, 0.61],
            value: 1.0,
        }];
        let (selected, sum, difference) = parts(solve(&p, &evidence));
        let recomputed: u64 = selected.iter().map(|&i| p.numbers()[i]).sum();
        assert_eq!(sum, recomputed);
        assert_eq!(difference, sum.abs_diff(40));
    }

    #[test]
    fn sums_near_u64_max_stay_exact() {
        let half = u64::MAX / 2;
        let p = SubsetProblem::new(vec![half, half, 1], u64::MAX).unwrap();
        let evidence = vec![Projection {
            coordinates: vec![0.9, 0.1],
            value: 1.0,
        }];
        for ev in [vec![], evidence] {
            let (selected, sum, difference) = parts(solve(&p, &ev));
            let recomputed: u64 = selected.iter().map(|&i| p.numbers()[i]).sum();
            assert_eq!(sum, recomputed);
            assert_eq!(difference, u64::MAX - sum);
            assert_eq!(sum, u64::MAX);
        }
    }
}
