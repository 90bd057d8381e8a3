//! Per-variable truth assignment from clause bias plus projected leaning.

use super::{evidence_score, Solution};
use crate::instance::SatisfactionProblem;
use crate::projection::Projection;

/// Bias granted to a polarity for each clause it would satisfy.
pub const CLAUSE_BIAS: f64 = 0.1;

/// Assigns each variable in order.
///
/// The projected leaning of each polarity is the mean evidence score scaled
/// into `[0, CLAUSE_BIAS)`, so it only breaks ties between equally biased
/// polarities. `true` is chosen iff its score is strictly lower.
pub fn solve(problem: &SatisfactionProblem, evidence: &[Projection]) -> Solution {
    let n = problem.variables();
    let (mut positive, mut negative) = (vec![0usize; n], vec![0usize; n]);
    for clause in problem.clauses() {
        for (i, &lit) in clause.iter().enumerate() {
            // A repeated literal counts once per clause.
            if clause[..i].contains(&lit) {
                continue;
            }
            let var = lit.unsigned_abs() as usize - 1;
            if lit > 0 {
                positive[var] += 1;
            } else {
                negative[var] += 1;
            }
        }
    }

    let scale = if evidence.is_empty() {
        0.0
    } else {
        CLAUSE_BIAS / evidence.len() as f64
    };
    let assignment: Vec<bool> = (0..n)
        .map(|var| {
            let x = (var + 1) as f64;
            let true_score = evidence_score(evidence, x, 1.0) * scale
                - CLAUSE_BIAS * positive[var] as f64;
            let false_score = evidence_score(evidence, x, 0.0) * scale
                - CLAUSE_BIAS * negative[var] as f64;
            true_score < false_score
        })
        .collect();

    let satisfied_clauses = count_satisfied(problem.clauses(), &assignment);
    Solution::Satisfaction {
        assignment,
        satisfied_clauses,
    }
}

/// True iff some literal of `clause` agrees with `assignment`.
#[inline]
pub fn clause_satisfied(clause: &[i32], assignment: &[bool]) -> bool {
    clause.iter().any(|&lit| {
        let var = lit.unsigned_abs() as usize - 1;
        assignment.get(var).is_some_and(|&value| value == (lit > 0))
    })
}

/// Number of clauses satisfied by `assignment`.
pub fn count_satisfied(clauses: &[Vec<i32>], assignment: &[bool]) -> usize {
    clauses
        .iter()
        .filter(|c| clause_satisfied(c, assignment))
        .count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment_of(s: Solution) -> (Vec<bool>, usize) {
        match s {
            Solution::Satisfaction {
                assignment,
                satisfied_clauses,
            } => (assignment, satisfied_clauses),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    fn noisy_evidence() -> Vec<Projection> {
        vec![
            Projection {
                coordinates: vec![0.93, 0.71, 0.2],
                value: 2.0,
            },
            Projection {
                coordinates: vec![0.11, 0.87],
                value: 1.0,
            },
        ]
    }

    #[test]
    fn unit_clause_is_always_satisfied() {
        let p = SatisfactionProblem::new(1, vec![vec![1]]).unwrap();
        for evidence in [vec![], noisy_evidence()] {
            let (assignment, satisfied) = assignment_of(solve(&p, &evidence));
            assert_eq!(assignment, vec![true]);
            assert_eq!(satisfied, 1);
        }
    }

    #[test]
    fn negative_unit_clause_gets_false() {
        let p = SatisfactionProblem::new(2, vec![vec![-1], vec![-2]]).unwrap();
        let (assignment, satisfied) = assignment_of(solve(&p, &noisy_evidence()));
        assert_eq!(assignment, vec![false, false]);
        assert_eq!(satisfied, 2);
    }

    #[test]
    fn majority_polarity_wins() {
        let p = SatisfactionProblem::new(1, vec![vec![1], vec![-1], vec![-1]]).unwrap();
        let (assignment, satisfied) = assignment_of(solve(&p, &noisy_evidence()));
        assert_eq!(assignment, vec![false]);
        assert_eq!(satisfied, 2);
    }

    #[test]
    fn repeated_literal_biases_its_clause_once() {
        let p = SatisfactionProblem::new(1, vec![vec![1, 1, 1], vec![-1], vec![-1]]).unwrap();
        for evidence in [vec![], noisy_evidence()] {
            let (assignment, satisfied) = assignment_of(solve(&p, &evidence));
            assert_eq!(assignment, vec![false]);
            assert_eq!(satisfied, 2);
        }
    }

    #[test]
    fn unconstrained_variable_without_evidence_is_false() {
        // Equal scores -> not strictly less -> false.
        let p = SatisfactionProblem::new(2, vec![vec![1]]).unwrap();
        let (assignment, _) = assignment_of(solve(&p, &[]));
        assert_eq!(assignment, vec![true, false]);
    }

    #[test]
    fn clause_check_matches_literal_polarity() {
        assert!(clause_satisfied(&[1, -2], &[true, true]));
        assert!(clause_satisfied(&[1, -2], &[false, false]));
        assert!(!clause_satisfied(&[1, -2], &[false, true]));
        assert_eq!(count_satisfied(&[vec![1], vec![-1]], &[true]), 1);
    }
}
