//! Error taxonomy for the engine.
//!
//! Only construction and dispatch problems are errors. A solution that fails
//! verification is reported through [`SolveResult::valid`](crate::engine::SolveResult).

use thiserror::Error;

/// Fatal conditions surfaced to the caller. Nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A problem kind name matched no strategy.
    #[error("unsupported problem kind: {0:?}")]
    UnsupportedKind(String),
    /// The candidate space must have at least one dimension.
    #[error("invalid dimension count {0} (expected > 0)")]
    InvalidDimension(usize),
    /// An instance payload failed validation at construction.
    #[error("invalid {kind} instance: {reason}")]
    InvalidInstance {
        /// Kind of the rejected instance.
        kind: &'static str,
        /// What was wrong with the payload.
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn invalid(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInstance {
            kind,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let e = EngineError::UnsupportedKind("knapsack".into());
        assert!(e.to_string().contains("knapsack"));

        let e = EngineError::InvalidDimension(0);
        assert!(e.to_string().contains('0'));

        let e = EngineError::invalid("tour", "no cities");
        assert_eq!(e.to_string(), "invalid tour instance: no cities");
    }
}
