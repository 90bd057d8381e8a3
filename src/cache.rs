//! Pattern cache keyed by problem signature with approximate size matching.
//!
//! Entries are never evicted; the cache grows with every distinct signature
//! an engine sees.

use crate::instance::ProblemKind;
use crate::projection::CorrelationPattern;
use std::collections::BTreeMap;

/// Default relative size tolerance for reuse.
pub const DEFAULT_SIZE_TOLERANCE: f64 = 0.2;

/// Exact key a pattern is stored under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature {
    /// Problem kind.
    pub kind: ProblemKind,
    /// Dimension count of the candidate space.
    pub dimensions: usize,
    /// Instance size the pattern was computed for.
    pub size: usize,
}

/// True iff a pattern stored for `cached` may serve a request for `requested`:
/// same kind and dimension count, and `|cached.size − requested.size| / requested.size < tolerance`.
pub fn is_reusable(cached: &Signature, requested: &Signature, tolerance: f64) -> bool {
    if cached.kind != requested.kind || cached.dimensions != requested.dimensions {
        return false;
    }
    if requested.size == 0 {
        return cached.size == 0;
    }
    let diff = cached.size.abs_diff(requested.size) as f64;
    diff / (requested.size as f64) < tolerance
}

/// Signature-keyed pattern store.
#[derive(Clone, Debug)]
pub struct PatternCache {
    entries: BTreeMap<Signature, CorrelationPattern>,
    tolerance: f64,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE_TOLERANCE)
    }
}

impl PatternCache {
    /// Creates an empty cache with the given relative size tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self {
            entries: BTreeMap::new(),
            tolerance,
        }
    }

    /// Number of stored patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds a reusable pattern for `requested`.
    ///
    /// Among several reusable entries the closest stored size wins; ties go
    /// to the smaller size.
    pub fn lookup(&self, requested: &Signature) -> Option<&CorrelationPattern> {
        let lo = Signature {
            size: 0,
            ..*requested
        };
        let hi = Signature {
            size: usize::MAX,
            ..*requested
        };
        self.entries
            .range(lo..=hi)
            .filter(|(key, _)| is_reusable(key, requested, self.tolerance))
            .min_by_key(|(key, _)| key.size.abs_diff(requested.size))
            .map(|(_, pattern)| pattern)
    }

    /// Stores `pattern` under `signature`, replacing an exact-key entry.
    pub fn insert(&mut self, signature: Signature, pattern: CorrelationPattern) {
        self.entries.insert(signature, pattern);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::DimensionPair;

    fn sig(kind: ProblemKind, size: usize) -> Signature {
        Signature {
            kind,
            dimensions: 11,
            size,
        }
    }

    fn pattern(tag: f64) -> CorrelationPattern {
        CorrelationPattern {
            pairs: vec![DimensionPair {
                a: 0,
                b: 1,
                correlation: tag,
            }],
            projections: vec![],
        }
    }

    #[test]
    fn predicate_is_strict_at_tolerance() {
        let cached = sig(ProblemKind::Tour, 120);
        // |120 - 100| / 100 = 0.2 -> not reusable.
        assert!(!is_reusable(&cached, &sig(ProblemKind::Tour, 100), 0.2));
        // |120 - 101| / 101 < 0.2
        assert!(is_reusable(&cached, &sig(ProblemKind::Tour, 101), 0.2));
        assert!(is_reusable(&cached, &sig(ProblemKind::Tour, 120), 0.2));
    }

    #[test]
    fn predicate_divides_by_requested_size() {
        let cached = sig(ProblemKind::Tour, 80);
        // |80 - 100| / 100 = 0.2 -> not reusable.
        assert!(!is_reusable(&cached, &sig(ProblemKind::Tour, 100), 0.2));
        // |80 - 99| / 99 = 0.19..
        assert!(is_reusable(&cached, &sig(ProblemKind::Tour, 99), 0.2));
    }

    #[test]
    fn predicate_requires_matching_kind_and_dimensions() {
        let cached = sig(ProblemKind::Tour, 100);
        assert!(!is_reusable(&cached, &sig(ProblemKind::Coloring, 100), 0.2));
        let wider = Signature {
            dimensions: 12,
            ..cached
        };
        assert!(!is_reusable(&wider, &cached, 0.2));
    }

    #[test]
    fn lookup_prefers_closest_size() {
        let mut cache = PatternCache::default();
        cache.insert(sig(ProblemKind::Tour, 90), pattern(0.1));
        cache.insert(sig(ProblemKind::Tour, 104), pattern(0.2));
        cache.insert(sig(ProblemKind::Coloring, 100), pattern(0.3));

        let hit = cache.lookup(&sig(ProblemKind::Tour, 100)).unwrap();
        assert_eq!(hit.pairs[0].correlation, 0.2);
        assert!(cache.lookup(&sig(ProblemKind::Satisfaction, 100)).is_none());
        assert!(cache.lookup(&sig(ProblemKind::Tour, 200)).is_none());
    }

    #[test]
    fn insert_overwrites_exact_key_only() {
        let mut cache = PatternCache::default();
        cache.insert(sig(ProblemKind::Tour, 50), pattern(0.1));
        cache.insert(sig(ProblemKind::Tour, 50), pattern(0.4));
        cache.insert(sig(ProblemKind::Tour, 55), pattern(0.5));
        assert_eq!(cache.len(), 2);
        let exact = cache.lookup(&sig(ProblemKind::Tour, 50)).unwrap();
        assert_eq!(exact.pairs[0].correlation, 0.4);
    }
}
