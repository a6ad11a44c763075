//! Score normalization for hybrid search.
//!
//! The two retrieval signals report raw scores on unrelated scales: the
//! vector index reports distances, the lexical index reports BM25-style
//! ranks. Both are costs (smaller is better). Before fusion, each candidate
//! set is rescaled independently onto [0, 1] with larger meaning better, so
//! a weighted combination of the two is meaningful.

use std::collections::HashMap;

use crate::document::DocumentId;

/// Min-max score normalizer.
///
/// A pure linear rescale based on the set's own minimum and maximum, not a
/// statistical normalization; a single outlier compresses the rest of the
/// set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreNormalizer;

impl ScoreNormalizer {
    /// Create a new score normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Rescale a raw candidate set onto [0, 1], higher = better.
    ///
    /// Raw values are costs (distance or rank, smaller is better), so the
    /// rescale is inverted: the best raw value maps to 1.0 and the worst to
    /// 0.0. Two degenerate cases:
    ///
    /// - an empty set normalizes to an empty map;
    /// - a set where every raw value is identical normalizes to exactly 0.5
    ///   for every member, so tied candidates contribute a neutral score to
    ///   the weighted combination, not a perfect one.
    pub fn normalize(&self, raw: &[(DocumentId, f32)]) -> HashMap<DocumentId, f32> {
        if raw.is_empty() {
            return HashMap::new();
        }

        let lo = raw.iter().fold(f32::INFINITY, |a, (_, v)| a.min(*v));
        let hi = raw.iter().fold(f32::NEG_INFINITY, |a, (_, v)| a.max(*v));
        let range = hi - lo;

        let mut normalized = HashMap::with_capacity(raw.len());
        for (doc_id, value) in raw {
            let score = if range > 0.0 { (hi - value) / range } else { 0.5 };
            normalized.insert(doc_id.clone(), score);
        }

        normalized
    }
}
