//! Types and data structures for hybrid search.

use serde::{Deserialize, Serialize};

use crate::document::DocumentId;

/// A single fused search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridHit {
    /// Document ID.
    pub doc_id: DocumentId,
    /// Combined hybrid score.
    pub score: f32,
    /// Normalized semantic score, if the document was retrieved by the
    /// vector index.
    pub semantic_score: Option<f32>,
    /// Normalized lexical score, if the document was retrieved by the
    /// lexical index.
    pub lexical_score: Option<f32>,
}

impl HybridHit {
    /// Create a new hybrid hit.
    pub fn new<D: Into<DocumentId>>(doc_id: D, score: f32) -> Self {
        Self {
            doc_id: doc_id.into(),
            score,
            semantic_score: None,
            lexical_score: None,
        }
    }

    /// Set the normalized semantic score.
    pub fn with_semantic_score(mut self, score: f32) -> Self {
        self.semantic_score = Some(score);
        self
    }

    /// Set the normalized lexical score.
    pub fn with_lexical_score(mut self, score: f32) -> Self {
        self.lexical_score = Some(score);
        self
    }
}

/// Collection of fused search results.
///
/// `hits` is sorted by combined score (descending), ties broken by
/// document id (ascending), and truncated to the requested limit. An empty
/// collection is a successful "no matches" outcome; search failure is an
/// error, never an empty result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSearchResults {
    /// List of results, sorted by combined score (descending).
    pub hits: Vec<HybridHit>,
    /// Number of candidates retrieved from the vector index.
    pub semantic_matches: usize,
    /// Number of candidates retrieved from the lexical index.
    pub lexical_matches: usize,
    /// Whether the semantic signal was dropped because its backend failed.
    pub semantic_degraded: bool,
    /// Whether the lexical signal was dropped because its backend failed.
    pub lexical_degraded: bool,
    /// Query processing time in milliseconds.
    pub query_time_ms: u64,
    /// Query text used for search.
    pub query_text: String,
}

impl HybridSearchResults {
    /// Create new empty hybrid search results.
    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            semantic_matches: 0,
            lexical_matches: 0,
            semantic_degraded: false,
            lexical_degraded: false,
            query_time_ms: 0,
            query_text: String::new(),
        }
    }

    /// Get the number of results.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Check if results are empty.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Get the best result.
    pub fn best_hit(&self) -> Option<&HybridHit> {
        self.hits.first()
    }

    /// The fused, ordered document ids.
    pub fn doc_ids(&self) -> Vec<DocumentId> {
        self.hits.iter().map(|hit| hit.doc_id.clone()).collect()
    }

    /// Whether either retrieval signal was dropped during this search.
    pub fn is_degraded(&self) -> bool {
        self.semantic_degraded || self.lexical_degraded
    }
}
