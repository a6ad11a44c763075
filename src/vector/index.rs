//! Vector index client boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::DocumentId;
use crate::error::Result;
use crate::vector::Vector;

/// A single candidate returned by a vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    /// Document ID.
    pub doc_id: DocumentId,
    /// Distance between the query vector and the document embedding.
    /// Non-negative; smaller means more similar.
    pub distance: f32,
}

impl VectorHit {
    /// Create a new vector hit.
    pub fn new<D: Into<DocumentId>>(doc_id: D, distance: f32) -> Self {
        Self {
            doc_id: doc_id.into(),
            distance,
        }
    }
}

/// Client interface to an approximate-nearest-neighbor vector index.
///
/// Implementations wrap whatever backend actually stores the document
/// embeddings (an embedded extension, a remote service, a test double).
/// The fusion ranker treats the index as an opaque ranker: it only relies
/// on the distance contract, never on result order.
///
/// # Contract
///
/// - `query` returns at most `k` hits; fewer (including zero) is a normal
///   outcome, not an error.
/// - Transport or backend failures surface as
///   [`KingfisherError::IndexUnavailable`] with
///   [`SearchSignal::Semantic`]. The caller degrades to lexical-only
///   ranking rather than aborting.
/// - The query vector's dimension equals [`VectorIndex::dimension`];
///   the caller checks this before querying.
///
/// [`KingfisherError::IndexUnavailable`]: crate::error::KingfisherError::IndexUnavailable
/// [`SearchSignal::Semantic`]: crate::error::SearchSignal::Semantic
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `k` nearest candidates for the query vector.
    async fn query(&self, vector: &Vector, k: usize) -> Result<Vec<VectorHit>>;

    /// The dimension this index was built with.
    fn dimension(&self) -> usize;

    /// Get the name/identifier of this index backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_hit_creation() {
        let hit = VectorHit::new("doc-1", 0.25);
        assert_eq!(hit.doc_id.as_str(), "doc-1");
        assert_eq!(hit.distance, 0.25);
    }
}
