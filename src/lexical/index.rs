//! Lexical index client boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::DocumentId;
use crate::error::Result;

/// A single candidate returned by a lexical index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalHit {
    /// Document ID.
    pub doc_id: DocumentId,
    /// Full-text relevance rank. Smaller means more relevant, consistent
    /// with BM25-style ranking where the raw statistic is a cost.
    pub rank: f32,
}

impl LexicalHit {
    /// Create a new lexical hit.
    pub fn new<D: Into<DocumentId>>(doc_id: D, rank: f32) -> Self {
        Self {
            doc_id: doc_id.into(),
            rank,
        }
    }
}

/// Client interface to a full-text index.
///
/// # Contract
///
/// - `query` returns at most `k` hits ranked by term relevance; fewer
///   (including zero) is a normal outcome, not an error.
/// - Transport or backend failures surface as
///   [`KingfisherError::IndexUnavailable`] with
///   [`SearchSignal::Lexical`]. The caller degrades to semantic-only
///   ranking rather than aborting.
///
/// [`KingfisherError::IndexUnavailable`]: crate::error::KingfisherError::IndexUnavailable
/// [`SearchSignal::Lexical`]: crate::error::SearchSignal::Lexical
#[async_trait]
pub trait LexicalIndex: Send + Sync {
    /// Return up to `k` candidates matching the query text.
    async fn query(&self, text: &str, k: usize) -> Result<Vec<LexicalHit>>;

    /// Get the name/identifier of this index backend.
    fn name(&self) -> &str {
        "unknown"
    }
}
