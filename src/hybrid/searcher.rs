//! Hybrid searcher implementation.
//!
//! This module provides the `HybridSearcher` that fuses candidates from a
//! vector index and a lexical index into a single ranked result list. It
//! owns the whole per-query flow: parameter validation, query embedding,
//! concurrent index retrieval, score normalization, weighted fusion, and
//! deterministic ordering.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::document::DocumentId;
use crate::embedding::TextEmbedder;
use crate::error::{KingfisherError, Result, SearchSignal};
use crate::hybrid::config::HybridSearchConfig;
use crate::hybrid::scorer::ScoreNormalizer;
use crate::hybrid::types::{HybridHit, HybridSearchResults};
use crate::lexical::{LexicalHit, LexicalIndex};
use crate::vector::{Vector, VectorHit, VectorIndex};

/// A hybrid search request.
///
/// Carries the query text plus optional per-call overrides; anything left
/// unset falls back to the searcher's [`HybridSearchConfig`].
///
/// # Examples
///
/// ```
/// use kingfisher::hybrid::searcher::HybridSearchRequest;
///
/// let request = HybridSearchRequest::new("cooperative deck builder")
///     .semantic_weight(0.5)
///     .limit(10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSearchRequest {
    /// The free-text query.
    pub query: String,
    /// Override for the semantic weight.
    pub semantic_weight: Option<f32>,
    /// Override for the result limit.
    pub limit: Option<usize>,
    /// Override for the vector candidate count.
    pub k_semantic: Option<usize>,
    /// Override for the lexical candidate count.
    pub k_lexical: Option<usize>,
}

impl HybridSearchRequest {
    /// Create a new request for the given query text.
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: query.into(),
            semantic_weight: None,
            limit: None,
            k_semantic: None,
            k_lexical: None,
        }
    }

    /// Set the semantic weight for this request.
    pub fn semantic_weight(mut self, weight: f32) -> Self {
        self.semantic_weight = Some(weight);
        self
    }

    /// Set the result limit for this request.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the vector candidate count for this request.
    pub fn k_semantic(mut self, k: usize) -> Self {
        self.k_semantic = Some(k);
        self
    }

    /// Set the lexical candidate count for this request.
    pub fn k_lexical(mut self, k: usize) -> Self {
        self.k_lexical = Some(k);
        self
    }

    /// Resolve this request against the searcher configuration, validating
    /// the effective parameters.
    fn resolve(&self, config: &HybridSearchConfig) -> Result<HybridSearchConfig> {
        let effective = HybridSearchConfig {
            semantic_weight: self.semantic_weight.unwrap_or(config.semantic_weight),
            limit: self.limit.unwrap_or(config.limit),
            k_semantic: self.k_semantic.unwrap_or(config.k_semantic),
            k_lexical: self.k_lexical.unwrap_or(config.k_lexical),
            embed_timeout: config.embed_timeout,
            index_timeout: config.index_timeout,
        };
        effective.validate()?;
        Ok(effective)
    }
}

/// Hybrid searcher fusing vector and lexical retrieval.
///
/// The searcher holds no per-request state: every search embeds the query,
/// retrieves candidates from both indexes concurrently, and fuses them
/// within the one call. Concurrent searches from multiple callers need no
/// synchronization.
///
/// Failure policy, per signal:
///
/// - embedding failure aborts the search (no semantic candidates are
///   possible without a query vector);
/// - an unavailable or timed-out index degrades the search to the other
///   signal, logged but never escalated into an error;
/// - both signals empty (or both backends down) is a successful empty
///   result, so callers can tell "no matches" apart from "search broken".
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use kingfisher::embedding::TextEmbedder;
/// use kingfisher::hybrid::searcher::{HybridSearchRequest, HybridSearcher};
/// use kingfisher::lexical::LexicalIndex;
/// use kingfisher::vector::VectorIndex;
///
/// # async fn example(
/// #     embedder: Arc<dyn TextEmbedder>,
/// #     vector_index: Arc<dyn VectorIndex>,
/// #     lexical_index: Arc<dyn LexicalIndex>,
/// # ) -> kingfisher::error::Result<()> {
/// let searcher = HybridSearcher::new(embedder, vector_index, lexical_index)?;
///
/// let request = HybridSearchRequest::new("roguelike about bees").limit(10);
/// let results = searcher.search(request).await?;
/// for id in results.doc_ids() {
///     println!("{id}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct HybridSearcher {
    /// Embedder turning query text into a vector.
    embedder: Arc<dyn TextEmbedder>,
    /// Vector index client for semantic retrieval.
    vector_index: Arc<dyn VectorIndex>,
    /// Lexical index client for full-text retrieval.
    lexical_index: Arc<dyn LexicalIndex>,
    /// Search configuration, read-only after construction.
    config: HybridSearchConfig,
    /// Score normalizer applied to each candidate set.
    normalizer: ScoreNormalizer,
}

impl HybridSearcher {
    /// Create a new hybrid searcher with the default configuration.
    pub fn new(
        embedder: Arc<dyn TextEmbedder>,
        vector_index: Arc<dyn VectorIndex>,
        lexical_index: Arc<dyn LexicalIndex>,
    ) -> Result<Self> {
        Self::with_config(
            embedder,
            vector_index,
            lexical_index,
            HybridSearchConfig::default(),
        )
    }

    /// Create a new hybrid searcher with a custom configuration.
    ///
    /// Fails with a configuration error when the embedder's output
    /// dimension does not match the dimension the vector index was built
    /// with.
    pub fn with_config(
        embedder: Arc<dyn TextEmbedder>,
        vector_index: Arc<dyn VectorIndex>,
        lexical_index: Arc<dyn LexicalIndex>,
        config: HybridSearchConfig,
    ) -> Result<Self> {
        config.validate()?;

        if embedder.dimension() != vector_index.dimension() {
            return Err(KingfisherError::invalid_config(format!(
                "embedder dimension {} does not match vector index dimension {}",
                embedder.dimension(),
                vector_index.dimension()
            )));
        }

        Ok(Self {
            embedder,
            vector_index,
            lexical_index,
            config,
            normalizer: ScoreNormalizer::new(),
        })
    }

    /// Get the searcher configuration.
    pub fn config(&self) -> &HybridSearchConfig {
        &self.config
    }

    /// Execute a hybrid search.
    ///
    /// Parameters are validated eagerly; no backend is touched when the
    /// effective weight, limit, or candidate counts are invalid. The two
    /// index queries then run concurrently and are joined before fusion.
    pub async fn search(&self, request: HybridSearchRequest) -> Result<HybridSearchResults> {
        let params = request.resolve(&self.config)?;
        let start = Instant::now();

        let query_vector = self.embed_query(&request.query).await?;

        let (vector_outcome, lexical_outcome) = tokio::join!(
            self.query_vector_index(&query_vector, params.k_semantic),
            self.query_lexical_index(&request.query, params.k_lexical),
        );

        let (vector_hits, semantic_degraded) = Self::recover(SearchSignal::Semantic, vector_outcome);
        let (lexical_hits, lexical_degraded) = Self::recover(SearchSignal::Lexical, lexical_outcome);

        let semantic_matches = vector_hits.len();
        let lexical_matches = lexical_hits.len();

        let semantic_raw: Vec<(DocumentId, f32)> = vector_hits
            .into_iter()
            .map(|hit| (hit.doc_id, hit.distance))
            .collect();
        let lexical_raw: Vec<(DocumentId, f32)> = lexical_hits
            .into_iter()
            .map(|hit| (hit.doc_id, hit.rank))
            .collect();

        let semantic_scores = self.normalizer.normalize(&semantic_raw);
        let lexical_scores = self.normalizer.normalize(&lexical_raw);

        let lexical_weight = 1.0 - params.semantic_weight;

        let mut union: HashSet<&DocumentId> = semantic_scores.keys().collect();
        union.extend(lexical_scores.keys());

        let mut hits: Vec<HybridHit> = union
            .into_iter()
            .map(|doc_id| {
                let semantic = semantic_scores.get(doc_id).copied();
                let lexical = lexical_scores.get(doc_id).copied();
                // A document seen by only one signal contributes 0.0 for
                // the other; it is not otherwise penalized.
                let combined = params.semantic_weight * semantic.unwrap_or(0.0)
                    + lexical_weight * lexical.unwrap_or(0.0);

                let mut hit = HybridHit::new(doc_id.clone(), combined);
                hit.semantic_score = semantic;
                hit.lexical_score = lexical;
                hit
            })
            .collect();

        // Combined score descending, ties by document id ascending. The
        // union iterates a HashMap, so without the explicit tie-break the
        // order of equal scores would vary run to run.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        hits.truncate(params.limit);

        log::debug!(
            "fused {} semantic and {} lexical candidates into {} results",
            semantic_matches,
            lexical_matches,
            hits.len()
        );

        Ok(HybridSearchResults {
            hits,
            semantic_matches,
            lexical_matches,
            semantic_degraded,
            lexical_degraded,
            query_time_ms: start.elapsed().as_millis() as u64,
            query_text: request.query,
        })
    }

    /// Embed the query text, enforcing the embedding time budget and the
    /// index dimension invariant.
    ///
    /// Every failure on this path is fatal: whatever the embedder reports
    /// is surfaced as an embedding failure, and a vector of the wrong
    /// dimension is a configuration error.
    async fn embed_query(&self, text: &str) -> Result<Vector> {
        let embedded = match self.config.embed_timeout {
            Some(budget) => match timeout(budget, self.embedder.embed(text)).await {
                Ok(result) => result,
                Err(_) => Err(KingfisherError::embedding_failure(format!(
                    "embedding timed out after {budget:?}"
                ))),
            },
            None => self.embedder.embed(text).await,
        };

        let vector = embedded.map_err(|e| match e {
            err @ KingfisherError::EmbeddingFailure(_) => err,
            err => KingfisherError::embedding_failure(err.to_string()),
        })?;

        if !vector.is_valid() {
            return Err(KingfisherError::embedding_failure(
                "embedder returned a non-finite vector",
            ));
        }
        vector.validate_dimension(self.vector_index.dimension())?;

        Ok(vector)
    }

    /// Query the vector index, mapping a blown time budget to the same
    /// recoverable condition as a backend failure.
    async fn query_vector_index(&self, vector: &Vector, k: usize) -> Result<Vec<VectorHit>> {
        match self.config.index_timeout {
            Some(budget) => match timeout(budget, self.vector_index.query(vector, k)).await {
                Ok(result) => result,
                Err(_) => Err(KingfisherError::index_unavailable(
                    SearchSignal::Semantic,
                    format!("query timed out after {budget:?}"),
                )),
            },
            None => self.vector_index.query(vector, k).await,
        }
    }

    /// Query the lexical index, with the same timeout mapping as the
    /// vector side.
    async fn query_lexical_index(&self, text: &str, k: usize) -> Result<Vec<LexicalHit>> {
        match self.config.index_timeout {
            Some(budget) => match timeout(budget, self.lexical_index.query(text, k)).await {
                Ok(result) => result,
                Err(_) => Err(KingfisherError::index_unavailable(
                    SearchSignal::Lexical,
                    format!("query timed out after {budget:?}"),
                )),
            },
            None => self.lexical_index.query(text, k).await,
        }
    }

    /// Turn an index failure into an empty candidate set, keeping the
    /// degradation observable.
    fn recover<T>(signal: SearchSignal, outcome: Result<Vec<T>>) -> (Vec<T>, bool) {
        match outcome {
            Ok(hits) => (hits, false),
            Err(e) => {
                log::warn!("{signal} retrieval degraded, continuing without it: {e}");
                (Vec::new(), true)
            }
        }
    }
}
