//! Hybrid search module fusing lexical and vector retrieval.
//!
//! This module combines two independent retrieval signals over the same
//! corpus, vector similarity and full-text relevance, into one ranked
//! result list:
//! - Precise keyword matching for exact terms
//! - Semantic understanding through vector embeddings
//! - Configurable weighting between the two signals
//! - Best-effort degradation when one signal's backend is unavailable

pub mod config;
pub mod scorer;
pub mod searcher;
pub mod types;

pub use config::HybridSearchConfig;
pub use scorer::ScoreNormalizer;
pub use searcher::{HybridSearchRequest, HybridSearcher};
pub use types::{HybridHit, HybridSearchResults};
