//! Configuration for hybrid search.
//!
//! # Examples
//!
//! ```
//! use kingfisher::hybrid::config::HybridSearchConfig;
//!
//! // Use default configuration
//! let config = HybridSearchConfig::default();
//! assert_eq!(config.semantic_weight, 0.7);
//! assert_eq!(config.limit, 5);
//!
//! // Create custom configuration
//! let mut custom_config = HybridSearchConfig::default();
//! custom_config.semantic_weight = 0.3; // Favor exact term matching
//! custom_config.k_semantic = 50;
//! custom_config.validate().unwrap();
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KingfisherError, Result};

/// Configuration for hybrid search combining vector and lexical retrieval.
///
/// All values are captured when the searcher is constructed and read-only
/// thereafter; per-call overrides go through
/// [`HybridSearchRequest`](crate::hybrid::searcher::HybridSearchRequest).
///
/// # Weight Guidelines
///
/// `semantic_weight` is the share of the combined score contributed by
/// vector similarity; the lexical share is always `1.0 - semantic_weight`.
///
/// - **Semantic-focused** (0.7-0.8): emphasize meaning over exact terms
/// - **Balanced** (0.5): mix of exact and semantic matching
/// - **Keyword-focused** (0.2-0.3): good for exact term matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSearchConfig {
    /// Weight for the semantic (vector) signal, in [0.0, 1.0].
    pub semantic_weight: f32,
    /// Maximum number of fused results to return.
    pub limit: usize,
    /// Number of candidates to retrieve from the vector index.
    pub k_semantic: usize,
    /// Number of candidates to retrieve from the lexical index.
    pub k_lexical: usize,
    /// Time budget for the embedding call. Exceeding it is fatal to the
    /// search, like any other embedding failure. `None` disables the limit.
    pub embed_timeout: Option<Duration>,
    /// Time budget for each index query. Exceeding it degrades that signal
    /// instead of aborting the search. `None` disables the limit.
    pub index_timeout: Option<Duration>,
}

impl Default for HybridSearchConfig {
    fn default() -> Self {
        Self {
            semantic_weight: 0.7,
            limit: 5,
            k_semantic: 20,
            k_lexical: 20,
            embed_timeout: None,
            index_timeout: None,
        }
    }
}

impl HybridSearchConfig {
    /// Validate this configuration.
    ///
    /// Invalid values are rejected here, before any backend is queried;
    /// they are never silently coerced.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.semantic_weight) {
            return Err(KingfisherError::invalid_config(format!(
                "semantic_weight must be within [0.0, 1.0], got {}",
                self.semantic_weight
            )));
        }
        if self.limit < 1 {
            return Err(KingfisherError::invalid_config("limit must be at least 1"));
        }
        if self.k_semantic < 1 {
            return Err(KingfisherError::invalid_config(
                "k_semantic must be at least 1",
            ));
        }
        if self.k_lexical < 1 {
            return Err(KingfisherError::invalid_config(
                "k_lexical must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hybrid_search_config_default() {
        let config = HybridSearchConfig::default();
        assert_eq!(config.semantic_weight, 0.7);
        assert_eq!(config.limit, 5);
        assert_eq!(config.k_semantic, 20);
        assert_eq!(config.k_lexical, 20);
        assert!(config.embed_timeout.is_none());
        assert!(config.index_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_weight() {
        let mut config = HybridSearchConfig::default();
        config.semantic_weight = 1.5;
        assert!(config.validate().is_err());

        config.semantic_weight = -0.1;
        assert!(config.validate().is_err());

        config.semantic_weight = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_boundary_weights() {
        let mut config = HybridSearchConfig::default();
        config.semantic_weight = 0.0;
        assert!(config.validate().is_ok());

        config.semantic_weight = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let mut config = HybridSearchConfig::default();
        config.limit = 0;
        assert!(config.validate().is_err());

        let mut config = HybridSearchConfig::default();
        config.k_semantic = 0;
        assert!(config.validate().is_err());

        let mut config = HybridSearchConfig::default();
        config.k_lexical = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = HybridSearchConfig::default();
        config.index_timeout = Some(Duration::from_millis(250));

        let json = serde_json::to_string(&config).unwrap();
        let decoded: HybridSearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.semantic_weight, config.semantic_weight);
        assert_eq!(decoded.index_timeout, config.index_timeout);
    }
}
