//! Integration tests for hybrid search fusion.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use kingfisher::document::DocumentId;
use kingfisher::embedding::TextEmbedder;
use kingfisher::error::{KingfisherError, Result, SearchSignal};
use kingfisher::hybrid::config::HybridSearchConfig;
use kingfisher::hybrid::searcher::{HybridSearchRequest, HybridSearcher};
use kingfisher::lexical::{LexicalHit, LexicalIndex};
use kingfisher::vector::{Vector, VectorHit, VectorIndex};

const DIMENSION: usize = 8;

struct HashEmbedder {
    dimension: usize,
}

#[async_trait]
impl TextEmbedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vector> {
        let mut data = vec![0.0_f32; self.dimension];
        for (i, byte) in text.bytes().enumerate() {
            data[i % self.dimension] += byte as f32 / 255.0;
        }
        Ok(Vector::new(data))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }
}

struct StaticVectorIndex {
    dimension: usize,
    hits: Vec<VectorHit>,
}

#[async_trait]
impl VectorIndex for StaticVectorIndex {
    async fn query(&self, _vector: &Vector, k: usize) -> Result<Vec<VectorHit>> {
        let mut hits = self.hits.clone();
        hits.truncate(k);
        Ok(hits)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

struct StaticLexicalIndex {
    hits: Vec<LexicalHit>,
}

#[async_trait]
impl LexicalIndex for StaticLexicalIndex {
    async fn query(&self, _text: &str, k: usize) -> Result<Vec<LexicalHit>> {
        let mut hits = self.hits.clone();
        hits.truncate(k);
        Ok(hits)
    }
}

/// Vector index that sleeps longer than any test timeout budget.
struct SlowVectorIndex {
    dimension: usize,
}

#[async_trait]
impl VectorIndex for SlowVectorIndex {
    async fn query(&self, _vector: &Vector, _k: usize) -> Result<Vec<VectorHit>> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(vec![VectorHit::new("never", 0.0)])
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

struct UnavailableLexicalIndex;

#[async_trait]
impl LexicalIndex for UnavailableLexicalIndex {
    async fn query(&self, _text: &str, _k: usize) -> Result<Vec<LexicalHit>> {
        Err(KingfisherError::index_unavailable(
            SearchSignal::Lexical,
            "connection refused",
        ))
    }
}

fn build_searcher(
    semantic: &[(&str, f32)],
    lexical: &[(&str, f32)],
    config: HybridSearchConfig,
) -> HybridSearcher {
    let vector_hits = semantic
        .iter()
        .map(|(id, d)| VectorHit::new(*id, *d))
        .collect();
    let lexical_hits = lexical
        .iter()
        .map(|(id, r)| LexicalHit::new(*id, *r))
        .collect();

    HybridSearcher::with_config(
        Arc::new(HashEmbedder {
            dimension: DIMENSION,
        }),
        Arc::new(StaticVectorIndex {
            dimension: DIMENSION,
            hits: vector_hits,
        }),
        Arc::new(StaticLexicalIndex { hits: lexical_hits }),
        config,
    )
    .unwrap()
}

fn result_ids(results: &kingfisher::hybrid::types::HybridSearchResults) -> Vec<String> {
    results
        .doc_ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

#[tokio::test]
async fn test_fusion_end_to_end() -> Result<()> {
    let searcher = build_searcher(
        &[("alpha", 0.1), ("beta", 0.5), ("gamma", 0.9)],
        &[("beta", 1.0), ("gamma", 2.0)],
        HybridSearchConfig::default(),
    );

    let request = HybridSearchRequest::new("cooperative farming game")
        .semantic_weight(0.7)
        .limit(3);
    let results = searcher.search(request).await?;

    assert_eq!(result_ids(&results), vec!["alpha", "beta", "gamma"]);
    assert_eq!(results.query_text, "cooperative farming game");
    assert_eq!(results.semantic_matches, 3);
    assert_eq!(results.lexical_matches, 2);

    // Documents only one signal saw still carry a full hit record.
    let alpha = &results.hits[0];
    assert_eq!(alpha.semantic_score, Some(1.0));
    assert_eq!(alpha.lexical_score, None);

    Ok(())
}

#[tokio::test]
async fn test_output_never_exceeds_limit_or_union() -> Result<()> {
    let searcher = build_searcher(
        &[("a", 0.1), ("b", 0.2), ("c", 0.3)],
        &[("b", 1.0), ("d", 2.0)],
        HybridSearchConfig::default(),
    );

    // Union holds 4 distinct documents; a larger limit returns all 4.
    let results = searcher
        .search(HybridSearchRequest::new("query").limit(50))
        .await?;
    assert_eq!(results.len(), 4);

    let results = searcher
        .search(HybridSearchRequest::new("query").limit(2))
        .await?;
    assert_eq!(results.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_increasing_semantic_weight_is_monotonic() -> Result<()> {
    // "favored" scores better semantically than lexically, so raising the
    // semantic weight must not lower its combined score.
    let semantic = [("favored", 0.1), ("other", 0.9)];
    let lexical = [("favored", 2.0), ("other", 1.0)];

    let mut previous = f32::MIN;
    for weight in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let searcher = build_searcher(&semantic, &lexical, HybridSearchConfig::default());
        let results = searcher
            .search(HybridSearchRequest::new("query").semantic_weight(weight))
            .await?;

        let favored = results
            .hits
            .iter()
            .find(|hit| hit.doc_id == DocumentId::new("favored"))
            .expect("favored document present");
        assert!(favored.score >= previous);
        previous = favored.score;
    }

    Ok(())
}

#[tokio::test]
async fn test_lexical_outage_yields_semantic_ranking() -> Result<()> {
    let searcher = HybridSearcher::new(
        Arc::new(HashEmbedder {
            dimension: DIMENSION,
        }),
        Arc::new(StaticVectorIndex {
            dimension: DIMENSION,
            hits: vec![VectorHit::new("near", 0.1), VectorHit::new("far", 0.9)],
        }),
        Arc::new(UnavailableLexicalIndex),
    )?;

    let results = searcher.search(HybridSearchRequest::new("query")).await?;

    assert_eq!(result_ids(&results), vec!["near", "far"]);
    assert!(results.lexical_degraded);
    assert!(!results.semantic_degraded);

    Ok(())
}

#[tokio::test]
async fn test_slow_vector_index_degrades_within_budget() -> Result<()> {
    let mut config = HybridSearchConfig::default();
    config.index_timeout = Some(Duration::from_millis(50));

    let searcher = HybridSearcher::with_config(
        Arc::new(HashEmbedder {
            dimension: DIMENSION,
        }),
        Arc::new(SlowVectorIndex {
            dimension: DIMENSION,
        }),
        Arc::new(StaticLexicalIndex {
            hits: vec![LexicalHit::new("steady", 1.0), LexicalHit::new("slow", 2.0)],
        }),
        config,
    )?;

    let results = searcher.search(HybridSearchRequest::new("query")).await?;

    // The timed-out vector side is treated like an unavailable backend.
    assert!(results.semantic_degraded);
    assert_eq!(result_ids(&results), vec!["steady", "slow"]);

    Ok(())
}

#[tokio::test]
async fn test_results_serialize_to_json() -> Result<()> {
    let searcher = build_searcher(
        &[("a", 0.2)],
        &[("a", 1.0), ("b", 3.0)],
        HybridSearchConfig::default(),
    );

    let results = searcher.search(HybridSearchRequest::new("query")).await?;
    let json = serde_json::to_string(&results)?;

    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["query_text"], "query");
    assert!(value["hits"].as_array().is_some());

    Ok(())
}

#[tokio::test]
async fn test_concurrent_searches_are_independent() -> Result<()> {
    let searcher = Arc::new(build_searcher(
        &[("a", 0.1), ("b", 0.4)],
        &[("b", 1.0), ("c", 2.0)],
        HybridSearchConfig::default(),
    ));

    let mut handles = Vec::new();
    for weight in [0.0, 0.5, 1.0] {
        let searcher = Arc::clone(&searcher);
        handles.push(tokio::spawn(async move {
            searcher
                .search(HybridSearchRequest::new("query").semantic_weight(weight))
                .await
        }));
    }

    for handle in handles {
        let results = handle.await.expect("task completed")?;
        assert!(!results.is_empty());
    }

    Ok(())
}
