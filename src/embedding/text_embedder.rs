//! Text embedding trait for Kingfisher's semantic search pipeline.

use async_trait::async_trait;

use crate::error::Result;
use crate::vector::Vector;

/// Trait for converting query text to vector embeddings.
///
/// This trait is the boundary to the external embedding provider. The
/// fusion ranker calls [`TextEmbedder::embed`] exactly once per search; if
/// no vector can be produced, the whole search fails with
/// [`KingfisherError::EmbeddingFailure`], since there is no semantic
/// candidate set to degrade to without a query vector.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use kingfisher::embedding::TextEmbedder;
/// use kingfisher::error::Result;
/// use kingfisher::vector::Vector;
///
/// struct MyCustomEmbedder {
///     dimension: usize,
/// }
///
/// #[async_trait]
/// impl TextEmbedder for MyCustomEmbedder {
///     async fn embed(&self, text: &str) -> Result<Vector> {
///         // Your custom implementation
///         let embedding = vec![0.0; self.dimension];
///         Ok(Vector::new(embedding))
///     }
///
///     fn dimension(&self) -> usize {
///         self.dimension
///     }
/// }
/// ```
///
/// [`KingfisherError::EmbeddingFailure`]: crate::error::KingfisherError::EmbeddingFailure
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Generate an embedding vector for the given text.
    async fn embed(&self, text: &str) -> Result<Vector>;

    /// Generate embeddings for multiple texts in batch.
    ///
    /// The default implementation calls `embed` sequentially.
    /// Override this method for better performance with batch processing.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Get the dimension of generated embeddings.
    ///
    /// Must match the dimension the vector index was built with.
    fn dimension(&self) -> usize;

    /// Get the name/identifier of this embedder.
    ///
    /// This is useful for logging and debugging purposes.
    fn name(&self) -> &str {
        "unknown"
    }
}
