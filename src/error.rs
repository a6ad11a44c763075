//! Error types for the Kingfisher library.
//!
//! All fallible operations return [`KingfisherError`] through the [`Result`]
//! alias. The enum separates the one fatal retrieval condition
//! ([`KingfisherError::EmbeddingFailure`]) from the recoverable one
//! ([`KingfisherError::IndexUnavailable`]): a search cannot proceed without a
//! query vector, but the loss of a single retrieval signal only degrades the
//! result.
//!
//! # Examples
//!
//! ```
//! use kingfisher::error::{KingfisherError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KingfisherError::invalid_config("limit must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;

use anyhow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The retrieval signal a candidate set came from.
///
/// Used to attribute an [`KingfisherError::IndexUnavailable`] failure to the
/// backend that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchSignal {
    /// Vector similarity over query embeddings.
    Semantic,
    /// Full-text term relevance.
    Lexical,
}

impl fmt::Display for SearchSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchSignal::Semantic => write!(f, "semantic"),
            SearchSignal::Lexical => write!(f, "lexical"),
        }
    }
}

/// The main error type for Kingfisher operations.
#[derive(Error, Debug)]
pub enum KingfisherError {
    /// The query text could not be turned into a vector. Fatal to the search.
    #[error("Embedding failure: {0}")]
    EmbeddingFailure(String),

    /// A retrieval backend failed or returned unusable data. Recoverable:
    /// the search continues on the surviving signal.
    #[error("{signal} index unavailable: {message}")]
    IndexUnavailable {
        /// Which retrieval signal failed.
        signal: SearchSignal,
        /// Backend-supplied failure detail.
        message: String,
    },

    /// Invalid configuration or search parameter. Rejected before any
    /// backend is queried.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KingfisherError.
pub type Result<T> = std::result::Result<T, KingfisherError>;

impl KingfisherError {
    /// Create a new embedding failure error.
    pub fn embedding_failure<S: Into<String>>(msg: S) -> Self {
        KingfisherError::EmbeddingFailure(msg.into())
    }

    /// Create a new index unavailable error for the given signal.
    pub fn index_unavailable<S: Into<String>>(signal: SearchSignal, msg: S) -> Self {
        KingfisherError::IndexUnavailable {
            signal,
            message: msg.into(),
        }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        KingfisherError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KingfisherError::Other(msg.into())
    }

    /// Whether the search can continue after this error.
    ///
    /// Only [`KingfisherError::IndexUnavailable`] is recoverable: the fusion
    /// ranker treats the failed signal's candidate set as empty and ranks on
    /// the other signal alone.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KingfisherError::IndexUnavailable { .. })
    }
}
