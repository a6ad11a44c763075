//! # Kingfisher
//!
//! A hybrid retrieval and fusion engine for Rust.
//!
//! Kingfisher ranks a fixed document corpus against a free-text query by
//! fusing two independent retrieval signals, vector similarity and lexical
//! full-text relevance, into a single ordered result list. It serves the
//! interactive search box case where users expect both "means the same
//! thing" and "contains these words" matches.
//!
//! ## Features
//!
//! - Pluggable embedder and index backends behind async traits
//! - Min-max score normalization across heterogeneous score scales
//! - Weighted fusion with a caller-supplied semantic/lexical balance
//! - Deterministic result ordering with an explicit tie-break
//! - Best-effort degradation when one retrieval backend is unavailable
//!
//! Index construction, embedding models, and document storage all live
//! outside this crate; Kingfisher orchestrates them as opaque rankers.

pub mod document;
pub mod embedding;
pub mod error;
pub mod hybrid;
pub mod lexical;
pub mod vector;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
