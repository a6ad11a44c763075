//! Lexical index client boundary.
//!
//! Full-text indexing, tokenization, and BM25 scoring all live behind the
//! [`LexicalIndex`] trait; the fusion core only consumes ranked candidates.

pub mod index;

pub use index::{LexicalHit, LexicalIndex};
