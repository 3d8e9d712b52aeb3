//! Error types for the walker and interpreter layers.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use thiserror::Error;

/// Error type for page-tree walking and content-stream interpretation.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The document or a content stream violates PDF syntax. Terminal: no
    /// further callbacks fire once this is raised.
    #[error("malformed PDF: {0}")]
    MalformedPdf(String),

    /// The tokenizer ran out of input in the middle of a token. The
    /// interpreter converts this into [`WalkError::MalformedPdf`] with its
    /// canonical end-of-file message.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A content stream's filter chain could not be decoded.
    #[error("stream decode error: {0}")]
    Stream(String),
}
