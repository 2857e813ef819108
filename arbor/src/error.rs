//! Error types

use thiserror::Error;

/// Errors raised while building a forest or decoding engine input.
///
/// Tree operations themselves never fail: bad input to them is a no-op.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Two nodes in the input share the same key.
    #[error("duplicate node key '{0}'")]
    DuplicateKey(String),

    /// A raw drop position outside of `-1`, `0` and `1`.
    #[error("invalid drop position {0}, expected -1, 0 or 1")]
    InvalidDropPosition(i32),

    /// The forest or config JSON could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
