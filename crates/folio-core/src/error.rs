use thiserror::Error;

/// Validation failures raised at composition time. Structural problems in a
/// descriptor fail fast instead of being coerced.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("descriptor at position {position}: key must be a string or an integer, got {found}")]
    InvalidKey { position: usize, found: String },

    #[error("descriptor at position {position}: index must be an integer, got {found}")]
    InvalidIndex { position: usize, found: String },
}
