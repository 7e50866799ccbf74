/// Convenience result type used across mipbuf.
pub type MipbufResult<T> = Result<T, MipbufError>;

/// Top-level error taxonomy for structural render-target operations.
///
/// Per-pixel accessors never produce these; only `resize`, `load`, `save`, mip generation with
/// explicit options, and sandbox resolution do.
#[derive(thiserror::Error, Debug)]
pub enum MipbufError {
    /// Invalid caller-provided arguments (mip index, thread count, dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// The target has no allocation, so there is nothing to load into or save from.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// A path escaped its sandbox root, or the root itself is unusable.
    #[error("sandbox error: {0}")]
    Sandbox(String),

    /// The path carries an extension outside the supported image set.
    #[error("extension error: {0}")]
    Extension(String),

    /// The image codec failed to decode or encode.
    #[error("codec error: {0}")]
    Codec(String),

    /// The pixel buffer could not be allocated.
    #[error("allocation error: {0}")]
    Alloc(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MipbufError {
    /// Build a [`MipbufError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MipbufError::InvalidTarget`] value.
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// Build a [`MipbufError::Sandbox`] value.
    pub fn sandbox(msg: impl Into<String>) -> Self {
        Self::Sandbox(msg.into())
    }

    /// Build a [`MipbufError::Extension`] value.
    pub fn extension(msg: impl Into<String>) -> Self {
        Self::Extension(msg.into())
    }

    /// Build a [`MipbufError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`MipbufError::Alloc`] value.
    pub fn alloc(msg: impl Into<String>) -> Self {
        Self::Alloc(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
