use std::path::PathBuf;

/// Convenience result type used across walkcycle.
pub type WalkResult<T> = Result<T, WalkError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum WalkError {
    /// A configured sprite source does not exist on disk.
    #[error("missing source for '{name}': {}", path.display())]
    MissingSource {
        /// Character name from the source table.
        name: String,
        /// Resolved path that was probed.
        path: PathBuf,
    },

    /// Zero-area input reached a stage that needs real geometry.
    #[error("degenerate image: {0}")]
    DegenerateImage(String),

    /// No non-transparent pixel exists in the image.
    #[error("empty foreground: image has no visible pixels")]
    EmptyForeground,

    /// Invalid configuration or caller-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WalkError {
    /// Build a [`WalkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WalkError::DegenerateImage`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateImage(msg.into())
    }

    /// Build a [`WalkError::MissingSource`] value.
    pub fn missing_source(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingSource {
            name: name.into(),
            path: path.into(),
        }
    }

    /// `true` for errors that skip a character without counting as a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::MissingSource { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
