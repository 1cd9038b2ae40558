use thiserror::Error;

/// A submission was rejected before any prompt was rendered.
/// Recoverable: the user corrects the form and resubmits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("project name is required")]
    MissingProjectName,
    #[error("activity description is required")]
    MissingActivities,
}

/// Report generation failed. Generation either fully succeeds or fails;
/// no partial report is ever returned.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Missing or invalid API credential. Not retryable without operator
    /// action; detected before any network call when the key is absent.
    #[error("model configuration error: {0}")]
    Config(String),
    /// Network, rate-limit, server or malformed-response failure. The
    /// caller may retry manually; no automatic retry is performed.
    #[error("model service error: {0}")]
    Transient(String),
}

impl GenerateError {
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerateError::Transient(_))
    }
}
