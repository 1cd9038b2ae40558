use async_trait::async_trait;

use crate::error::GenerateError;

/// Seam between the report generator and the model service.
///
/// Production uses the Gemini HTTP client; tests substitute a double.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// One completion for one prompt. Synchronous from the caller's point
    /// of view: no streaming, no partial results, no retries.
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError>;
}
