//! Report Generator: one prompt in, one report (or one classified error) out.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::Utc;
use kyjournal_types::{ReportRequest, ReportResult};

use crate::error::GenerateError;
use crate::model::ModelClient;
use crate::{prompt, strip};

const STATE_IDLE: u8 = 0;
const STATE_AWAITING: u8 = 1;

/// Observable generator state. Two states only; there are no intermediate
/// states and no cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    AwaitingResponse,
}

/// Turns a [`ReportRequest`] into a [`ReportResult`] with a single awaited
/// model call. Stateless across requests apart from the informational
/// in-flight flag.
pub struct ReportGenerator {
    client: Arc<dyn ModelClient>,
    state: AtomicU8,
}

impl ReportGenerator {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            state: AtomicU8::new(STATE_IDLE),
        }
    }

    pub fn state(&self) -> GeneratorState {
        match self.state.load(Ordering::SeqCst) {
            STATE_AWAITING => GeneratorState::AwaitingResponse,
            _ => GeneratorState::Idle,
        }
    }

    /// Generate the journal report for one submission.
    ///
    /// Renders the prompt, awaits one model completion, strips boilerplate
    /// and stamps the result. Never returns an empty success: an empty
    /// completion is reported as [`GenerateError::Transient`]. The state
    /// returns to `Idle` on every exit path, so a manual retry is always
    /// possible.
    pub async fn generate(&self, request: &ReportRequest) -> Result<ReportResult, GenerateError> {
        let _in_flight = InFlight::enter(&self.state);

        let prompt = prompt::render_prompt(request);
        tracing::debug!(
            project = %request.project_name,
            prompt_chars = prompt.len(),
            questions = request.verifying_questions.len(),
            "requesting journal report"
        );

        let raw = self.client.complete(&prompt).await?;
        let report_text = strip::strip_boilerplate(&raw);
        if report_text.is_empty() {
            return Err(GenerateError::Transient(
                "model returned an empty completion".into(),
            ));
        }

        tracing::info!(
            project = %request.project_name,
            report_chars = report_text.len(),
            "journal report generated"
        );

        Ok(ReportResult {
            report_text,
            generated_at: Utc::now(),
        })
    }
}

/// Scoped `Idle → AwaitingResponse` transition. Dropping the guard restores
/// `Idle` on success, error and panic alike.
struct InFlight<'a> {
    state: &'a AtomicU8,
}

impl<'a> InFlight<'a> {
    fn enter(state: &'a AtomicU8) -> Self {
        state.store(STATE_AWAITING, Ordering::SeqCst);
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.store(STATE_IDLE, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    enum MockModel {
        Reply(String),
        NetworkDown,
        NoKey,
    }

    #[async_trait]
    impl ModelClient for MockModel {
        async fn complete(&self, _prompt: &str) -> Result<String, GenerateError> {
            match self {
                MockModel::Reply(text) => Ok(text.clone()),
                MockModel::NetworkDown => {
                    Err(GenerateError::Transient("connection refused".into()))
                }
                MockModel::NoKey => Err(GenerateError::Config("GOOGLE_API_KEY is not set".into())),
            }
        }
    }

    fn request() -> ReportRequest {
        ReportRequest {
            project_name: "Village Literacy Drive".into(),
            visit_date: None,
            activities_description: "Taught reading.".into(),
            verifying_questions: vec!["What was the plan?".into()],
            attachment_count: 0,
        }
    }

    fn generator(model: MockModel) -> ReportGenerator {
        ReportGenerator::new(Arc::new(model))
    }

    #[tokio::test]
    async fn test_generate_returns_completion_unmodified() {
        // A ~500-word completion round-trips without truncation.
        let report = "word ".repeat(500).trim().to_string();
        let generator = generator(MockModel::Reply(report.clone()));
        let result = generator.generate(&request()).await.unwrap();
        assert_eq!(result.report_text, report);
    }

    #[tokio::test]
    async fn test_generate_strips_boilerplate_only() {
        let generator = generator(MockModel::Reply(
            "Here is your journal report:\nToday I taught reading.".into(),
        ));
        let result = generator.generate(&request()).await.unwrap();
        assert_eq!(result.report_text, "Today I taught reading.");
    }

    #[tokio::test]
    async fn test_generate_never_returns_empty_success() {
        let generator = generator(MockModel::Reply("   \n".into()));
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_generate_network_failure_is_transient_and_state_resets() {
        let generator = generator(MockModel::NetworkDown);
        assert_eq!(generator.state(), GeneratorState::Idle);

        let err = generator.generate(&request()).await.unwrap_err();
        assert!(err.is_transient());

        // Back to Idle: a manual retry needs no restart.
        assert_eq!(generator.state(), GeneratorState::Idle);
    }

    #[tokio::test]
    async fn test_generate_config_error_propagates() {
        let generator = generator(MockModel::NoKey);
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
        assert_eq!(generator.state(), GeneratorState::Idle);
    }
}
