//! Input Collector: raw form/CLI fields → an immutable [`ReportRequest`].

use chrono::NaiveDate;
use kyjournal_types::{MediaAttachment, ReportRequest};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::prompt;

/// Raw submission fields as they arrive from the web form, the JSON API or
/// the CLI. Everything is optional here; `collect` decides what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportDraft {
    #[serde(default)]
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub activities_description: String,
    #[serde(default)]
    pub verifying_questions: Vec<String>,
    /// Uploaded media. Counted and echoed back to the user, never sent to
    /// the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<MediaAttachment>,
}

impl ReportDraft {
    /// Validate and freeze the draft into a [`ReportRequest`].
    ///
    /// Trims every text field, drops blank question lines, and falls back
    /// to the four skeleton questions when none were supplied. Rejects the
    /// submission when the project name or activity description is empty
    /// after trimming. Idempotent, no side effects.
    pub fn collect(self) -> Result<ReportRequest, ValidationError> {
        let project_name = self.project_name.trim().to_string();
        if project_name.is_empty() {
            return Err(ValidationError::MissingProjectName);
        }

        let activities_description = self.activities_description.trim().to_string();
        if activities_description.is_empty() {
            return Err(ValidationError::MissingActivities);
        }

        let mut verifying_questions: Vec<String> = self
            .verifying_questions
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(String::from)
            .collect();
        if verifying_questions.is_empty() {
            verifying_questions = prompt::default_questions();
        }

        Ok(ReportRequest {
            project_name,
            visit_date: self.visit_date,
            activities_description,
            verifying_questions,
            attachment_count: self.attachments.len(),
        })
    }
}
