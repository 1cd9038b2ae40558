use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ──────────────────── Report Types ────────────────────

/// A single journal-report submission, built once per request by the input
/// collector and discarded after the response is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Name of the Karma Yoga project the visit belongs to.
    pub project_name: String,
    /// Date of the field visit, if the user provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    /// Free-text objectives, goals and activities of the visit.
    pub activities_description: String,
    /// Verifying-authority questions the report must address, in order.
    #[serde(default)]
    pub verifying_questions: Vec<String>,
    /// Number of media files uploaded with the submission. Informational
    /// only; the files themselves are never sent to the model.
    #[serde(default)]
    pub attachment_count: usize,
}

/// The generated journal report. Owned by the caller for the remainder of
/// the request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult {
    /// The report text as returned by the model, boilerplate stripped.
    pub report_text: String,
    /// When generation completed.
    pub generated_at: DateTime<Utc>,
}

// ──────────────────── Media Types ────────────────────

/// A photo or video uploaded alongside a submission. Held only long enough
/// to echo a preview back to the submitting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// Original file name as uploaded.
    pub file_name: String,
    /// MIME type reported by the upload (e.g. "image/png").
    pub mime_type: String,
    /// File contents, base64-encoded.
    pub base64: String,
}

impl MediaAttachment {
    /// Whether this attachment can be previewed as an inline image.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Whether this attachment can be previewed with a video player.
    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}
