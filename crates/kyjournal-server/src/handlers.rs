//! Request handlers for the generate and download routes.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::{HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use kyjournal_report::ReportDraft;
use kyjournal_report::download::download_file_name;
use kyjournal_types::{MediaAttachment, ReportRequest, ReportResult};

use crate::error::ApiError;
use crate::{AppState, html};

/// POST /generate — multipart form submission; responds with the report
/// page or an error page.
pub async fn generate_form(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let draft = match parse_multipart(multipart).await {
        Ok(draft) => draft,
        Err(err) => return err.into_page(),
    };
    let attachments = draft.attachments.clone();

    match run_pipeline(&state, draft).await {
        Ok((request, result)) => {
            Html(html::report_page(&request, &result, &attachments)).into_response()
        }
        Err(err) => err.into_page(),
    }
}

/// POST /api/generate — JSON draft in, JSON report out.
pub async fn generate_api(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ReportDraft>,
) -> Result<Json<ReportResult>, ApiError> {
    let (_, result) = run_pipeline(&state, draft).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    pub project_name: String,
    pub report_text: String,
}

/// POST /download — echo the generated report back as a plain-text
/// attachment named from the project slug. The body is the report text,
/// byte for byte.
pub async fn download(Form(form): Form<DownloadForm>) -> Response {
    let file_name = download_file_name(&form.project_name);
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    // Browsers normalize textarea/hidden-field line endings to CRLF on
    // submission; undo that so the file matches the generated report byte
    // for byte.
    let report_text = form.report_text.replace("\r\n", "\n");

    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report_text,
    )
        .into_response()
}

/// Collect → generate, the whole pipeline for one submission.
async fn run_pipeline(
    state: &AppState,
    draft: ReportDraft,
) -> Result<(ReportRequest, ReportResult), ApiError> {
    let request = draft.collect()?;
    let result = state.generator.generate(&request).await?;
    Ok((request, result))
}

/// Decode the multipart form into a draft. Unknown fields are ignored;
/// empty file parts (an untouched file input) are skipped.
async fn parse_multipart(mut multipart: Multipart) -> Result<ReportDraft, ApiError> {
    let mut draft = ReportDraft::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "project_name" => draft.project_name = field.text().await.map_err(bad_multipart)?,
            "visit_date" => {
                let text = field.text().await.map_err(bad_multipart)?;
                draft.visit_date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok();
            }
            "activities_description" => {
                draft.activities_description = field.text().await.map_err(bad_multipart)?;
            }
            "verifying_questions" => {
                let text = field.text().await.map_err(bad_multipart)?;
                draft.verifying_questions = text.lines().map(str::to_string).collect();
            }
            "media" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                if file_name.is_empty() || bytes.is_empty() {
                    continue;
                }
                draft.attachments.push(MediaAttachment {
                    file_name,
                    mime_type,
                    base64: base64::Engine::encode(
                        &base64::engine::general_purpose::STANDARD,
                        &bytes,
                    ),
                });
            }
            _ => {}
        }
    }

    Ok(draft)
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("invalid multipart body: {e}"))
}
