use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use kyjournal_gemini::GeminiApi;
use kyjournal_report::download::download_file_name;
use kyjournal_report::{ReportDraft, ReportGenerator};
use kyjournal_types::MediaAttachment;

/// Run the whole pipeline once: collect the flags into a request, generate
/// the report, write it to the download file and print it.
pub async fn run_generate(
    project: String,
    date: Option<String>,
    activities: String,
    questions: Vec<String>,
    media: Vec<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = kyjournal_config::load_config().unwrap_or_default();

    let visit_date = match date {
        Some(d) => Some(
            NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
                .context("visit date must be YYYY-MM-DD")?,
        ),
        None => None,
    };

    let mut attachments = Vec::new();
    for path in &media {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read media file {}", path.display()))?;
        attachments.push(MediaAttachment {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            mime_type: guess_mime(path),
            base64: base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes),
        });
    }

    let draft = ReportDraft {
        project_name: project,
        visit_date,
        activities_description: activities,
        verifying_questions: questions,
        attachments,
    };
    let request = draft.collect()?;

    let generator = ReportGenerator::new(Arc::new(GeminiApi::from_env(&config.model)));
    let result = generator.generate(&request).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(download_file_name(&request.project_name)));
    std::fs::write(&path, &result.report_text)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    println!("{}", result.report_text);
    eprintln!("(saved to {})", path.display());

    Ok(())
}

/// Guess the MIME type from the file extension, for the preview metadata.
fn guess_mime(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
    .to_string()
}
