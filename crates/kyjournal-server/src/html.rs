//! Server-rendered pages. Plain string templating; display state only,
//! never business data.

use kyjournal_report::download::download_file_name;
use kyjournal_report::prompt::DEFAULT_QUESTIONS;
use kyjournal_types::{MediaAttachment, ReportRequest, ReportResult};

use crate::error::ApiError;

const STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:1rem;font-weight:bold}\
input,textarea{width:100%;padding:.4rem;margin-top:.25rem}\
textarea{min-height:6rem}\
button{margin-top:1.25rem;padding:.5rem 1.5rem}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:1rem;border-radius:4px}\
img,video{max-width:200px;margin:.25rem}\
.error{color:#a00;border:1px solid #a00;padding:1rem;border-radius:4px}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

/// GET / — the submission form.
pub fn form_page() -> String {
    let default_questions = escape(&DEFAULT_QUESTIONS.join("\n"));
    let body = format!(
        "<h1>Karma Yoga Journal Report Generator</h1>\n\
         <p>Upload your media, name your project, and describe your field visit so a draft journal report can be generated.</p>\n\
         <form method=\"post\" action=\"/generate\" enctype=\"multipart/form-data\">\n\
         <label for=\"project_name\">Karma Yoga project</label>\n\
         <input id=\"project_name\" name=\"project_name\" required>\n\
         <label for=\"visit_date\">Date of the field visit</label>\n\
         <input id=\"visit_date\" name=\"visit_date\" type=\"date\">\n\
         <label for=\"activities_description\">Objectives, goals, and activities of your visit</label>\n\
         <textarea id=\"activities_description\" name=\"activities_description\" required></textarea>\n\
         <label for=\"verifying_questions\">Verifying authority questions (one per line)</label>\n\
         <textarea id=\"verifying_questions\" name=\"verifying_questions\" rows=\"6\">{default_questions}</textarea>\n\
         <label for=\"media\">Photos and videos (optional, never sent to the model)</label>\n\
         <input id=\"media\" name=\"media\" type=\"file\" multiple accept=\"image/*,video/*\">\n\
         <button type=\"submit\">Generate Journal Report</button>\n\
         </form>"
    );
    page("Karma Yoga Journal", &body)
}

/// POST /generate — the report page with the download form and media previews.
pub fn report_page(
    request: &ReportRequest,
    result: &ReportResult,
    attachments: &[MediaAttachment],
) -> String {
    let project = escape(&request.project_name);
    let report = escape(&result.report_text);
    let file_name = escape(&download_file_name(&request.project_name));
    let generated_at = result.generated_at.format("%Y-%m-%d %H:%M UTC");

    let mut body = format!(
        "<h1>Draft Journal Report</h1>\n\
         <p>Project: <strong>{project}</strong> &middot; generated {generated_at}</p>\n\
         <pre>{report}</pre>\n\
         <form method=\"post\" action=\"/download\">\n\
         <input type=\"hidden\" name=\"project_name\" value=\"{project}\">\n\
         <input type=\"hidden\" name=\"report_text\" value=\"{report}\">\n\
         <button type=\"submit\">Download as {file_name}</button>\n\
         </form>\n"
    );

    if !attachments.is_empty() {
        body.push_str(&format!(
            "<h2>Uploaded files ({})</h2>\n<ul>\n",
            attachments.len()
        ));
        for media in attachments {
            let name = escape(&media.file_name);
            if media.is_image() {
                body.push_str(&format!(
                    "<li>{name}<br><img src=\"data:{};base64,{}\" alt=\"{name}\"></li>\n",
                    escape(&media.mime_type),
                    media.base64
                ));
            } else if media.is_video() {
                body.push_str(&format!(
                    "<li>{name}<br><video controls src=\"data:{};base64,{}\"></video></li>\n",
                    escape(&media.mime_type),
                    media.base64
                ));
            } else {
                body.push_str(&format!("<li>{name}</li>\n"));
            }
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<p><a href=\"/\">Generate another report</a></p>");
    page("Draft Journal Report", &body)
}

/// Error page for the form flow.
pub fn error_page(error: &ApiError) -> String {
    let hint = if error.is_user_error() {
        "Please correct the form and resubmit."
    } else {
        "You can retry once the underlying problem is resolved."
    };
    let body = format!(
        "<h1>Report not generated</h1>\n\
         <p class=\"error\">{}</p>\n\
         <p>{hint}</p>\n\
         <p><a href=\"/\">Back to the form</a></p>",
        escape(&error.to_string())
    );
    page("Report not generated", &body)
}

/// Minimal HTML escaping for text and attribute values.
fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request() -> ReportRequest {
        ReportRequest {
            project_name: "Tree <Planting>".into(),
            visit_date: None,
            activities_description: "Planted saplings.".into(),
            verifying_questions: vec![],
            attachment_count: 1,
        }
    }

    fn result() -> ReportResult {
        ReportResult {
            report_text: "Today I planted \"forty\" saplings.".into(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_form_page_prefills_default_questions() {
        let html = form_page();
        assert!(html.contains("plan of action"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("name=\"media\""));
    }

    #[test]
    fn test_report_page_escapes_user_text() {
        let html = report_page(&request(), &result(), &[]);
        assert!(html.contains("Tree &lt;Planting&gt;"));
        assert!(!html.contains("Tree <Planting>"));
        assert!(html.contains("&quot;forty&quot;"));
    }

    #[test]
    fn test_report_page_previews_images() {
        let media = vec![MediaAttachment {
            file_name: "site.png".into(),
            mime_type: "image/png".into(),
            base64: "aGVsbG8=".into(),
        }];
        let html = report_page(&request(), &result(), &media);
        assert!(html.contains("data:image/png;base64,aGVsbG8="));
        assert!(html.contains("Uploaded files (1)"));
    }

    #[test]
    fn test_report_page_previews_videos() {
        let media = vec![MediaAttachment {
            file_name: "visit.mp4".into(),
            mime_type: "video/mp4".into(),
            base64: "aGVsbG8=".into(),
        }];
        let html = report_page(&request(), &result(), &media);
        assert!(html.contains("<video controls src=\"data:video/mp4;base64,aGVsbG8=\">"));
    }

    #[test]
    fn test_report_page_lists_other_files_by_name() {
        let media = vec![MediaAttachment {
            file_name: "notes.pdf".into(),
            mime_type: "application/pdf".into(),
            base64: "aGVsbG8=".into(),
        }];
        let html = report_page(&request(), &result(), &media);
        assert!(html.contains("<li>notes.pdf</li>"));
        assert!(!html.contains("data:application/pdf"));
    }

    #[test]
    fn test_error_page_mentions_retry_for_service_errors() {
        let err = ApiError::Generate(kyjournal_report::GenerateError::Transient(
            "connection reset".into(),
        ));
        let html = error_page(&err);
        assert!(html.contains("retry"));
        assert!(html.contains("connection reset"));
    }
}
