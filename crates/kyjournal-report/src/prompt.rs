//! The fixed prompt template the report is generated from.

use chrono::NaiveDate;
use kyjournal_types::ReportRequest;

/// The four skeleton field-visit questions used when the verifying
/// authority supplied none.
pub const DEFAULT_QUESTIONS: [&str; 4] = [
    "1. Please describe the plan of action for today's field visit.",
    "2. Please describe the activities carried out to complete the action plan.",
    "3. What did you observe today that you would like to implement in your next field visit?",
    "4. What are the key learning outcomes from this field visit?",
];

pub fn default_questions() -> Vec<String> {
    DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// Render the prompt for one submission. Pure string substitution; the
/// template itself never varies.
pub fn render_prompt(request: &ReportRequest) -> String {
    let date = format_date(request.visit_date);
    let questions = request.verifying_questions.join("\n");

    format!(
        "You are a social welfare expert. Based on the following details from today's field visit, \
         please draft a comprehensive journal report of approximately 500 words, written in the \
         first person, that reflects on the social welfare impact and field activities. The report \
         must address each of the verifying authority's questions listed below.\n\
         \n\
         Project: {project}\n\
         Date of Visit: {date}\n\
         Objectives, Goals, and Activities: {activities}\n\
         Verifying Authority Questions:\n\
         {questions}\n\
         \n\
         Include relevant social welfare reflections and ensure the tone is both formal and \
         empathetic. Reply with the journal entry only.",
        project = request.project_name,
        activities = request.activities_description,
    )
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "No date provided".to_string(),
    }
}
