//! Deterministic naming for the downloadable report file.

/// Derive the download file name from the project name.
///
/// The slug keeps ASCII alphanumerics, folds everything else to a single
/// dash, and lowercases, so the name is filesystem- and header-safe.
pub fn download_file_name(project_name: &str) -> String {
    let slug: String = project_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "journal-report.txt".to_string()
    } else {
        format!("journal-report-{slug}.txt")
    }
}
