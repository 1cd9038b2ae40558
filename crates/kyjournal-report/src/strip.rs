//! Boilerplate stripping for model completions.
//!
//! Models occasionally wrap the report in code fences or prepend a line
//! restating the request ("Here is your journal report:"). Only that outer
//! packaging is removed; the report body is never altered.

use once_cell::sync::Lazy;
use regex::Regex;

static PREAMBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(here('s| is)|below is|sure|certainly|okay)\b[^\n]*:$").unwrap()
});

/// Strip leading/trailing boilerplate from a raw completion.
pub fn strip_boilerplate(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(inner) = strip_fences(text) {
        text = inner;
    }

    // A single leading preamble line that restates the request.
    if let Some((first, rest)) = text.split_once('\n') {
        if PREAMBLE_RE.is_match(first.trim()) {
            text = rest.trim_start();
        }
    }

    text.trim().to_string()
}

/// Remove triple-backtick fences wrapping the entire completion, including
/// a language tag on the opening fence.
fn strip_fences(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let rest = rest.strip_suffix("```")?;
    let (_, body) = rest.split_once('\n')?;
    Some(body.trim())
}
