//! kyjournal-gemini: Google Generative Language (Gemini) HTTP client.
//!
//! Implements the [`kyjournal_report::ModelClient`] seam with a single
//! non-streaming `generateContent` call per report.

pub mod api;
pub mod types;

pub use api::GeminiApi;
