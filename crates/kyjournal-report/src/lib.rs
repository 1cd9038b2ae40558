//! kyjournal-report: input collection, prompt rendering and report generation.
//!
//! The pipeline is one linear pass per submission:
//! `ReportDraft::collect` → `ReportGenerator::generate` → display/download.
//! Nothing here keeps state across requests.

pub mod collector;
pub mod download;
pub mod error;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod strip;

pub use collector::ReportDraft;
pub use error::{GenerateError, ValidationError};
pub use generator::{GeneratorState, ReportGenerator};
pub use model::ModelClient;
