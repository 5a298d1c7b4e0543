//! Resume/job-description analysis workflow.
//!
//! A four-step wizard (Input → Scoring → Results → Improvements) that sends a
//! resume and a job description to an external scoring service, normalizes the
//! response into an `AnalysisResult`, and derives display groups from it.

pub mod config;
pub mod errors;
pub mod input;
pub mod models;
pub mod report;
pub mod results;
pub mod scoring_client;
pub mod wizard;

pub use errors::{AnalysisError, ValidationError};
pub use scoring_client::AnalysisClient;
pub use wizard::WizardController;
