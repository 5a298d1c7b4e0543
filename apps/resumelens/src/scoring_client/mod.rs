//! Scoring client: the single point of entry for calls to the external
//! scoring service.
//!
//! No other module talks to the collaborator directly. The transport is a
//! trait so workflows can be driven against scripted responses; the HTTP
//! implementation lives in `http`.
//!
//! There is no local fallback scoring and no retry: a failed call is reported
//! as-is and the caller decides what to do.
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{Config, ScoringMode};
use crate::errors::AnalysisError;
use crate::models::{AnalysisResult, JobDescriptionInput, ResumeInput};

pub mod http;
pub mod normalize;
pub mod wire;

pub use http::HttpTransport;

/// Longest body excerpt carried in a `ServerError` message.
const ERROR_PREVIEW_CHARS: usize = 180;

/// One outbound analysis: the inputs exactly as they were when submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume: ResumeInput,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume: ResumeInput, job_description: JobDescriptionInput) -> Self {
        Self {
            resume,
            job_description: job_description.text,
        }
    }
}

/// Status and body of a collaborator response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves an `AnalysisRequest` to the scoring service and back.
///
/// Implementations only fail with `Network` (collaborator unreachable) or
/// `Validation` (payload cannot be encoded for the selected mode). Status
/// classification and body parsing belong to `AnalysisClient`.
#[async_trait]
pub trait ScoringTransport: Send + Sync {
    async fn send(
        &self,
        mode: ScoringMode,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError>;
}

/// Sends inputs for scoring and returns a normalized `AnalysisResult` or a
/// classified failure.
#[derive(Clone)]
pub struct AnalysisClient {
    transport: Arc<dyn ScoringTransport>,
    mode: ScoringMode,
    ai_mode: bool,
}

impl AnalysisClient {
    pub fn new(transport: Arc<dyn ScoringTransport>, mode: ScoringMode) -> Self {
        Self {
            transport,
            mode,
            ai_mode: true,
        }
    }

    /// Builds a client backed by `HttpTransport` from the loaded config.
    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.scoring_mode).with_ai_mode(config.ai_mode))
    }

    pub fn with_ai_mode(mut self, enabled: bool) -> Self {
        self.ai_mode = enabled;
        self
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn ai_mode(&self) -> bool {
        self.ai_mode
    }

    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        if !self.ai_mode {
            return Err(AnalysisError::ModeUnavailable);
        }

        let response = self.transport.send(self.mode, request).await?;

        if !response.is_success() {
            let error = server_error(response.status, &response.body);
            warn!("Scoring service returned {}", response.status);
            return Err(error);
        }

        debug!(
            "Scoring response received: status={}, bytes={}",
            response.status,
            response.body.len()
        );

        normalize::normalize_body(self.mode, &response.body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detail { detail: serde_json::Value },
    Nested { error: NestedError },
}

#[derive(Debug, Deserialize)]
struct NestedError {
    message: String,
}

/// Builds a `ServerError`, preferring a structured error message from the body
/// and otherwise a short preview of the raw text.
fn server_error(status_code: u16, body: &[u8]) -> AnalysisError {
    let text = String::from_utf8_lossy(body);
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(ErrorBody::Detail { detail }) => match detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        },
        Ok(ErrorBody::Nested { error }) => error.message,
        Err(_) => text.chars().take(ERROR_PREVIEW_CHARS).collect(),
    };
    AnalysisError::Server {
        status_code,
        message,
    }
}
