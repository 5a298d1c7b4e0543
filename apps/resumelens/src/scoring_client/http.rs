use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Config, ScoringMode};
use crate::errors::AnalysisError;
use crate::input::validation::{file_extension, json_resume_text};
use crate::models::ResumeContent;
use crate::scoring_client::{AnalysisRequest, RawResponse, ScoringTransport};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const HEALTH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Serialize)]
struct JsonAnalyzeRequest<'a> {
    resume: &'a str,
    job_description: &'a str,
}

/// `reqwest`-backed transport for `POST {base}/analyze`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    analyze_url: String,
    health_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .user_agent(concat!("resumelens/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AnalysisError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            analyze_url: config.analyze_url(),
            health_url: config.health_url(),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// `GET /health`: true when the scoring service answers with a 2xx.
    pub async fn health(&self) -> bool {
        let response = self
            .client
            .get(&self.health_url)
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await;

        match response {
            Ok(r) => {
                debug!("Health probe {} returned {}", self.health_url, r.status());
                r.status().is_success()
            }
            Err(e) => {
                debug!("Health probe {} failed: {e}", self.health_url);
                false
            }
        }
    }
}

#[async_trait]
impl ScoringTransport for HttpTransport {
    async fn send(
        &self,
        mode: ScoringMode,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError> {
        let builder = self.client.post(&self.analyze_url);

        let builder = match mode {
            ScoringMode::Json => {
                let resume = json_resume_text(&request.resume)?;
                builder.json(&JsonAnalyzeRequest {
                    resume,
                    job_description: &request.job_description,
                })
            }
            ScoringMode::Multipart => {
                let file_name =
                    upload_file_name(&request.resume.source_name, &request.resume.content);
                let part = Part::bytes(request.resume.to_bytes().to_vec()).file_name(file_name);
                let form = Form::new()
                    .part("resume", part)
                    .text("job_description", request.job_description.clone());
                builder.multipart(form)
            }
        };

        info!("POST {} ({:?} mode)", self.analyze_url, mode);

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;

        Ok(RawResponse { status, body })
    }
}

/// File name sent with a multipart upload. Pasted text without an extension is
/// labelled `.txt` so the service knows how to read it.
fn upload_file_name(source_name: &str, content: &ResumeContent) -> String {
    let base = if source_name.trim().is_empty() {
        "resume"
    } else {
        source_name.trim()
    };
    match (content, file_extension(base)) {
        (ResumeContent::Text(_), None) => format!("{base}.txt"),
        _ => base.to_string(),
    }
}

fn network_error(e: reqwest::Error) -> AnalysisError {
    let reason = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    AnalysisError::Network(format!("{reason}: {e}"))
}
