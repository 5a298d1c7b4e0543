use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Which request/response shape the scoring collaborator speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// JSON body `{resume, job_description}`, rich response with categories.
    #[default]
    Json,
    /// `multipart/form-data` upload, flat response with suggestions.
    Multipart,
}

impl FromStr for ScoringMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ScoringMode::Json),
            "multipart" | "form" => Ok(ScoringMode::Multipart),
            other => Err(anyhow!(
                "unknown scoring mode '{other}' (expected 'json' or 'multipart')"
            )),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub scoring_base_url: String,
    pub scoring_mode: ScoringMode,
    pub ai_mode: bool,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scoring_base_url: DEFAULT_BASE_URL.to_string(),
            scoring_mode: ScoringMode::default(),
            ai_mode: true,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys fall back to
    /// defaults; present but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let scoring_base_url = lookup("SCORING_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.scoring_base_url);
        if scoring_base_url.is_empty() {
            return Err(anyhow!("SCORING_BASE_URL must not be empty"));
        }

        let scoring_mode = match lookup("SCORING_MODE") {
            Some(raw) => raw.parse::<ScoringMode>().context("invalid SCORING_MODE")?,
            None => defaults.scoring_mode,
        };

        let ai_mode = match lookup("AI_MODE") {
            Some(raw) => parse_bool(&raw).context("AI_MODE must be true or false")?,
            None => defaults.ai_mode,
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => defaults.request_timeout_secs,
        };

        Ok(Config {
            scoring_base_url,
            scoring_mode,
            ai_mode,
            request_timeout_secs,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.scoring_base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.scoring_base_url)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("'{other}' is not a boolean")),
    }
}
