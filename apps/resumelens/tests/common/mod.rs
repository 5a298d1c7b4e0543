#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use resumelens::config::ScoringMode;
use resumelens::errors::AnalysisError;
use resumelens::scoring_client::{AnalysisClient, AnalysisRequest, RawResponse, ScoringTransport};

pub const RESUME: &str = "Data engineer. Skills: Python, SQL. Worked on ML models.";
pub const JOB: &str = "Platform engineer. Docker, Kubernetes, AWS, React required.";

/// One canned reply, optionally delayed.
#[derive(Clone)]
pub struct Script {
    pub delay: Duration,
    pub reply: Result<RawResponse, AnalysisError>,
}

impl Script {
    pub fn ok(body: Value) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Ok(RawResponse::new(status, body.to_string())),
        }
    }

    pub fn raw(status: u16, body: &'static str) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Ok(RawResponse::new(status, body)),
        }
    }

    pub fn fail(error: AnalysisError) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Err(error),
        }
    }

    pub fn after(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

/// Fake collaborator keyed by job description text. Unknown keys get the
/// fallback script.
pub struct ScriptedTransport {
    routes: HashMap<String, Script>,
    fallback: Script,
    calls: AtomicUsize,
    modes: Mutex<Vec<ScoringMode>>,
}

impl ScriptedTransport {
    pub fn new(fallback: Script) -> Self {
        Self {
            routes: HashMap::new(),
            fallback,
            calls: AtomicUsize::new(0),
            modes: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, job_description: &str, script: Script) -> Self {
        self.routes.insert(job_description.to_string(), script);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn modes(&self) -> Vec<ScoringMode> {
        self.modes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringTransport for ScriptedTransport {
    async fn send(
        &self,
        mode: ScoringMode,
        request: &AnalysisRequest,
    ) -> Result<RawResponse, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.modes.lock().unwrap().push(mode);

        let script = self
            .routes
            .get(&request.job_description)
            .unwrap_or(&self.fallback)
            .clone();

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        script.reply
    }
}

pub fn client(transport: Arc<ScriptedTransport>, mode: ScoringMode) -> AnalysisClient {
    AnalysisClient::new(transport, mode)
}

/// JSON-mode body for the Python/SQL vs Docker/Kubernetes/AWS/React scenario.
pub fn json_scenario_body() -> Value {
    json!({
        "overall_score": 78.5,
        "semantic_similarity": 0.713,
        "keyword_match": 65.2,
        "skill_match": 82.0,
        "skill_matches": {
            "matched": ["Python", "SQL"],
            "missing": ["Docker", "Kubernetes", "AWS", "React"]
        },
        "category_analysis": {
            "programming": { "percentage": 100.0, "matched": ["python", "sql"], "total": 2 },
            "cloud_platforms": { "percentage": 0.0, "matched": [], "total": 1 }
        },
        "recommendations": [
            { "priority": "low", "category": "format", "title": "Tighten layout",
              "description": "" },
            { "priority": "high", "category": "skills", "title": "Add container experience",
              "description": "Docker and Kubernetes are required" },
            { "priority": "medium", "category": "keywords", "title": "Mirror JD wording" }
        ],
        "resume_bullets": ["Worked on ML models"],
        "improved_bullets": ["Developed supervised ML models for churn prediction"],
        "ai_powered": true
    })
}

/// Minimal JSON-mode body with a distinguishable overall score.
pub fn json_body_with_score(score: f64) -> Value {
    json!({
        "overall_score": score,
        "semantic_similarity": 0.5,
        "skill_matches": { "matched": ["Python"], "missing": ["Go"] }
    })
}

pub fn multipart_body() -> Value {
    json!({
        "ats_score": 55.0,
        "keyword_match": 40.0,
        "skill_match": 60.0,
        "semantic_similarity": 58.0,
        "matched_skills": ["Python"],
        "missing_skills": ["Docker", "Docker", "AWS"],
        "suggestions": ["Quantify your impact", "  "],
        "resume_bullets": [],
        "improved_bullets": []
    })
}
