//! Response shapes as the scoring service sends them. Nothing outside
//! `scoring_client` sees these; `normalize` maps both into `AnalysisResult`.

use std::collections::BTreeMap;

use serde::Deserialize;

// ────────────────────────────────────────────────────────────────────────────
// JSON mode
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillMatches {
    #[serde(default)]
    pub matched: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyPhrases {
    #[serde(default)]
    pub matched: Vec<String>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCategory {
    pub percentage: f64,
    #[serde(default)]
    pub matched: Vec<String>,
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRecommendation {
    pub priority: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub impact: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /analyze` JSON-mode response.
///
/// `semantic_similarity` is a fraction in `[0, 1]`; every other score is a
/// percentage.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonAnalyzeResponse {
    pub overall_score: f64,
    pub semantic_similarity: f64,
    pub keyword_match: Option<f64>,
    pub skill_match: Option<f64>,
    #[serde(default)]
    pub skill_matches: SkillMatches,
    pub key_phrases: Option<KeyPhrases>,
    #[serde(default)]
    pub category_analysis: BTreeMap<String, WireCategory>,
    #[serde(default)]
    pub recommendations: Vec<WireRecommendation>,
    #[serde(default)]
    pub resume_bullets: Vec<String>,
    #[serde(default)]
    pub improved_bullets: Vec<String>,
    pub verdict: Option<String>,
    #[serde(rename = "verdictColor")]
    pub verdict_color: Option<String>,
    pub ai_powered: Option<bool>,
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart mode
// ────────────────────────────────────────────────────────────────────────────

/// `POST /analyze` multipart-mode response. All scores are percentages.
#[derive(Debug, Clone, Deserialize)]
pub struct MultipartAnalyzeResponse {
    pub ats_score: f64,
    pub keyword_match: f64,
    pub skill_match: f64,
    pub semantic_similarity: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub resume_bullets: Vec<String>,
    #[serde(default)]
    pub improved_bullets: Vec<String>,
}
