//! The normalized analysis contract every scoring response is mapped into.
//!
//! All scores are percentages in `[0, 100]` regardless of the wire shape they
//! arrived in. Construction goes through `scoring_client::normalize`, which
//! enforces the invariants documented on `AnalysisResult`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency tag on a recommendation. Controls display rank and styling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Info,
    /// A label the collaborator sent that we do not recognise. Kept verbatim
    /// and ranked after every known priority.
    Other(String),
}

impl Priority {
    /// Display rank: high=0, medium=1, low=2, info=3, anything else=4.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::Info => 3,
            Priority::Other(_) => 4,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Info => "info",
            Priority::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            "info" => Priority::Info,
            _ => Priority::Other(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub impact: String,
    pub title: String,
    pub description: String,
}

/// Per skill-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    /// 0 – 100
    pub percentage: f64,
    pub matched: Vec<String>,
    /// Number of category skills the job description asked for, when reported.
    pub total: Option<u32>,
}

/// Raw key-phrase tally, shown as "matched/total".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPhraseCount {
    pub matched: u32,
    pub total: u32,
}

/// Optional presentation hints some collaborators attach to a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationHints {
    /// Absent means the response came from the AI service; only an explicit
    /// `false` marks a non-AI result.
    pub ai_powered: Option<bool>,
    pub verdict: Option<String>,
    pub verdict_color: Option<String>,
    pub key_phrases: Option<KeyPhraseCount>,
}

/// A complete, validated analysis of one resume against one job description.
///
/// Invariants (checked during normalization):
/// - every score and category percentage lies in `[0, 100]`
/// - `matched_skills` and `missing_skills` hold no duplicates and are disjoint
/// - `improved_bullets.len() == resume_bullets.len()`; index `i` of each is the
///   before/after of the same achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub semantic_similarity: f64,
    pub keyword_match: f64,
    pub skill_match: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub category_analysis: BTreeMap<String, CategoryAnalysis>,
    pub recommendations: Vec<Recommendation>,
    pub resume_bullets: Vec<String>,
    pub improved_bullets: Vec<String>,
    #[serde(default)]
    pub hints: PresentationHints,
}

impl AnalysisResult {
    pub fn missing_count(&self) -> usize {
        self.missing_skills.len()
    }
}
