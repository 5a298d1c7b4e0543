//! Maps either wire shape into the canonical `AnalysisResult`.
//!
//! Canonical scale: every score is a percentage in `[0, 100]`.
//! - JSON mode `semantic_similarity` arrives as a cosine similarity and is
//!   multiplied by 100. Negative cosines (unrelated texts) count as 0; values
//!   outside `[-1, 1]` are rejected rather than guessed.
//! - JSON mode without `keyword_match` derives it from `key_phrases`
//!   (`matched / total × 100`, capped at 100, 0 when `total` is 0).
//! - JSON mode without `skill_match` derives it from skill coverage
//!   (`matched / (matched + missing) × 100`).
//! - Multipart scores are already percentages and are taken as-is.
//!
//! Every result then passes `validate_result`, so nothing downstream needs to
//! re-check ranges, duplicates, or bullet pairing.

use std::collections::{BTreeMap, HashSet};

use crate::config::ScoringMode;
use crate::errors::AnalysisError;
use crate::models::{
    AnalysisResult, CategoryAnalysis, KeyPhraseCount, PresentationHints, Priority, Recommendation,
};
use crate::results::aggregator::dedupe_skills;
use crate::scoring_client::wire::{
    JsonAnalyzeResponse, MultipartAnalyzeResponse, WireRecommendation,
};

/// Category used for multipart free-text suggestions.
const SUGGESTION_CATEGORY: &str = "general";

pub fn normalize_body(mode: ScoringMode, body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    match mode {
        ScoringMode::Json => normalize_json(serde_json::from_slice(body)?),
        ScoringMode::Multipart => normalize_multipart(serde_json::from_slice(body)?),
    }
}

pub fn normalize_json(raw: JsonAnalyzeResponse) -> Result<AnalysisResult, AnalysisError> {
    let matched_skills = dedupe_skills(&raw.skill_matches.matched);
    let missing_skills = dedupe_skills(&raw.skill_matches.missing);

    let semantic_similarity =
        fraction_to_percent("semantic_similarity", raw.semantic_similarity)?;

    let key_phrase_count = raw.key_phrases.as_ref().map(|phrases| KeyPhraseCount {
        matched: u32::try_from(phrases.matched.len()).unwrap_or(u32::MAX),
        total: phrases.total,
    });

    let keyword_match = match (raw.keyword_match, &raw.key_phrases) {
        (Some(value), _) => value,
        (None, Some(phrases)) if phrases.total > 0 => {
            (phrases.matched.len() as f64 / phrases.total as f64 * 100.0).min(100.0)
        }
        (None, _) => 0.0,
    };

    let skill_match = match raw.skill_match {
        Some(value) => value,
        None => coverage_percent(matched_skills.len(), missing_skills.len()),
    };

    let category_analysis = raw
        .category_analysis
        .into_iter()
        .map(|(name, category)| {
            (
                name,
                CategoryAnalysis {
                    percentage: category.percentage,
                    matched: category.matched,
                    total: category.total,
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    let result = AnalysisResult {
        overall_score: raw.overall_score,
        semantic_similarity,
        keyword_match,
        skill_match,
        matched_skills,
        missing_skills,
        category_analysis,
        recommendations: raw.recommendations.into_iter().map(recommendation).collect(),
        resume_bullets: raw.resume_bullets,
        improved_bullets: raw.improved_bullets,
        hints: PresentationHints {
            ai_powered: raw.ai_powered,
            verdict: raw.verdict,
            verdict_color: raw.verdict_color,
            key_phrases: key_phrase_count,
        },
    };

    validate_result(&result)?;
    Ok(result)
}

pub fn normalize_multipart(raw: MultipartAnalyzeResponse) -> Result<AnalysisResult, AnalysisError> {
    let recommendations = raw
        .suggestions
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .map(|text| Recommendation {
            priority: Priority::Info,
            category: SUGGESTION_CATEGORY.to_string(),
            impact: String::new(),
            title: text.trim().to_string(),
            description: String::new(),
        })
        .collect();

    let result = AnalysisResult {
        overall_score: raw.ats_score,
        semantic_similarity: raw.semantic_similarity,
        keyword_match: raw.keyword_match,
        skill_match: raw.skill_match,
        matched_skills: dedupe_skills(&raw.matched_skills),
        missing_skills: dedupe_skills(&raw.missing_skills),
        category_analysis: BTreeMap::new(),
        recommendations,
        resume_bullets: raw.resume_bullets,
        improved_bullets: raw.improved_bullets,
        hints: PresentationHints::default(),
    };

    validate_result(&result)?;
    Ok(result)
}

/// Checks every `AnalysisResult` invariant. Also applied by the wizard before a
/// result is accepted, whatever produced it.
pub fn validate_result(result: &AnalysisResult) -> Result<(), AnalysisError> {
    check_percent("overall_score", result.overall_score)?;
    check_percent("semantic_similarity", result.semantic_similarity)?;
    check_percent("keyword_match", result.keyword_match)?;
    check_percent("skill_match", result.skill_match)?;

    for (name, category) in &result.category_analysis {
        check_percent(&format!("category_analysis.{name}.percentage"), category.percentage)?;
    }

    if let Some(dup) = first_duplicate(&result.matched_skills) {
        return Err(AnalysisError::Parse(format!("duplicate matched skill '{dup}'")));
    }
    if let Some(dup) = first_duplicate(&result.missing_skills) {
        return Err(AnalysisError::Parse(format!("duplicate missing skill '{dup}'")));
    }

    let matched: HashSet<&str> = result.matched_skills.iter().map(String::as_str).collect();
    if let Some(both) = result
        .missing_skills
        .iter()
        .find(|skill| matched.contains(skill.as_str()))
    {
        return Err(AnalysisError::Parse(format!(
            "skill '{both}' reported as both matched and missing"
        )));
    }

    if result.resume_bullets.len() != result.improved_bullets.len() {
        return Err(AnalysisError::MismatchedLength {
            resume_bullets: result.resume_bullets.len(),
            improved_bullets: result.improved_bullets.len(),
        });
    }

    Ok(())
}

fn recommendation(raw: WireRecommendation) -> Recommendation {
    Recommendation {
        priority: Priority::from(raw.priority),
        category: raw.category,
        impact: raw.impact,
        title: raw.title,
        description: raw.description,
    }
}

fn fraction_to_percent(field: &str, value: f64) -> Result<f64, AnalysisError> {
    if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
        return Err(AnalysisError::Parse(format!(
            "{field} must be a cosine similarity in [-1, 1], got {value}"
        )));
    }
    Ok(value.max(0.0) * 100.0)
}

fn check_percent(field: &str, value: f64) -> Result<(), AnalysisError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AnalysisError::Parse(format!(
            "{field} must be in [0, 100], got {value}"
        )));
    }
    Ok(())
}

fn coverage_percent(matched: usize, missing: usize) -> f64 {
    let total = matched + missing;
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    }
}

fn first_duplicate(items: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .find(|item| !seen.insert(item.as_str()))
        .map(String::as_str)
}
