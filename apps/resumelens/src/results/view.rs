use serde::Serialize;

use crate::errors::AnalysisError;
use crate::models::{AnalysisResult, KeyPhraseCount, Recommendation};
use crate::results::aggregator::{
    band_color, order_recommendations, overall_band, pair_bullets, verdict_for, Band, BulletPair,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallView {
    pub score: f64,
    pub band: Band,
    pub verdict: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreView {
    pub label: &'static str,
    pub value: f64,
    pub band: Band,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub display_name: String,
    pub percentage: f64,
    pub band: Band,
    pub matched: Vec<String>,
}

/// Everything the Results step renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub overall: OverallView,
    pub sub_scores: Vec<ScoreView>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub missing_count: usize,
    pub categories: Vec<CategoryView>,
    pub recommendations: Vec<Recommendation>,
    pub key_phrases: Option<KeyPhraseCount>,
    pub ai_powered: bool,
}

/// Everything the Improvements step renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementsView {
    pub pairs: Vec<BulletPair>,
}

pub fn build_results_view(result: &AnalysisResult) -> ResultsView {
    let band = overall_band(result.overall_score);
    let verdict = result
        .hints
        .verdict
        .clone()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| verdict_for(band).to_string());

    let sub_scores = vec![
        sub_score("Semantic similarity", result.semantic_similarity),
        sub_score("Keyword match", result.keyword_match),
        sub_score("Skill match", result.skill_match),
    ];

    let categories = result
        .category_analysis
        .iter()
        .map(|(name, category)| CategoryView {
            name: name.clone(),
            display_name: category_display_name(name),
            percentage: category.percentage,
            band: band_color(category.percentage),
            matched: category.matched.clone(),
        })
        .collect();

    ResultsView {
        overall: OverallView {
            score: result.overall_score,
            band,
            verdict,
        },
        sub_scores,
        matched_skills: result.matched_skills.clone(),
        missing_skills: result.missing_skills.clone(),
        missing_count: result.missing_count(),
        categories,
        recommendations: order_recommendations(&result.recommendations),
        key_phrases: result.hints.key_phrases,
        ai_powered: result.hints.ai_powered.unwrap_or(true),
    }
}

pub fn build_improvements_view(result: &AnalysisResult) -> Result<ImprovementsView, AnalysisError> {
    let pairs = pair_bullets(&result.resume_bullets, &result.improved_bullets)?;
    Ok(ImprovementsView { pairs })
}

fn sub_score(label: &'static str, value: f64) -> ScoreView {
    ScoreView {
        label,
        value,
        band: band_color(value),
    }
}

/// `machine_learning` → `machine learning`.
pub fn category_display_name(name: &str) -> String {
    name.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{CategoryAnalysis, PresentationHints, Priority};

    fn result() -> AnalysisResult {
        let mut categories = BTreeMap::new();
        categories.insert(
            "cloud_platforms".to_string(),
            CategoryAnalysis {
                percentage: 33.0,
                matched: vec!["aws".to_string()],
                total: Some(3),
            },
        );
        categories.insert(
            "programming".to_string(),
            CategoryAnalysis {
                percentage: 100.0,
                matched: vec!["python".to_string(), "sql".to_string()],
                total: Some(2),
            },
        );

        AnalysisResult {
            overall_score: 78.5,
            semantic_similarity: 71.3,
            keyword_match: 65.2,
            skill_match: 82.0,
            matched_skills: vec!["Python".to_string(), "SQL".to_string()],
            missing_skills: ["Docker", "Kubernetes", "AWS", "React"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            category_analysis: categories,
            recommendations: vec![
                Recommendation {
                    priority: Priority::Low,
                    category: "format".to_string(),
                    impact: "low".to_string(),
                    title: "Formatting".to_string(),
                    description: String::new(),
                },
                Recommendation {
                    priority: Priority::High,
                    category: "skills".to_string(),
                    impact: "high".to_string(),
                    title: "Missing skills".to_string(),
                    description: String::new(),
                },
            ],
            resume_bullets: vec!["Worked on ML models".to_string()],
            improved_bullets: vec!["Developed supervised ML models".to_string()],
            hints: PresentationHints::default(),
        }
    }

    #[test]
    fn test_results_view_overall_band_and_verdict() {
        let view = build_results_view(&result());
        assert_eq!(view.overall.band, Band::Info);
        assert_eq!(view.overall.verdict, "Strong Match");
        assert_eq!(view.missing_count, 4);
    }

    #[test]
    fn test_collaborator_verdict_overrides_label_only() {
        let mut r = result();
        r.hints.verdict = Some("Great Fit".to_string());
        let view = build_results_view(&r);
        assert_eq!(view.overall.verdict, "Great Fit");
        assert_eq!(view.overall.band, Band::Info);
    }

    #[test]
    fn test_categories_use_three_way_band() {
        let view = build_results_view(&result());
        let cloud = &view.categories[0];
        assert_eq!(cloud.display_name, "cloud platforms");
        assert_eq!(cloud.band, Band::Bad);
        assert_eq!(view.categories[1].band, Band::Good);
    }

    #[test]
    fn test_recommendations_are_ordered() {
        let view = build_results_view(&result());
        assert_eq!(view.recommendations[0].priority, Priority::High);
        assert_eq!(view.recommendations[1].priority, Priority::Low);
    }

    #[test]
    fn test_sub_scores_banded() {
        let view = build_results_view(&result());
        let labels: Vec<_> = view.sub_scores.iter().map(|s| (s.label, s.band)).collect();
        assert_eq!(
            labels,
            vec![
                ("Semantic similarity", Band::Warn),
                ("Keyword match", Band::Warn),
                ("Skill match", Band::Good),
            ]
        );
    }

    #[test]
    fn test_improvements_view_pairs() {
        let view = build_improvements_view(&result()).unwrap();
        assert_eq!(view.pairs.len(), 1);
        assert_eq!(view.pairs[0].after, "Developed supervised ML models");
    }

    #[test]
    fn test_improvements_view_rejects_mismatch() {
        let mut r = result();
        r.improved_bullets.push("extra".to_string());
        assert!(matches!(
            build_improvements_view(&r),
            Err(AnalysisError::MismatchedLength { .. })
        ));
    }

    #[test]
    fn test_ai_badge_shown_unless_explicitly_off() {
        let mut r = result();
        assert!(build_results_view(&r).ai_powered);
        r.hints.ai_powered = Some(false);
        assert!(!build_results_view(&r).ai_powered);
    }

    #[test]
    fn test_key_phrase_tally_passed_through() {
        let mut r = result();
        assert_eq!(build_results_view(&r).key_phrases, None);
        r.hints.key_phrases = Some(KeyPhraseCount {
            matched: 3,
            total: 10,
        });
        assert_eq!(
            build_results_view(&r).key_phrases,
            Some(KeyPhraseCount {
                matched: 3,
                total: 10
            })
        );
    }
}
