//! Pure, deterministic transforms from an `AnalysisResult` to display groups.
//! No I/O and no shared state; safe to call repeatedly from anywhere.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::models::Recommendation;

/// Colour band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Good,
    Info,
    Warn,
    Bad,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Good => "good",
            Band::Info => "info",
            Band::Warn => "warn",
            Band::Bad => "bad",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category banding, 3-way: good (≥80), warn (≥50), bad.
pub fn band_color(percentage: f64) -> Band {
    if percentage >= 80.0 {
        Band::Good
    } else if percentage >= 50.0 {
        Band::Warn
    } else {
        Band::Bad
    }
}

/// Overall-score banding, 4-way: good (≥80), info (≥65), warn (≥50), bad.
/// Deliberately distinct from `band_color`.
pub fn overall_band(score: f64) -> Band {
    if score >= 80.0 {
        Band::Good
    } else if score >= 65.0 {
        Band::Info
    } else if score >= 50.0 {
        Band::Warn
    } else {
        Band::Bad
    }
}

/// Verdict label that goes with an overall band.
pub fn verdict_for(band: Band) -> &'static str {
    match band {
        Band::Good => "Excellent Match",
        Band::Info => "Strong Match",
        Band::Warn => "Moderate Match",
        Band::Bad => "Needs Improvement",
    }
}

/// Stable sort by priority rank (high, medium, low, info, then unrecognised).
/// Equal priorities keep their response order.
pub fn order_recommendations(list: &[Recommendation]) -> Vec<Recommendation> {
    let mut ordered = list.to_vec();
    ordered.sort_by_key(|r| r.priority.rank());
    ordered
}

/// Before/after rendering of one resume bullet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletPair {
    pub before: String,
    pub after: String,
}

/// Zips bullets positionally. Unequal lengths are a contract violation and
/// produce no pairs at all.
pub fn pair_bullets(
    resume_bullets: &[String],
    improved_bullets: &[String],
) -> Result<Vec<BulletPair>, AnalysisError> {
    if resume_bullets.len() != improved_bullets.len() {
        return Err(AnalysisError::MismatchedLength {
            resume_bullets: resume_bullets.len(),
            improved_bullets: improved_bullets.len(),
        });
    }

    Ok(resume_bullets
        .iter()
        .zip(improved_bullets)
        .map(|(before, after)| BulletPair {
            before: before.clone(),
            after: after.clone(),
        })
        .collect())
}

/// Case-sensitive dedupe, first occurrence wins.
pub fn dedupe_skills(list: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    list.iter()
        .filter(|skill| seen.insert(skill.as_str()))
        .cloned()
        .collect()
}
