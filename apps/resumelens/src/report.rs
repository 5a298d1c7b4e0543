//! Plain-text rendering of the Results and Improvements steps for the CLI.

use std::fmt::Write;

use crate::results::{ImprovementsView, ResultsView};

const RULE: &str = "────────────────────────────────────────";

pub fn render_results(view: &ResultsView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Overall score: {:.1}%  [{}]  {}",
        view.overall.score, view.overall.band, view.overall.verdict
    );
    if view.ai_powered {
        let _ = writeln!(out, "AI-powered analysis");
    }
    let _ = writeln!(out, "{RULE}");

    for score in &view.sub_scores {
        let _ = writeln!(
            out,
            "  {:<20} {:>5.1}%  [{}]",
            score.label, score.value, score.band
        );
    }

    if let Some(phrases) = view.key_phrases {
        let _ = writeln!(
            out,
            "  {:<20} {:>6}",
            "Key phrases",
            format!("{}/{}", phrases.matched, phrases.total)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Matched skills ({}):", view.matched_skills.len());
    write_list(&mut out, &view.matched_skills);
    let _ = writeln!(out, "Missing skills ({}):", view.missing_count);
    write_list(&mut out, &view.missing_skills);

    if !view.categories.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Categories:");
        for category in &view.categories {
            let _ = writeln!(
                out,
                "  {:<24} {:>5.1}%  [{}]",
                category.display_name, category.percentage, category.band
            );
            if !category.matched.is_empty() {
                let _ = writeln!(out, "    matched: {}", category.matched.join(", "));
            }
        }
    }

    if !view.recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendations:");
        for rec in &view.recommendations {
            let _ = writeln!(out, "  [{}] {}", rec.priority, rec.title);
            if !rec.description.is_empty() {
                let _ = writeln!(out, "      {}", rec.description);
            }
        }
    }

    out
}

pub fn render_improvements(view: &ImprovementsView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Improved bullets ({}):", view.pairs.len());
    let _ = writeln!(out, "{RULE}");

    if view.pairs.is_empty() {
        let _ = writeln!(out, "  (no bullet rewrites returned)");
        return out;
    }

    for (i, pair) in view.pairs.iter().enumerate() {
        let _ = writeln!(out, "{}. before: {}", i + 1, pair.before);
        let _ = writeln!(out, "   after:  {}", pair.after);
    }

    out
}

fn write_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(out, "  {}", items.join(", "));
    }
}
