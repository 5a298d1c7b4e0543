// Results & Improvements: pure aggregation of an accepted AnalysisResult into
// display-ready groups. Nothing here performs I/O.

pub mod aggregator;
pub mod view;

pub use aggregator::{
    band_color, dedupe_skills, order_recommendations, overall_band, pair_bullets, Band, BulletPair,
};
pub use view::{build_improvements_view, build_results_view, ImprovementsView, ResultsView};
